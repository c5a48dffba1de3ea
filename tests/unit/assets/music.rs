use super::*;

fn fixture_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("music_unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_directory_yields_none() {
    let lib = MusicLibrary::new("target/music_unit/does_not_exist");
    assert!(lib.tracks().is_empty());
    assert!(lib.pick(1).is_none());
}

#[test]
fn only_music_extensions_are_candidates() {
    let dir = fixture_dir("filter");
    std::fs::write(dir.join("b.mp3"), b"x").unwrap();
    std::fs::write(dir.join("a.WAV"), b"x").unwrap();
    std::fs::write(dir.join("notes.txt"), b"x").unwrap();
    std::fs::create_dir_all(dir.join("sub.mp3")).unwrap();

    let tracks = MusicLibrary::new(&dir).tracks();
    assert_eq!(tracks, vec![dir.join("a.WAV"), dir.join("b.mp3")]);
}

#[test]
fn pick_is_deterministic_for_a_seed() {
    let dir = fixture_dir("pick");
    for name in ["one.mp3", "two.mp3", "three.wav"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    let lib = MusicLibrary::new(&dir);
    let a = lib.pick(99).unwrap();
    assert_eq!(lib.pick(99).unwrap(), a);
    assert!(lib.tracks().contains(&a));
}
