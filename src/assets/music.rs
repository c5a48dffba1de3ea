use std::path::{Path, PathBuf};

use crate::foundation::math::stable_hash64;

/// File extensions accepted as background music.
pub const MUSIC_EXTENSIONS: [&str; 2] = ["mp3", "wav"];

/// A directory of candidate background tracks.
#[derive(Clone, Debug)]
pub struct MusicLibrary {
    dir: PathBuf,
}

impl MusicLibrary {
    /// Library rooted at `dir`. The directory does not need to exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Candidate tracks, sorted by path.
    pub fn tracks(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut tracks: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && has_music_extension(p))
            .collect();
        tracks.sort();
        tracks
    }

    /// Pick zero or one track, deterministically for `seed`.
    pub fn pick(&self, seed: u64) -> Option<PathBuf> {
        let tracks = self.tracks();
        if tracks.is_empty() {
            tracing::info!(dir = %self.dir.display(), "no background music available");
            return None;
        }
        let idx = (stable_hash64(seed, tracks.len() as u64) % tracks.len() as u64) as usize;
        tracks.into_iter().nth(idx)
    }
}

fn has_music_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            MUSIC_EXTENSIONS
                .iter()
                .any(|m| e.eq_ignore_ascii_case(m))
        })
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/music.rs"]
mod tests;
