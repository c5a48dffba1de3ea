use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn empty_or_blank_script_has_no_captions() {
    assert!(captions_from_script("", 10.0).is_empty());
    assert!(captions_from_script("   \n\t", 10.0).is_empty());
}

#[test]
fn sentences_share_the_duration_evenly() {
    let caps = captions_from_script("Hello there. How are you? Fine!", 9.0);
    let texts: Vec<_> = caps.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["Hello there.", "How are you?", "Fine!"]);
    for (i, c) in caps.iter().enumerate() {
        assert!(close(c.start, 3.0 * i as f64));
        assert!(close(c.end, 3.0 * (i + 1) as f64));
    }
}

#[test]
fn trailing_text_without_terminator_is_a_sentence() {
    let caps = captions_from_script("First. and then some", 4.0);
    assert_eq!(caps.len(), 2);
    assert_eq!(caps[1].text, "and then some");
    assert!(close(caps[1].start, 2.0) && close(caps[1].end, 4.0));
}

#[test]
fn long_sentence_is_split_into_timed_chunks() {
    let sentence = "The quick brown fox jumps over the lazy dog while the cat watches quietly.";
    let caps = captions_from_script(sentence, 6.0);
    assert_eq!(caps.len(), 2);
    assert_eq!(caps[0].text, "The quick brown fox jumps over the lazy dog");
    assert_eq!(caps[1].text, "while the cat watches quietly.");
    assert!(close(caps[0].start, 0.0) && close(caps[0].end, 3.0));
    assert!(close(caps[1].start, 3.0) && close(caps[1].end, 6.0));
}

#[test]
fn captions_are_contiguous_and_cover_the_duration() {
    let script = "One two three four five six seven eight nine ten eleven twelve. Short. \
                  Another fairly long sentence that should wrap onto a second caption line!";
    let total = 17.5;
    let caps = captions_from_script(script, total);
    assert!(caps.len() > 3);
    assert!(close(caps[0].start, 0.0));
    for pair in caps.windows(2) {
        assert!(close(pair[0].end, pair[1].start));
    }
    assert!(close(caps[caps.len() - 1].end, total));
    assert!(caps.iter().all(|c| !c.text.is_empty()));
}
