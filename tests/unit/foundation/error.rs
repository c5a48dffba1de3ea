use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlidecastError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        SlidecastError::missing_source("x")
            .to_string()
            .contains("missing source:")
    );
    assert!(
        SlidecastError::missing_optional_source("x")
            .to_string()
            .contains("missing optional source:")
    );
    assert!(
        SlidecastError::no_valid_input("x")
            .to_string()
            .contains("no valid input:")
    );
    assert!(
        SlidecastError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
}

#[test]
fn encoding_keeps_underlying_cause() {
    use std::error::Error as _;

    let base = std::io::Error::other("broken pipe");
    let err = SlidecastError::encoding_from(base, "failed to write frame");
    let msg = err.to_string();
    assert!(msg.contains("failed to write frame"));
    assert!(msg.contains("broken pipe"));
    assert!(err.source().is_some());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlidecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_optional_sources_are_recoverable() {
    assert!(!SlidecastError::missing_optional_source("music").is_fatal());
    assert!(SlidecastError::missing_source("narration").is_fatal());
    assert!(SlidecastError::no_valid_input("images").is_fatal());
    assert!(SlidecastError::Cancelled.is_fatal());
}
