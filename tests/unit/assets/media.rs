use super::*;

#[test]
fn pcm_duration_counts_frames_not_samples() {
    let pcm = AudioPcm::silence(48_000, 2, 96_000);
    assert_eq!(pcm.frames(), 96_000);
    assert_eq!(pcm.interleaved_f32.len(), 192_000);
    assert!((pcm.duration_secs() - 2.0).abs() < 1e-12);
}

#[test]
fn secs_to_frames_rounds_to_nearest() {
    assert_eq!(secs_to_frames(12.0, 48_000), 576_000);
    assert_eq!(secs_to_frames(1.0 / 3.0, 3), 1);
    assert_eq!(secs_to_frames(-1.0, 48_000), 0);
}

#[test]
fn f32le_parsing_checks_alignment() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0.5f32.to_le_bytes());
    bytes.extend_from_slice(&(-0.25f32).to_le_bytes());
    assert_eq!(f32le_bytes_to_samples(&bytes).unwrap(), vec![0.5, -0.25]);
    assert!(f32le_bytes_to_samples(&bytes[..5]).is_err());
}

#[test]
fn missing_file_fails_before_spawning_ffmpeg() {
    let err = decode_audio_f32_stereo(Path::new("target/definitely/missing.wav"), 48_000)
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
