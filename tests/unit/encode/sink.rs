use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(10, 1).unwrap(),
        total_frames: 2,
        audio: None,
    }
}

fn frame(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![7; width as usize * height as usize * 4],
    }
}

#[test]
fn validate_rejects_odd_sizes_and_silent_audio() {
    assert!(cfg(4, 2).validate().is_ok());
    assert!(matches!(
        cfg(5, 2).validate(),
        Err(SlidecastError::InvalidInput(_))
    ));
    assert!(cfg(0, 2).validate().is_err());

    let mut c = cfg(4, 2);
    c.audio = Some(AudioInputConfig {
        path: PathBuf::from("mix.f32le"),
        sample_rate: 48_000,
        channels: 0,
    });
    assert!(c.validate().is_err());
}

#[test]
fn check_frame_compares_size_and_length() {
    let c = cfg(4, 2);
    assert!(c.check_frame(&frame(4, 2)).is_ok());
    assert!(c.check_frame(&frame(2, 4)).is_err());

    let mut short = frame(4, 2);
    short.data.pop();
    assert!(c.check_frame(&short).is_err());
}

#[test]
fn in_memory_sink_records_frames_and_audio() {
    let dir = PathBuf::from("target").join("sink_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let audio = dir.join("mix.f32le");
    std::fs::write(&audio, 0.5f32.to_le_bytes()).unwrap();

    let mut c = cfg(4, 2);
    c.audio = Some(AudioInputConfig {
        path: audio,
        sample_rate: 48_000,
        channels: 2,
    });

    let mut sink = InMemorySink::new();
    sink.begin(c).unwrap();
    sink.push_frame(0, &frame(4, 2)).unwrap();
    sink.push_frame(1, &frame(4, 2)).unwrap();
    assert!(sink.push_frame(2, &frame(2, 2)).is_err());
    sink.end().unwrap();

    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.audio_bytes(), Some(&0.5f32.to_le_bytes()[..]));
    assert!(sink.is_finished());
    assert!(!sink.is_aborted());
}

#[test]
fn in_memory_sink_requires_begin() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(0, &frame(4, 2)).is_err());
}
