use super::*;
use crate::{encode::sink::AudioInputConfig, foundation::core::Fps};

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
        total_frames: 1,
        audio: None,
    }
}

fn args_of(cmd: &Command) -> Vec<String> {
    cmd.get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn begin_rejects_odd_or_zero_dimensions() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/odd.mp4"));
    assert!(matches!(
        sink.begin(cfg(11, 10)),
        Err(SlidecastError::InvalidInput(_))
    ));
    assert!(matches!(
        sink.begin(cfg(0, 10)),
        Err(SlidecastError::InvalidInput(_))
    ));
}

#[test]
fn command_without_audio_disables_audio_stream() {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/a.mp4"));
    let args = args_of(&sink.build_command(&cfg(64, 36)).unwrap());
    assert!(args.contains(&"-an".to_string()));
    assert!(args.contains(&"64x36".to_string()));
    assert!(args.contains(&"30/1".to_string()));
    assert_eq!(args.last().unwrap(), "target/ffmpeg_unit/a.mp4");
}

#[test]
fn command_with_audio_maps_f32le_input_and_preset() {
    let mut opts = FfmpegSinkOpts::new("target/ffmpeg_unit/b.mp4");
    opts.preset = "veryfast".to_string();
    opts.threads = 4;
    let sink = FfmpegSink::new(opts);
    let mut c = cfg(64, 36);
    c.audio = Some(AudioInputConfig {
        path: PathBuf::from("mix.f32le"),
        sample_rate: 48_000,
        channels: 2,
    });
    let args = args_of(&sink.build_command(&c).unwrap());
    assert!(args.contains(&"f32le".to_string()));
    assert!(args.contains(&"48000".to_string()));
    assert!(args.contains(&"aac".to_string()));
    assert!(args.contains(&"veryfast".to_string()));
    assert!(args.contains(&"-threads".to_string()));
    assert!(!args.contains(&"-an".to_string()));
}

#[test]
fn zero_rate_audio_is_rejected() {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/c.mp4"));
    let mut c = cfg(64, 36);
    c.audio = Some(AudioInputConfig {
        path: PathBuf::from("mix.f32le"),
        sample_rate: 0,
        channels: 2,
    });
    assert!(sink.build_command(&c).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/ffmpeg_unit/d.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
    };
    assert!(sink.push_frame(0, &frame).is_err());
}
