//! Slidecast turns a narration track and an ordered list of still images into a narrated
//! slideshow video.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: check the job and config, decode slide images and audio up front
//! 2. **Allocate**: split the narration length evenly across the slides that decoded
//! 3. **Composite**: stack a category gradient and each slide (aspect-fit, Ken Burns zoom,
//!    crossfades) and evaluate it at every output frame time
//! 4. **Mix**: narration plus a looped, attenuated music bed, clamped to `[-1, 1]`
//! 5. **Encode**: stream frames and the mix to the system `ffmpeg` binary (or any [`FrameSink`])
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: for a fixed [`DirectionSource`] the same inputs give the same frames.
//! - **Atomic output**: [`render_to_file`] never leaves a partial file at the destination.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod audio;
mod config;
mod effects;
mod encode;
mod foundation;
mod layout;
mod motion;
mod render;
mod timeline;

pub use assets::decode::{SkippedImage, SlideImage, decode_image, load_slide, load_slides};
pub use assets::media::{
    AudioDecoder, AudioPcm, FfmpegAudioDecoder, MIX_CHANNELS, decode_audio_f32_stereo,
    secs_to_frames,
};
pub use assets::music::{MUSIC_EXTENSIONS, MusicLibrary};
pub use audio::mix::{
    AudioMixSpec, MixedAudio, fit_to_length, mix_tracks, write_mix_to_f32le_file,
};
pub use config::{ContentCategory, DEFAULT_SAMPLE_RATE, RenderConfig};
pub use effects::background::BackgroundSpec;
pub use effects::composite::{blend_over_opaque, sample_bilinear};
pub use effects::transitions::{
    FadeWindow, SlideTransitions, effective_fade, schedule_transitions,
};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use foundation::cancel::CancelToken;
pub use foundation::core::{Canvas, Fps, Rgb8};
pub use foundation::error::{SlidecastError, SlidecastResult};
pub use layout::placement::{Placement, aspect_fit};
pub use motion::ken_burns::{
    DirectionSource, FixedDirection, MotionState, SeededDirections, ZoomDirection, plan_motion,
    zoom_scale,
};
pub use render::frame::{FrameCompositor, FrameRGBA, SlideLayer};
pub use render::pipeline::{
    RenderContext, RenderJob, RenderReport, RenderStage, default_output_path, render_to_file,
    render_with_sink,
};
pub use render::plan::{SlidePlan, SlideSource, plan_slides};
pub use timeline::allocate::{
    DURATION_EPSILON, SlideTiming, allocate_durations, layout_timeline,
};
pub use timeline::captions::{CAPTION_LINE_CHARS, Caption, captions_from_script};
