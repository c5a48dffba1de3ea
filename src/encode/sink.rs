use std::path::PathBuf;

use crate::{
    foundation::{
        core::Fps,
        error::{SlidecastError, SlidecastResult},
    },
    render::frame::FrameRGBA,
};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Total number of frames that will be pushed.
    pub total_frames: u64,
    /// Optional external raw PCM audio file input.
    pub audio: Option<AudioInputConfig>,
}

impl SinkConfig {
    /// Reject geometry and audio settings an H.264/yuv420p encode cannot take.
    pub fn validate(&self) -> SlidecastResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SlidecastError::invalid_input("sink fps must be non-zero"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SlidecastError::invalid_input(format!(
                "sink size {}x{} has a zero dimension",
                self.width, self.height
            )));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(SlidecastError::invalid_input(format!(
                "sink size {}x{} must be even for yuv420p",
                self.width, self.height
            )));
        }
        if let Some(a) = &self.audio
            && (a.sample_rate == 0 || a.channels == 0)
        {
            return Err(SlidecastError::invalid_input(format!(
                "audio input '{}' needs a non-zero sample rate and channel count",
                a.path.display()
            )));
        }
        Ok(())
    }

    /// Check that `frame` matches the configured size.
    pub fn check_frame(&self, frame: &FrameRGBA) -> SlidecastResult<()> {
        if (frame.width, frame.height) != (self.width, self.height) {
            return Err(SlidecastError::invalid_input(format!(
                "frame is {}x{} but the sink expects {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        let want = self.width as usize * self.height as usize * 4;
        if frame.data.len() != want {
            return Err(SlidecastError::invalid_input(format!(
                "frame holds {} bytes, expected {want}",
                frame.data.len()
            )));
        }
        Ok(())
    }
}

/// Raw PCM audio input configuration for sinks that support audio encoding.
#[derive(Debug, Clone)]
pub struct AudioInputConfig {
    /// Path to interleaved `f32le` PCM data.
    pub path: PathBuf,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
}

/// Sink contract for consuming composited frames in timeline order.
///
/// `push_frame` is called with strictly increasing frame indices. After a failure or a
/// cancellation the pipeline calls `abort` instead of `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SlidecastResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> SlidecastResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SlidecastResult<()>;
    /// Discard any partially written output.
    fn abort(&mut self) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    audio_bytes: Option<Vec<u8>>,
    finished: bool,
    aborted: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// Raw `f32le` audio bytes read from the audio input at `begin`.
    pub fn audio_bytes(&self) -> Option<&[u8]> {
        self.audio_bytes.as_deref()
    }

    /// `true` once `end` succeeded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `true` once `abort` was called.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SlidecastResult<()> {
        use anyhow::Context as _;

        cfg.validate()?;
        self.audio_bytes = match cfg.audio.as_ref() {
            Some(a) => Some(
                std::fs::read(&a.path)
                    .with_context(|| format!("read audio input '{}'", a.path.display()))?,
            ),
            None => None,
        };
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> SlidecastResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SlidecastError::encoding("in-memory sink not started"))?;
        cfg.check_frame(frame)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SlidecastResult<()> {
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
