use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::{
    core::{Canvas, Fps},
    error::{SlidecastError, SlidecastResult},
};

/// Sample rate used for decoding and mixing when none is configured.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Immutable settings for one render job.
///
/// Every field falls back to its default when absent from JSON, so partial config files are
/// accepted. Call [`RenderConfig::validate`] before use; the pipeline entry points do this.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output frame size.
    pub canvas: Canvas,
    /// Output frame rate (integer frames per second).
    pub fps: u32,
    /// Ken Burns zoom amount; scale travels between `1` and `1 + zoom_ratio`.
    pub zoom_ratio: f64,
    /// Crossfade duration at slide boundaries, in seconds.
    pub fade_secs: f64,
    /// Linear gain applied to the music bed before mixing.
    pub music_gain: f32,
    /// When `false` the music bed is ignored even if one is supplied.
    pub music_enabled: bool,
    /// Decode/mix sample rate in Hz.
    pub sample_rate: u32,
    /// libx264 preset name.
    pub encoder_preset: String,
    /// Encoder thread count (`0` lets ffmpeg decide).
    pub encoder_threads: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::HD,
            fps: 30,
            zoom_ratio: 0.06,
            fade_secs: 0.2,
            music_gain: 0.18,
            music_enabled: true,
            sample_rate: DEFAULT_SAMPLE_RATE,
            encoder_preset: "ultrafast".to_string(),
            encoder_threads: 8,
        }
    }
}

impl RenderConfig {
    /// Load a JSON config file.
    pub fn from_json_file(path: &Path) -> SlidecastResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Reject values the pipeline cannot honour.
    pub fn validate(&self) -> SlidecastResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SlidecastError::invalid_input(
                "canvas width/height must be non-zero",
            ));
        }
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            return Err(SlidecastError::invalid_input(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.fps == 0 {
            return Err(SlidecastError::invalid_input("fps must be non-zero"));
        }
        if !self.zoom_ratio.is_finite() || !(0.0..=1.0).contains(&self.zoom_ratio) {
            return Err(SlidecastError::invalid_input(format!(
                "zoom_ratio must be within [0, 1], got {}",
                self.zoom_ratio
            )));
        }
        if !self.fade_secs.is_finite() || self.fade_secs < 0.0 {
            return Err(SlidecastError::invalid_input(format!(
                "fade_secs must be finite and >= 0, got {}",
                self.fade_secs
            )));
        }
        if !self.music_gain.is_finite() || self.music_gain < 0.0 {
            return Err(SlidecastError::invalid_input(format!(
                "music_gain must be finite and >= 0, got {}",
                self.music_gain
            )));
        }
        if self.sample_rate == 0 {
            return Err(SlidecastError::invalid_input("sample_rate must be non-zero"));
        }
        if self.encoder_preset.trim().is_empty() {
            return Err(SlidecastError::invalid_input(
                "encoder_preset must be non-empty",
            ));
        }
        Ok(())
    }

    /// Frame rate as a validated rational.
    pub fn frame_rate(&self) -> SlidecastResult<Fps> {
        Fps::new(self.fps, 1)
    }
}

/// Content category tag supplied alongside the slides; selects the background gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    /// Technology.
    Tech,
    /// Artificial intelligence.
    Ai,
    /// Productivity.
    Productivity,
    /// Money / finance.
    Money,
    /// Design.
    Design,
    /// Anything else.
    #[default]
    Default,
}

impl ContentCategory {
    /// All categories in table order.
    pub const ALL: [ContentCategory; 6] = [
        Self::Tech,
        Self::Ai,
        Self::Productivity,
        Self::Money,
        Self::Design,
        Self::Default,
    ];

    /// Parse a free-form tag. Unknown tags map to [`ContentCategory::Default`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "tech" => Self::Tech,
            "ai" => Self::Ai,
            "productivity" => Self::Productivity,
            "money" => Self::Money,
            "design" => Self::Design,
            _ => Self::Default,
        }
    }

    /// Lowercase tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Ai => "ai",
            Self::Productivity => "productivity",
            Self::Money => "money",
            Self::Design => "design",
            Self::Default => "default",
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
