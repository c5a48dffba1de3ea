use crate::foundation::error::{SlidecastError, SlidecastResult};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// 1920x1080 landscape canvas.
    pub const HD: Canvas = Canvas {
        width: 1920,
        height: 1080,
    };

    /// Width / height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Number of bytes in one tightly packed RGBA8 frame.
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::HD
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SlidecastResult<Self> {
        if den == 0 {
            return Err(SlidecastError::invalid_input("fps den must be > 0"));
        }
        if num == 0 {
            return Err(SlidecastError::invalid_input("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Timeline time of frame `frame` in seconds.
    pub fn frame_time_secs(self, frame: u64) -> f64 {
        (frame as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Number of output frames covering `secs`, rounded to nearest and never zero.
    pub fn frames_for_secs(self, secs: f64) -> u64 {
        ((secs * self.as_f64()).round().max(1.0)) as u64
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    /// Channel array in `[r, g, b]` order.
    pub fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
