use crate::foundation::math::stable_hash64;

/// Zoom direction of one slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    /// Scale grows from `1` to `1 + zoom_ratio`.
    In,
    /// Scale shrinks from `1 + zoom_ratio` to `1`.
    Out,
}

/// Source of per-slide zoom directions.
///
/// Implementations must be deterministic for a given slide index so a render can be reproduced.
pub trait DirectionSource: Sync {
    /// Direction for slide `index`.
    fn direction(&self, index: usize) -> ZoomDirection;
}

/// Seeded direction source: FNV-1a of `(seed, index)`, the top bit picks the direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededDirections {
    /// Seed; production callers typically derive it from wall-clock time.
    pub seed: u64,
}

impl SeededDirections {
    /// Create a source pinned to `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the current wall-clock time.
    pub fn from_clock() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos)
    }
}

impl DirectionSource for SeededDirections {
    fn direction(&self, index: usize) -> ZoomDirection {
        if stable_hash64(self.seed, index as u64) >> 63 == 0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }
}

/// Every slide uses the same direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDirection(pub ZoomDirection);

impl DirectionSource for FixedDirection {
    fn direction(&self, _index: usize) -> ZoomDirection {
        self.0
    }
}

/// Motion parameters of one slide.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MotionState {
    /// Scale at `t = 0`.
    pub start_scale: f64,
    /// Scale at `t = duration`.
    pub end_scale: f64,
    /// Zoom direction.
    pub direction: ZoomDirection,
    /// Zoom amount the scales were derived from.
    pub zoom_ratio: f64,
}

impl MotionState {
    /// Build the motion for `direction` with the given zoom amount.
    pub fn new(direction: ZoomDirection, zoom_ratio: f64) -> Self {
        let (start_scale, end_scale) = match direction {
            ZoomDirection::In => (1.0, 1.0 + zoom_ratio),
            ZoomDirection::Out => (1.0 + zoom_ratio, 1.0),
        };
        Self {
            start_scale,
            end_scale,
            direction,
            zoom_ratio,
        }
    }

    /// Scale at slide-local time `t` for a slide lasting `duration` seconds.
    pub fn scale_at(&self, t: f64, duration: f64) -> f64 {
        zoom_scale(t, duration, self.direction, self.zoom_ratio)
    }
}

/// Pick a motion for each of `count` slides.
pub fn plan_motion(
    count: usize,
    zoom_ratio: f64,
    directions: &dyn DirectionSource,
) -> Vec<MotionState> {
    (0..count)
        .map(|i| MotionState::new(directions.direction(i), zoom_ratio))
        .collect()
}

/// Ken Burns scale at slide-local time `t`.
///
/// Linear in `t / duration`, clamped to `[0, 1]`, so the result stays within
/// `[1, 1 + zoom_ratio]`. The endpoints are exact: `t = 0` and `t = duration` return the
/// configured bounds with no floating drift. A zero-length slide holds its start scale.
pub fn zoom_scale(t: f64, duration: f64, direction: ZoomDirection, zoom_ratio: f64) -> f64 {
    let progress = if duration > 0.0 {
        (t / duration).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let hi = 1.0 + zoom_ratio;
    match direction {
        ZoomDirection::In => {
            if progress >= 1.0 {
                hi
            } else {
                1.0 + zoom_ratio * progress
            }
        }
        ZoomDirection::Out => {
            if progress >= 1.0 {
                1.0
            } else {
                hi - zoom_ratio * progress
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/ken_burns.rs"]
mod tests;
