use crate::foundation::error::{SlidecastError, SlidecastResult};

/// Tolerance used when checking that allocated durations sum to the narration length.
pub const DURATION_EPSILON: f64 = 1e-6;

/// Where one slide sits on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SlideTiming {
    /// 0-based slide index.
    pub index: usize,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl SlideTiming {
    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Split `total_secs` across `count` slides.
///
/// Every slide gets `total_secs / count`; the last slide absorbs the rounding remainder so the
/// durations sum to `total_secs`.
pub fn allocate_durations(total_secs: f64, count: usize) -> SlidecastResult<Vec<f64>> {
    if count == 0 {
        return Err(SlidecastError::invalid_input(
            "at least one slide is required",
        ));
    }
    if !total_secs.is_finite() || total_secs <= 0.0 {
        return Err(SlidecastError::invalid_input(format!(
            "narration duration must be finite and > 0, got {total_secs}"
        )));
    }

    let per_slide = total_secs / count as f64;
    let mut durations = vec![per_slide; count];
    let head: f64 = durations[..count - 1].iter().sum();
    durations[count - 1] = (total_secs - head).max(0.0);
    Ok(durations)
}

/// Lay `durations` end to end starting at `t = 0`.
pub fn layout_timeline(durations: &[f64]) -> Vec<SlideTiming> {
    let mut start = 0.0;
    durations
        .iter()
        .enumerate()
        .map(|(index, &duration)| {
            let timing = SlideTiming {
                index,
                start,
                duration,
            };
            start += duration;
            timing
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/allocate.rs"]
mod tests;
