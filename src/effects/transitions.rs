use crate::{
    foundation::error::{SlidecastError, SlidecastResult},
    timeline::allocate::SlideTiming,
};

/// Absolute time interval `[start, end]` in seconds over which opacity ramps.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FadeWindow {
    /// Ramp start.
    pub start: f64,
    /// Ramp end.
    pub end: f64,
}

impl FadeWindow {
    /// Ramp length in seconds.
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// Return `true` for a zero-length window.
    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }
}

/// Fade windows for one slide.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SlideTransitions {
    /// 0-based slide index.
    pub index: usize,
    /// Effective fade length after clamping to half the slide duration.
    pub fade_secs: f64,
    /// Fade-in at the slide start (absent on the first slide).
    pub fade_in: Option<FadeWindow>,
    /// Fade-out at the slide end (absent on the last slide).
    pub fade_out: Option<FadeWindow>,
}

impl SlideTransitions {
    /// Slide opacity in `[0, 1]` at absolute time `t`.
    ///
    /// Linear ramps: `0 -> 1` across the fade-in window, `1 -> 0` across the fade-out window,
    /// `1` in between. Outside the slide both ramps saturate.
    pub fn alpha_at(&self, t: f64) -> f64 {
        let mut alpha = 1.0f64;
        if let Some(w) = self.fade_in
            && !w.is_empty()
        {
            alpha = alpha.min(((t - w.start) / w.len()).clamp(0.0, 1.0));
        }
        if let Some(w) = self.fade_out
            && !w.is_empty()
        {
            alpha = alpha.min(((w.end - t) / w.len()).clamp(0.0, 1.0));
        }
        alpha
    }
}

/// Compute fade windows for every slide on the timeline.
///
/// Slide `i` fades in over its first `fade_secs` unless it is the first slide, and fades out over
/// its last `fade_secs` unless it is the last. Slides shorter than `2 * fade_secs` use
/// `duration / 2` instead so the two ramps never overlap.
pub fn schedule_transitions(
    timeline: &[SlideTiming],
    fade_secs: f64,
) -> SlidecastResult<Vec<SlideTransitions>> {
    if !fade_secs.is_finite() || fade_secs < 0.0 {
        return Err(SlidecastError::invalid_input(format!(
            "fade duration must be finite and >= 0, got {fade_secs}"
        )));
    }

    let last = timeline.len().saturating_sub(1);
    Ok(timeline
        .iter()
        .map(|slot| {
            let fade = effective_fade(slot.duration, fade_secs);
            let fade_in = (slot.index > 0).then(|| FadeWindow {
                start: slot.start,
                end: slot.start + fade,
            });
            let fade_out = (slot.index < last).then(|| FadeWindow {
                start: slot.end() - fade,
                end: slot.end(),
            });
            SlideTransitions {
                index: slot.index,
                fade_secs: fade,
                fade_in,
                fade_out,
            }
        })
        .collect())
}

/// Fade length for a slide of `duration` seconds: `min(fade_secs, duration / 2)`.
pub fn effective_fade(duration: f64, fade_secs: f64) -> f64 {
    fade_secs.min(duration.max(0.0) / 2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
