use std::path::PathBuf;

use crate::{
    config::RenderConfig,
    effects::transitions::{SlideTransitions, schedule_transitions},
    foundation::error::SlidecastResult,
    layout::placement::{Placement, aspect_fit},
    motion::ken_burns::{DirectionSource, MotionState, plan_motion},
    timeline::allocate::{SlideTiming, allocate_durations, layout_timeline},
};

/// Source image size fed into planning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideSource {
    /// Image path.
    pub path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Everything the compositor needs to know about one slide, minus its pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SlidePlan {
    /// Image path.
    pub source: PathBuf,
    /// Position on the timeline.
    pub timing: SlideTiming,
    /// Rectangle on the canvas.
    pub placement: Placement,
    /// Ken Burns zoom.
    pub motion: MotionState,
    /// Fade windows.
    pub transitions: SlideTransitions,
}

/// Allocate durations and derive placement, motion and fades for every slide.
///
/// Pure for a given input and direction source.
pub fn plan_slides(
    total_secs: f64,
    sources: &[SlideSource],
    cfg: &RenderConfig,
    directions: &dyn DirectionSource,
) -> SlidecastResult<Vec<SlidePlan>> {
    let durations = allocate_durations(total_secs, sources.len())?;
    let timeline = layout_timeline(&durations);
    let transitions = schedule_transitions(&timeline, cfg.fade_secs)?;
    let motion = plan_motion(sources.len(), cfg.zoom_ratio, directions);

    sources
        .iter()
        .zip(timeline)
        .zip(transitions)
        .zip(motion)
        .map(|(((src, timing), transitions), motion)| {
            Ok(SlidePlan {
                source: src.path.clone(),
                timing,
                placement: aspect_fit(src.width, src.height, cfg.canvas)?,
                motion,
                transitions,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
