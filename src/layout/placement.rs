use crate::foundation::{
    core::Canvas,
    error::{SlidecastError, SlidecastResult},
    math::round_half_up,
};

/// Integer rectangle a slide occupies on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Placement {
    /// Left offset in pixels.
    pub x: u32,
    /// Top offset in pixels.
    pub y: u32,
    /// Scaled width in pixels.
    pub width: u32,
    /// Scaled height in pixels.
    pub height: u32,
}

impl Placement {
    /// Return `true` when the rectangle lies inside `canvas`.
    pub fn fits(&self, canvas: Canvas) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(canvas.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(canvas.height)
    }
}

/// Scale an image of `img_w x img_h` to fit `canvas` keeping its aspect ratio, centred.
///
/// Wider-than-canvas images span the full width (letterbox top/bottom); others span the full
/// height (letterbox left/right). Sizes and offsets round half-up and are clamped so the
/// rectangle never leaves the canvas.
pub fn aspect_fit(img_w: u32, img_h: u32, canvas: Canvas) -> SlidecastResult<Placement> {
    if img_w == 0 || img_h == 0 {
        return Err(SlidecastError::invalid_input(format!(
            "image dimensions must be non-zero, got {img_w}x{img_h}"
        )));
    }
    if canvas.width == 0 || canvas.height == 0 {
        return Err(SlidecastError::invalid_input(
            "canvas dimensions must be non-zero",
        ));
    }

    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let r_img = f64::from(img_w) / f64::from(img_h);

    let (new_w, new_h) = if r_img > canvas.aspect() {
        (cw, cw / r_img)
    } else {
        (ch * r_img, ch)
    };

    let width = round_half_up(new_w).clamp(1, i64::from(canvas.width)) as u32;
    let height = round_half_up(new_h).clamp(1, i64::from(canvas.height)) as u32;
    let x = round_half_up((cw - f64::from(width)) / 2.0).max(0) as u32;
    let y = round_half_up((ch - f64::from(height)) / 2.0).max(0) as u32;

    // Half-up rounding of an odd margin can push the far edge one pixel out.
    let x = x.min(canvas.width - width);
    let y = y.min(canvas.height - height);

    Ok(Placement {
        x,
        y,
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
