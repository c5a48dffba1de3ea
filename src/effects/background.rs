use crate::{
    config::ContentCategory,
    foundation::core::{Canvas, Rgb8},
};

/// Vertical gradient endpoints for a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BackgroundSpec {
    /// Color at the top row.
    pub start: Rgb8,
    /// Color approached at the bottom row.
    pub end: Rgb8,
}

impl BackgroundSpec {
    /// Gradient pair for `category`.
    pub fn for_category(category: ContentCategory) -> Self {
        let (start, end) = match category {
            ContentCategory::Tech => (Rgb8(20, 30, 80), Rgb8(60, 20, 140)),
            ContentCategory::Ai => (Rgb8(30, 10, 60), Rgb8(20, 80, 160)),
            ContentCategory::Productivity => (Rgb8(10, 40, 30), Rgb8(40, 90, 80)),
            ContentCategory::Money => (Rgb8(40, 30, 10), Rgb8(100, 90, 30)),
            ContentCategory::Design => (Rgb8(60, 20, 40), Rgb8(120, 50, 90)),
            ContentCategory::Default => (Rgb8(20, 20, 40), Rgb8(60, 40, 80)),
        };
        Self { start, end }
    }

    /// Color of row `y` on a canvas `height` rows tall: `start + (end - start) * y / height`.
    pub fn row_color(&self, y: u32, height: u32) -> Rgb8 {
        let t = if height == 0 {
            0.0
        } else {
            f64::from(y) / f64::from(height)
        };
        let lerp = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        let [sr, sg, sb] = self.start.channels();
        let [er, eg, eb] = self.end.channels();
        Rgb8(lerp(sr, er), lerp(sg, eg), lerp(sb, eb))
    }

    /// Render the full-canvas gradient as opaque RGBA8, row-major.
    pub fn render(&self, canvas: Canvas) -> Vec<u8> {
        let row_bytes = canvas.width as usize * 4;
        let mut out = vec![0u8; canvas.rgba_len()];
        for (y, row) in out.chunks_exact_mut(row_bytes.max(1)).enumerate() {
            let Rgb8(r, g, b) = self.row_color(y as u32, canvas.height);
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&[r, g, b, 255]);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/background.rs"]
mod tests;
