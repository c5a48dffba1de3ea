use rayon::prelude::*;

use crate::{
    assets::decode::SlideImage,
    effects::{
        background::BackgroundSpec,
        composite::{blend_over_opaque, sample_bilinear},
    },
    foundation::core::Canvas,
    render::plan::SlidePlan,
};

/// One composited output frame: opaque RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4`.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// RGBA of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// A decoded slide paired with its timeline plan.
#[derive(Clone, Debug)]
pub struct SlideLayer {
    /// Decoded pixels.
    pub image: SlideImage,
    /// Timing, placement, motion and fades.
    pub plan: SlidePlan,
    /// The final slide also covers `t == end`.
    pub is_last: bool,
}

impl SlideLayer {
    /// Return `true` when the slide is on screen at absolute time `t`.
    pub fn is_active(&self, t: f64) -> bool {
        let timing = &self.plan.timing;
        t >= timing.start && (t < timing.end() || (self.is_last && t <= timing.end()))
    }
}

/// Stacks the background and slide layers and evaluates them at arbitrary times.
#[derive(Clone, Debug)]
pub struct FrameCompositor {
    canvas: Canvas,
    background: Vec<u8>,
    layers: Vec<SlideLayer>,
}

impl FrameCompositor {
    /// Render the static background once and keep the layers in timeline order.
    pub fn new(canvas: Canvas, background: &BackgroundSpec, layers: Vec<SlideLayer>) -> Self {
        Self {
            canvas,
            background: background.render(canvas),
            layers,
        }
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Slide layers in timeline order.
    pub fn layers(&self) -> &[SlideLayer] {
        &self.layers
    }

    /// Composite the frame at absolute time `t` seconds.
    pub fn render_at(&self, t: f64) -> FrameRGBA {
        let mut data = self.background.clone();
        for layer in self.layers.iter().filter(|l| l.is_active(t)) {
            let alpha = layer.plan.transitions.alpha_at(t);
            if alpha <= 0.0 {
                continue;
            }
            let local = t - layer.plan.timing.start;
            let scale = layer.plan.motion.scale_at(local, layer.plan.timing.duration);
            draw_layer(&mut data, self.canvas, layer, scale, alpha as f32);
        }
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
        }
    }
}

/// Draw `layer` into its placement rectangle, showing the centred `1/scale` crop of the image.
fn draw_layer(dst: &mut [u8], canvas: Canvas, layer: &SlideLayer, scale: f64, alpha: f32) {
    let p = layer.plan.placement;
    let img = &layer.image;
    let src = img.rgba8.as_slice();
    let (iw, ih) = (f64::from(img.width), f64::from(img.height));
    let (pw, ph) = (f64::from(p.width), f64::from(p.height));
    let inv_scale = 1.0 / scale.max(1e-9);

    let row_bytes = canvas.width as usize * 4;
    let x0 = p.x as usize * 4;
    let x1 = (p.x + p.width) as usize * 4;

    dst.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .skip(p.y as usize)
        .take(p.height as usize)
        .for_each(|(row_y, row)| {
            let v = (row_y as f64 - f64::from(p.y) + 0.5) / ph;
            let sy = ih * (0.5 + (v - 0.5) * inv_scale);
            for (i, px) in row[x0..x1].chunks_exact_mut(4).enumerate() {
                let u = (i as f64 + 0.5) / pw;
                let sx = iw * (0.5 + (u - 0.5) * inv_scale);
                let sample = sample_bilinear(src, img.width, img.height, sx, sy);
                blend_over_opaque(px, sample, alpha);
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
