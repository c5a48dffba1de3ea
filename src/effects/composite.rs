use crate::foundation::math::mul_div255_u16;

/// Blend a straight-alpha source pixel over an opaque destination pixel.
///
/// `opacity` scales the source alpha (the slide's fade). The result stays opaque.
pub fn blend_over_opaque(dst: &mut [u8], src: [u8; 4], opacity: f32) {
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    let a = mul_div255_u16(u16::from(src[3]), op);
    if a == 0 {
        return;
    }
    if a == 255 {
        dst[..3].copy_from_slice(&src[..3]);
        dst[3] = 255;
        return;
    }
    let inv = 255 - a;
    for i in 0..3 {
        let v = mul_div255_u16(u16::from(src[i]), a) + mul_div255_u16(u16::from(dst[i]), inv);
        dst[i] = v.min(255) as u8;
    }
    dst[3] = 255;
}

/// Bilinearly sample a straight-alpha RGBA8 image at continuous pixel coordinates.
///
/// Pixel centres sit at `i + 0.5`; coordinates outside the image clamp to the edge.
pub fn sample_bilinear(rgba: &[u8], width: u32, height: u32, x: f64, y: f64) -> [u8; 4] {
    let fx = (x - 0.5).clamp(0.0, f64::from(width.saturating_sub(1)));
    let fy = (y - 0.5).clamp(0.0, f64::from(height.saturating_sub(1)));
    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(width.saturating_sub(1));
    let y1 = (y0 + 1).min(height.saturating_sub(1));
    let tx = fx - f64::from(x0);
    let ty = fy - f64::from(y0);

    let px = |xx: u32, yy: u32| -> &[u8] {
        let i = (yy as usize * width as usize + xx as usize) * 4;
        &rgba[i..i + 4]
    };
    let (p00, p10, p01, p11) = (px(x0, y0), px(x1, y0), px(x0, y1), px(x1, y1));

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) + (f64::from(p10[c]) - f64::from(p00[c])) * tx;
        let bottom = f64::from(p01[c]) + (f64::from(p11[c]) - f64::from(p01[c])) * tx;
        out[c] = (top + (bottom - top) * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
