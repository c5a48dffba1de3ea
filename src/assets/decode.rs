use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use rayon::prelude::*;

use crate::foundation::error::{SlidecastError, SlidecastResult};

/// A decoded slide image.
#[derive(Clone, Debug)]
pub struct SlideImage {
    /// Path the image was read from.
    pub source: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8, row-major, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

/// An input image that was dropped during decoding.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SkippedImage {
    /// Position in the input slide list.
    pub index: usize,
    /// Path that failed.
    pub source: PathBuf,
    /// Decoder error message.
    pub reason: String,
}

/// Decode an in-memory image into straight RGBA8.
pub fn decode_image(bytes: &[u8], source: &Path) -> SlidecastResult<SlideImage> {
    let dyn_img = image::load_from_memory(bytes)
        .with_context(|| format!("decode image '{}'", source.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(SlidecastError::invalid_input(format!(
            "image '{}' has zero dimensions",
            source.display()
        )));
    }
    Ok(SlideImage {
        source: source.to_path_buf(),
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

/// Read and decode one slide image from disk.
pub fn load_slide(path: &Path) -> SlidecastResult<SlideImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes, path)
}

/// Decode every path, keeping input order and dropping unreadable images.
///
/// Decoding runs on the rayon pool; each failure is logged and reported in the second vector.
pub fn load_slides(paths: &[PathBuf]) -> (Vec<SlideImage>, Vec<SkippedImage>) {
    let results: Vec<_> = paths.par_iter().map(|p| load_slide(p)).collect();

    let mut slides = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();
    for (index, (path, res)) in paths.iter().zip(results).enumerate() {
        match res {
            Ok(img) => slides.push(img),
            Err(e) => {
                tracing::warn!(index, path = %path.display(), error = %e, "skipping unreadable slide image");
                skipped.push(SkippedImage {
                    index,
                    source: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    (slides, skipped)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
