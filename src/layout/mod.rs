//! Fitting slide images onto the canvas.

pub(crate) mod placement;
