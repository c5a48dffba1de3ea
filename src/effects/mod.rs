//! Per-slide fades, the background gradient and pixel blending.

pub(crate) mod background;
pub(crate) mod composite;
pub(crate) mod transitions;
