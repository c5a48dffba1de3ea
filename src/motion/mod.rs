//! Ken Burns zoom motion for still slides.

pub(crate) mod ken_burns;
