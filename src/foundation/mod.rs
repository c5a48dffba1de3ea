//! Shared primitives: error taxonomy, canvas/frame-rate types, hashing and cancellation.

pub(crate) mod cancel;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
