//! Narration + music bed mixing.

pub(crate) mod mix;
