//! Front-loaded IO: slide images, narration/music PCM and music selection.

pub(crate) mod decode;
pub(crate) mod media;
pub(crate) mod music;
