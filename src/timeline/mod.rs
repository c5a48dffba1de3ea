//! Splitting the narration duration across slides and caption lines.

pub(crate) mod allocate;
pub(crate) mod captions;
