use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::foundation::error::{SlidecastError, SlidecastResult};

/// Shared cancellation flag for one render job.
///
/// Clones observe the same flag. The pipeline checks it between stages and after every encoded
/// frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Return `true` once [`CancelToken::cancel`] was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Fail with [`SlidecastError::Cancelled`] when cancellation was requested.
    pub fn check(&self) -> SlidecastResult<()> {
        if self.is_cancelled() {
            return Err(SlidecastError::Cancelled);
        }
        Ok(())
    }
}
