/// Convenience result type used across slidecast.
pub type SlidecastResult<T> = Result<T, SlidecastError>;

/// Error taxonomy for a render job.
///
/// Only [`SlidecastError::MissingOptionalSource`] is recoverable: the audio mixer downgrades it to
/// a narration-only mix and it never escapes a render.
#[derive(thiserror::Error, Debug)]
pub enum SlidecastError {
    /// Rejected job or configuration (zero slides, non-positive duration, bad canvas, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The narration track is missing or cannot be decoded.
    #[error("missing source: {0}")]
    MissingSource(String),

    /// An optional source (background music) is missing or cannot be decoded.
    #[error("missing optional source: {0}")]
    MissingOptionalSource(String),

    /// No slide image survived decoding.
    #[error("no valid input: {0}")]
    NoValidInput(String),

    /// Codec or container failure while producing the output file.
    #[error("encoding error: {0:#}")]
    Encoding(#[source] anyhow::Error),

    /// The job observed its cancellation token.
    #[error("render cancelled before completion")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidecastError {
    /// Build a [`SlidecastError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`SlidecastError::MissingSource`] value.
    pub fn missing_source(msg: impl Into<String>) -> Self {
        Self::MissingSource(msg.into())
    }

    /// Build a [`SlidecastError::MissingOptionalSource`] value.
    pub fn missing_optional_source(msg: impl Into<String>) -> Self {
        Self::MissingOptionalSource(msg.into())
    }

    /// Build a [`SlidecastError::NoValidInput`] value.
    pub fn no_valid_input(msg: impl Into<String>) -> Self {
        Self::NoValidInput(msg.into())
    }

    /// Build a [`SlidecastError::Encoding`] value from a plain message.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(anyhow::anyhow!(msg.into()))
    }

    /// Wrap an underlying failure as an [`SlidecastError::Encoding`], keeping it as the source.
    pub fn encoding_from(err: impl Into<anyhow::Error>, msg: impl Into<String>) -> Self {
        Self::Encoding(err.into().context(msg.into()))
    }

    /// Return `true` for errors that abort the job (everything except optional sources).
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MissingOptionalSource(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
