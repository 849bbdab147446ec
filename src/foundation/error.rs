/// Convenience result type used across photoframe.
pub type FrameResult<T> = Result<T, FrameError>;

/// Top-level error taxonomy used by the compositor, exporter and editor session.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// Invalid user-provided data: config values, frame or surface sizes.
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoded image bytes could not be turned into pixels.
    #[error("decode error: {0}")]
    Decode(String),

    /// An export was requested before any subject image was loaded.
    #[error("no subject image loaded")]
    MissingSubject,

    /// Rendered pixels could not be encoded as PNG.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing config and scripts.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameError {
    /// Build a [`FrameError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FrameError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FrameError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True when the error is the recoverable "nothing to export" case.
    pub fn is_missing_subject(&self) -> bool {
        matches!(self, Self::MissingSubject)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
