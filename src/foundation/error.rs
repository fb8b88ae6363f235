/// Convenience result type used across stillreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by render and job APIs.
///
/// Degenerate geometry is deliberately absent: paste helpers report "nothing drawn" and the frame
/// loop keeps going.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid caller-provided options or phase data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source, background or audio input could not be obtained or decoded.
    #[error("input unavailable: {0}")]
    InputUnavailable(String),

    /// The frame encoder could not be opened, written to, or finalized.
    #[error("encode error: {0}")]
    Encode(String),

    /// A collaborator step (stylize, cinematic pass, audio mux, upload, probe) failed.
    #[error("external step failed: {0}")]
    External(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::InputUnavailable`] value.
    pub fn input_unavailable(msg: impl Into<String>) -> Self {
        Self::InputUnavailable(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::External`] value.
    pub fn external(msg: impl Into<String>) -> Self {
        Self::External(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for failures that must abort a render before or during the frame loop.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::External(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
