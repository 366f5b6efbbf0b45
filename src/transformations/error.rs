//! Transformation error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Invalid enqueued timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Unexpected payload shape for {event}: {message}")]
    UnexpectedShape { event: String, message: String },
}

impl TransformError {
    /// Create a shape error with event context.
    pub fn shape(event: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            event: event.into(),
            message: message.into(),
        }
    }
}
