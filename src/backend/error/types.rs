use crate::shared::SharedError;
use thiserror::Error;

/// Backend-specific error types
///
/// Everything a document session can fail with: protocol errors raised by
/// the shared decode and merge paths, transport failures on the socket
/// itself, and serialization failures when encoding outbound messages.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Protocol error from the shared module (decode, merge, encode)
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// The WebSocket transport failed mid-session
    #[error("Socket error: {message}")]
    Socket {
        /// Human-readable error message
        message: String,
    },

    /// Serialization error outside the shared encode path
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new socket error
    pub fn socket(message: impl Into<String>) -> Self {
        Self::Socket {
            message: message.into(),
        }
    }
}
