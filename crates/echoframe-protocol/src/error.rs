//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while framing, reading or writing messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Underlying I/O failure (reset, broken pipe, ...). Never retried.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Peer closed the stream at a message boundary.
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// Peer closed the stream after a frame had started.
    #[error("incomplete message: expected {expected} bytes, got {received}")]
    IncompleteMessage { expected: usize, received: usize },

    /// Body bytes do not match the message schema.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Body length exceeds the maximum frame size.
    #[error("frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: u32 },

    /// No progress within the configured idle timeout.
    #[error("timeout during {operation}")]
    Timeout { operation: String },
}

impl ProtocolError {
    /// Returns true if this is the expected end of a session.
    pub fn is_clean_close(&self) -> bool {
        matches!(self, Self::ConnectionClosed)
    }

    pub(crate) fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }
}
