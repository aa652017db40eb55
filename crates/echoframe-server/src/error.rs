//! Server error types.

use std::io;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (bind, accept, ...).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Protocol error on a connection.
    #[error("Protocol error: {0}")]
    Protocol(#[from] echoframe_protocol::ProtocolError),
}
