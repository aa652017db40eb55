//! Client error types.

use std::fmt;

use echoframe_protocol::ProtocolError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// Connection to server failed.
    Connection(String),
    /// Protocol/framing error.
    Protocol(ProtocolError),
    /// Request timed out.
    Timeout(String),
    /// Server failed to start or stopped with an error.
    Server(echoframe_server::ServerError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Connection(msg) => write!(f, "connection error: {}", msg),
            Self::Protocol(err) => write!(f, "protocol error: {}", err),
            Self::Timeout(msg) => write!(f, "timeout: {}", msg),
            Self::Server(err) => write!(f, "server error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Protocol(err) => Some(err),
            Self::Server(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err)
    }
}

impl From<echoframe_server::ServerError> for ClientError {
    fn from(err: echoframe_server::ServerError) -> Self {
        Self::Server(err)
    }
}
