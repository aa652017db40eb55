//! TCP client for the echo server.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;
use tracing::debug;

use echoframe_core::Message;
use echoframe_protocol::{ProtocolError, receive_message, send_message};

use crate::error::{ClientError, ClientResult};

/// Client that sends one message and waits for its echo.
pub struct EchoClient {
    address: SocketAddr,
    timeout: Duration,
}

impl EchoClient {
    /// Creates a new echo client.
    pub fn new(address: SocketAddr, timeout: Duration) -> Self {
        Self { address, timeout }
    }

    /// Creates a client for the default server address.
    pub fn with_defaults() -> Self {
        Self::new(echoframe_server::default_address(), Duration::from_secs(5))
    }

    /// Returns the server address.
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Sends `message` and returns what the server echoed back.
    pub async fn echo(&self, message: &Message) -> ClientResult<Message> {
        debug!(address = %self.address, "connecting to server");

        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.address))
            .await
            .map_err(|_| connect_timed_out(self.timeout))?
            .map_err(|e| {
                ClientError::Connection(format!("failed to connect to {}: {}", self.address, e))
            })?;

        tokio::time::timeout(self.timeout, send_message(&mut stream, message))
            .await
            .map_err(|_| ClientError::Timeout("sending message".into()))??;

        debug!("message sent, waiting for echo");

        let reply = tokio::time::timeout(self.timeout, receive_message(&mut stream))
            .await
            .map_err(|_| ClientError::Timeout("reading echo".into()))?;

        match reply {
            Ok(echoed) => Ok(echoed),
            Err(ProtocolError::ConnectionClosed) => Err(ClientError::Connection(
                "server closed the connection without replying".into(),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

fn connect_timed_out(timeout: Duration) -> ClientError {
    ClientError::Connection(format!("connection timed out after {:?}", timeout))
}
