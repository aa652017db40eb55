//! TCP listener for the echo server.
//!
//! Accepts connections and hands each one to its own task, so a slow or
//! broken peer never holds up the accept loop or any other connection.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::echo::{EchoStats, echo_loop, make_connection_handler};
use crate::error::{ServerError, ServerResult};

/// Pause after a failed accept so a persistent error (EMFILE, ...) does not
/// spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// TCP server that echoes framed messages.
pub struct EchoServer {
    /// Server configuration.
    config: ServerConfig,
    /// Bound listener.
    listener: TcpListener,
}

impl EchoServer {
    /// Binds to the address in `config`.
    ///
    /// Port 0 picks an ephemeral port; see [`EchoServer::local_addr`].
    pub async fn bind(config: ServerConfig) -> ServerResult<Self> {
        let listener = TcpListener::bind(config.address).await?;
        info!(address = %listener.local_addr()?, "Echo server listening");

        Ok(Self { config, listener })
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts a single connection.
    pub async fn accept(&self) -> ServerResult<Connection> {
        let (stream, peer) = self.listener.accept().await?;
        debug!(peer = %peer, "Accepted new connection");

        Ok(Connection {
            stream,
            peer,
            idle_timeout: self.config.idle_timeout,
        })
    }

    /// Runs the accept loop forever, echoing on every connection.
    pub async fn run(&self) -> ServerResult<()> {
        self.run_with(make_connection_handler()).await
    }

    /// Runs the accept loop, spawning `handler` for each connection.
    ///
    /// Accept errors are logged and the loop carries on.
    pub async fn run_with<F, Fut>(&self, handler: F) -> ServerResult<()>
    where
        F: Fn(Connection) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        loop {
            match self.accept().await {
                Ok(connection) => {
                    tokio::spawn(handler(connection));
                }
                Err(e) => accept_failed(&e).await,
            }
        }
    }

    /// Runs the accept loop until `shutdown` completes.
    ///
    /// Connections already being served keep running on their own tasks.
    pub async fn run_until_shutdown<S>(&self, shutdown: S) -> ServerResult<()>
    where
        S: Future<Output = ()> + Send,
    {
        tokio::select! {
            result = self.run() => result,
            _ = shutdown => {
                info!("Shutdown signal received");
                Ok(())
            }
        }
    }
}

async fn accept_failed(e: &ServerError) {
    error!(error = %e, "Failed to accept connection");
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}

/// An accepted client connection.
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    idle_timeout: Option<Duration>,
}

impl Connection {
    /// Returns the remote address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Echoes messages until the peer disconnects.
    pub async fn serve(self) -> ServerResult<EchoStats> {
        echo_loop(self.stream, self.idle_timeout).await
    }
}
