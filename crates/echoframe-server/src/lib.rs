//! Echo server: TCP listener and per-connection echo loop.
//!
//! Every accepted connection runs on its own task and echoes each framed
//! message straight back until the peer closes. Connections share no state.
//!
//! # Example
//!
//! ```rust,no_run
//! use echoframe_server::{EchoServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = EchoServer::bind(ServerConfig::default()).await?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod echo;
mod error;
mod socket;

pub use config::{DEFAULT_PORT, ServerConfig, default_address};
pub use echo::{EchoStats, echo_loop, make_connection_handler};
pub use error::{ServerError, ServerResult};
pub use socket::{Connection, EchoServer};
