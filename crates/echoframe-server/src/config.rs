//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 9000;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub address: SocketAddr,

    /// Abort a connection whose peer sends nothing for this long.
    ///
    /// `None` waits forever, so a stalled peer keeps its task alive until the
    /// process exits.
    pub idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            idle_timeout: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new server configuration with the given address.
    pub fn new(address: impl Into<SocketAddr>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Builder: set the idle timeout.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }
}

/// Returns the default listen address, `127.0.0.1:9000`.
pub fn default_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.address.to_string(), "127.0.0.1:9000");
        assert!(config.idle_timeout.is_none());
    }

    #[test]
    fn custom_config() {
        let config = ServerConfig::new(([0, 0, 0, 0], 7000))
            .with_idle_timeout(Duration::from_secs(60));

        assert_eq!(config.address.port(), 7000);
        assert!(config.address.ip().is_unspecified());
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(60)));
    }
}
