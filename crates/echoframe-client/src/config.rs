//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/echoframe/config.toml` by default. A missing file means
//! defaults; command-line flags override whatever the file says.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use echoframe_server::ServerConfig;

/// Configuration for echoframe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Server/connection settings.
    pub server: ServerSettings,
}

/// Server/connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the server listens on and the client connects to.
    pub address: SocketAddr,

    /// Client connect/read/write timeout in seconds.
    pub timeout: u64,

    /// Server-side idle timeout in seconds; unset waits forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_timeout: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: echoframe_server::default_address(),
            timeout: 5,
            idle_timeout: None,
        }
    }
}

impl ServerSettings {
    /// Client timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Builds the listener configuration.
    pub fn to_server_config(&self) -> ServerConfig {
        let config = ServerConfig::new(self.address);
        match self.idle_timeout {
            Some(secs) => config.with_idle_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("echoframe")
    }
}
