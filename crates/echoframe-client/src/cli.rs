//! Command-line interface definition.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// echoframe - length-prefixed message echo over TCP
#[derive(Debug, Parser)]
#[command(name = "echoframe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ECHOFRAME_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Server address (overrides the config file)
    #[arg(long, short, env = "ECHOFRAME_ADDRESS", global = true)]
    pub address: Option<SocketAddr>,

    /// Client timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the echo server in the foreground until Ctrl-C
    Serve {
        /// Log JSON lines instead of human-readable output
        #[arg(long)]
        json_logs: bool,

        /// Drop connections idle for this many seconds
        #[arg(long)]
        idle_timeout: Option<u64>,
    },

    /// Send one message and print the echo
    Send {
        /// Text field of the message
        #[arg(long, default_value = "I'm here")]
        text: String,

        /// Integer field of the message
        #[arg(long, default_value_t = 404, allow_negative_numbers = true)]
        number: i32,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
