//! echoframe CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use echoframe_client::cli::{Cli, Command, ConfigAction};
use echoframe_client::config::ClientConfig;
use echoframe_client::error::{ClientError, ClientResult};
use echoframe_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let mut config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };

    // Command-line flags win over the config file
    if let Some(address) = cli.address {
        config.server.address = address;
    }
    if let Some(timeout) = cli.timeout {
        config.server.timeout = timeout;
    }
    config.debug |= cli.debug;

    let json_logs = matches!(cli.command, Command::Serve { json_logs: true, .. });
    let tracing_config = if config.debug {
        TracingConfig::cli_debug()
    } else if json_logs {
        TracingConfig::daemon()
    } else {
        TracingConfig::default()
    };
    init_tracing(tracing_config)
        .map_err(|e| ClientError::Config(format!("failed to initialize logging: {}", e)))?;

    match cli.command {
        Command::Serve { idle_timeout, .. } => {
            if idle_timeout.is_some() {
                config.server.idle_timeout = idle_timeout;
            }
            echoframe_client::commands::serve::run(&config).await
        }
        Command::Send { text, number } => {
            echoframe_client::commands::send::run(&config, text, number).await
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => echoframe_client::commands::config::dump(&config),
            ConfigAction::Path => echoframe_client::commands::config::path(),
        },
    }
}
