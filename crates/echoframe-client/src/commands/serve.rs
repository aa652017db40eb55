//! Serve command: runs the echo server in the foreground.

use tracing::{error, info};

use echoframe_server::EchoServer;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Binds the listener and echoes until Ctrl-C.
pub async fn run(config: &ClientConfig) -> ClientResult<()> {
    let server = EchoServer::bind(config.server.to_server_config()).await?;

    server
        .run_until_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
