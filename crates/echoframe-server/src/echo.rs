//! Per-connection echo loop.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{Instrument, debug, info, info_span, warn};

use echoframe_protocol::{FrameReader, FrameWriter};

use crate::error::ServerResult;
use crate::socket::Connection;

/// Counters for one finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoStats {
    /// Messages received and sent back.
    pub messages: u64,
}

/// Echoes every message read from `stream` back to it until the peer closes.
///
/// Returns `Ok` when the peer closes between messages. Any other failure,
/// including a malformed body, ends the session with an error; nothing more
/// is read from a stream whose framing can no longer be trusted.
pub async fn echo_loop<S>(stream: S, idle_timeout: Option<Duration>) -> ServerResult<EchoStats>
where
    S: AsyncRead + AsyncWrite,
{
    let (reader, writer) = tokio::io::split(stream);
    let mut reader = FrameReader::new(reader).with_idle_timeout(idle_timeout);
    let mut writer = FrameWriter::new(writer);
    let mut stats = EchoStats::default();

    while let Some(message) = reader.read_message().await? {
        debug!(
            string_field = %message.string_field,
            int_field = message.int_field,
            "echoing message"
        );
        writer.write_message(&message).await?;
        stats.messages += 1;
    }

    Ok(stats)
}

/// Creates the handler the listener spawns for each accepted connection.
pub fn make_connection_handler()
-> impl Fn(Connection) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static {
    move |conn| {
        let span = info_span!("connection", peer = %conn.peer_addr());
        Box::pin(
            async move {
                match conn.serve().await {
                    Ok(stats) => info!(messages = stats.messages, "Client disconnected"),
                    Err(e) => warn!(error = %e, "Connection aborted"),
                }
            }
            .instrument(span),
        )
    }
}
