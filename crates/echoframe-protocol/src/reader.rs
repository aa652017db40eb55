//! Reliable reads and framed message I/O over async byte streams.
//!
//! A stream socket may hand back any number of bytes per read, so every
//! frame is assembled here by looping until the exact count is available.
//!
//! Closure policy:
//! - zero bytes at the start of a header: [`ProtocolError::ConnectionClosed`]
//! - zero bytes after a frame started (mid-header or anywhere in the body):
//!   [`ProtocolError::IncompleteMessage`], with counts covering the whole frame

use std::io::ErrorKind;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use echoframe_core::Message;

use crate::HEADER_SIZE;
use crate::error::{ProtocolError, ProtocolResult};
use crate::framing::{check_length, decode_body, encode_frame, header_length};

/// Reads exactly `n` bytes from `source`.
///
/// Fails with `ConnectionClosed` if the stream ends before any byte arrives,
/// and with `IncompleteMessage` if it ends after some bytes did.
pub async fn read_exact<R>(source: &mut R, n: usize) -> ProtocolResult<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    read_exact_with_timeout(source, n, None).await
}

/// Same as [`read_exact`], but fails with `Timeout` when a single read
/// brings no data for `idle_timeout`. The clock restarts on every read.
pub async fn read_exact_with_timeout<R>(
    source: &mut R,
    n: usize,
    idle_timeout: Option<Duration>,
) -> ProtocolResult<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buffer = vec![0u8; n];
    let mut filled = 0;

    while filled < n {
        let read = source.read(&mut buffer[filled..]);
        let outcome = match idle_timeout {
            Some(timeout) => tokio::time::timeout(timeout, read)
                .await
                .map_err(|_| ProtocolError::timeout("read"))?,
            None => read.await,
        };

        let received = match outcome {
            Ok(received) => received,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ProtocolError::Transport(e)),
        };

        if received == 0 {
            return Err(if filled == 0 {
                ProtocolError::ConnectionClosed
            } else {
                ProtocolError::IncompleteMessage {
                    expected: n,
                    received: filled,
                }
            });
        }

        filled += received;
        trace!(received, filled, wanted = n, "partial read");
    }

    Ok(buffer)
}

/// Reads one complete message: header, then exactly that many body bytes.
pub async fn receive_message<R>(source: &mut R) -> ProtocolResult<Message>
where
    R: AsyncRead + Unpin + ?Sized,
{
    receive_message_with_timeout(source, None).await
}

/// Same as [`receive_message`], with the idle timeout applied to each read.
pub async fn receive_message_with_timeout<R>(
    source: &mut R,
    idle_timeout: Option<Duration>,
) -> ProtocolResult<Message>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let header = read_exact_with_timeout(source, HEADER_SIZE, idle_timeout).await?;

    let mut prefix = [0u8; HEADER_SIZE];
    prefix.copy_from_slice(&header);
    let len = header_length(prefix) as usize;
    check_length(len)?;

    let body = read_exact_with_timeout(source, len, idle_timeout)
        .await
        .map_err(|e| match e {
            ProtocolError::ConnectionClosed => ProtocolError::IncompleteMessage {
                expected: HEADER_SIZE + len,
                received: HEADER_SIZE,
            },
            ProtocolError::IncompleteMessage { received, .. } => {
                ProtocolError::IncompleteMessage {
                    expected: HEADER_SIZE + len,
                    received: HEADER_SIZE + received,
                }
            }
            other => other,
        })?;

    decode_body(&body)
}

/// Encodes a message and writes its header then its body.
pub async fn send_message<W>(sink: &mut W, message: &Message) -> ProtocolResult<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let frame = encode_frame(message)?;
    sink.write_all(&frame.header).await?;
    sink.write_all(&frame.body).await?;
    sink.flush().await?;
    Ok(())
}

/// Reads framed messages from a byte stream.
pub struct FrameReader<R> {
    reader: R,
    idle_timeout: Option<Duration>,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Creates a new FrameReader wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            idle_timeout: None,
        }
    }

    /// Builder: abort when no bytes arrive for `timeout`.
    ///
    /// The clock restarts whenever data arrives, so a slow but steady peer
    /// is never cut off mid-frame.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Reads a single framed message.
    ///
    /// Returns `Ok(None)` if the peer closed the stream between messages.
    pub async fn read_message(&mut self) -> ProtocolResult<Option<Message>> {
        match receive_message_with_timeout(&mut self.reader, self.idle_timeout).await {
            Ok(message) => Ok(Some(message)),
            Err(ProtocolError::ConnectionClosed) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Returns a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Unwraps this FrameReader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Writes framed messages to a byte stream.
pub struct FrameWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    /// Creates a new FrameWriter wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a single framed message and flushes it.
    pub async fn write_message(&mut self, message: &Message) -> ProtocolResult<()> {
        send_message(&mut self.writer, message).await
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwraps this FrameWriter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
