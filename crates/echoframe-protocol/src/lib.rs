//! Framing protocol for echoframe.
//!
//! # Wire Format
//!
//! Each message is one frame:
//! - 4 bytes: body length (u32, big-endian)
//! - N bytes: JSON body `{"string_field": ..., "int_field": ...}`
//!
//! The schema is fixed at build time; there is no version field and no
//! negotiation.
//!
//! # Example
//!
//! ```rust
//! use echoframe_core::Message;
//! use echoframe_protocol::{decode_body, encode_frame};
//!
//! let frame = encode_frame(&Message::new("I'm here", 404)).unwrap();
//! let decoded = decode_body(&frame.body).unwrap();
//! assert_eq!(decoded.int_field, 404);
//! ```

mod error;
mod framing;
mod reader;

pub use error::{ProtocolError, ProtocolResult};
pub use framing::{
    Frame, decode_body, decode_message, encode_frame, encode_message, header_length,
};
pub use reader::{
    FrameReader, FrameWriter, read_exact, read_exact_with_timeout, receive_message,
    receive_message_with_timeout, send_message,
};

/// Size of the length prefix.
pub const HEADER_SIZE: usize = 4;

/// Maximum body size (1 MB).
pub const MAX_MESSAGE_SIZE: u32 = 1024 * 1024;
