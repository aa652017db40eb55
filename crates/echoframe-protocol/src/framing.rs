//! Length-prefixed message framing.
//!
//! Every message travels as a 4-byte big-endian length prefix followed by
//! the JSON body:
//!
//! ```text
//! +----------------+------------------+
//! | length (4 BE)  |  JSON body       |
//! +----------------+------------------+
//! ```

use echoframe_core::Message;

use crate::error::{ProtocolError, ProtocolResult};
use crate::{HEADER_SIZE, MAX_MESSAGE_SIZE};

/// One encoded message: header and body, transmittable separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Body length in network byte order.
    pub header: [u8; HEADER_SIZE],
    /// Serialized message.
    pub body: Vec<u8>,
}

impl Frame {
    /// Concatenates header and body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(HEADER_SIZE + self.body.len());
        buffer.extend_from_slice(&self.header);
        buffer.extend_from_slice(&self.body);
        buffer
    }
}

/// Interprets a header as the body length.
pub fn header_length(header: [u8; HEADER_SIZE]) -> u32 {
    u32::from_be_bytes(header)
}

/// Checks a body length against [`MAX_MESSAGE_SIZE`].
pub(crate) fn check_length(size: usize) -> ProtocolResult<u32> {
    match u32::try_from(size) {
        Ok(len) if len <= MAX_MESSAGE_SIZE => Ok(len),
        _ => Err(ProtocolError::FrameTooLarge {
            size,
            max: MAX_MESSAGE_SIZE,
        }),
    }
}

/// Encodes a message into a header and a body.
///
/// # Example
///
/// ```rust
/// use echoframe_core::Message;
/// use echoframe_protocol::{encode_frame, header_length};
///
/// let frame = encode_frame(&Message::new("I'm here", 404)).unwrap();
/// assert_eq!(header_length(frame.header) as usize, frame.body.len());
/// ```
pub fn encode_frame(message: &Message) -> ProtocolResult<Frame> {
    let body = serde_json::to_vec(message)?;
    let len = check_length(body.len())?;

    Ok(Frame {
        header: len.to_be_bytes(),
        body,
    })
}

/// Decodes a body produced by [`encode_frame`].
pub fn decode_body(body: &[u8]) -> ProtocolResult<Message> {
    Ok(serde_json::from_slice(body)?)
}

/// Encodes a message to one contiguous buffer, prefix included.
pub fn encode_message(message: &Message) -> ProtocolResult<Vec<u8>> {
    Ok(encode_frame(message)?.to_bytes())
}

/// Decodes a complete framed message (prefix + body) from a buffer.
///
/// Bytes past the announced body length are ignored.
///
/// # Example
///
/// ```rust
/// use echoframe_core::Message;
/// use echoframe_protocol::{decode_message, encode_message};
///
/// let bytes = encode_message(&Message::new("ping", 1)).unwrap();
/// let decoded = decode_message(&bytes).unwrap();
/// assert_eq!(decoded.string_field, "ping");
/// ```
pub fn decode_message(data: &[u8]) -> ProtocolResult<Message> {
    let Some((header, rest)) = data.split_first_chunk::<HEADER_SIZE>() else {
        return Err(ProtocolError::IncompleteMessage {
            expected: HEADER_SIZE,
            received: data.len(),
        });
    };

    let len = header_length(*header) as usize;
    check_length(len)?;

    if rest.len() < len {
        return Err(ProtocolError::IncompleteMessage {
            expected: HEADER_SIZE + len,
            received: data.len(),
        });
    }

    decode_body(&rest[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Message> {
        vec![
            Message::new("I'm here", 404),
            Message::new("", 0),
            Message::new("négatif ✓", i32::MIN),
            Message::new("line\nbreak\t\"quote\" \\", i32::MAX),
            Message::new("x".repeat(10_000), -1),
        ]
    }

    #[test]
    fn round_trip_preserves_fields() {
        for msg in samples() {
            let frame = encode_frame(&msg).unwrap();
            let decoded = decode_body(&frame.body).unwrap();
            assert_eq!(decoded, msg);
            assert_eq!(decoded.string_field.as_bytes(), msg.string_field.as_bytes());
        }
    }

    #[test]
    fn header_matches_body_length() {
        for msg in samples() {
            let frame = encode_frame(&msg).unwrap();
            assert_eq!(header_length(frame.header) as usize, frame.body.len());
        }
    }

    #[test]
    fn header_is_big_endian() {
        let frame = encode_frame(&Message::new("I'm here", 404)).unwrap();
        let len = frame.body.len() as u32;
        assert_eq!(frame.header, [0, 0, (len >> 8) as u8, len as u8]);
    }

    #[test]
    fn body_wire_format() {
        let frame = encode_frame(&Message::new("I'm here", 404)).unwrap();
        let body = String::from_utf8(frame.body).unwrap();
        insta::assert_snapshot!(body, @r#"{"string_field":"I'm here","int_field":404}"#);
    }

    #[test]
    fn to_bytes_concatenates_header_and_body() {
        let frame = encode_frame(&Message::new("abc", 7)).unwrap();
        let bytes = frame.to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE + frame.body.len());
        assert_eq!(&bytes[..HEADER_SIZE], &frame.header);
        assert_eq!(&bytes[HEADER_SIZE..], frame.body.as_slice());
    }

    #[test]
    fn oversized_body_is_rejected() {
        let msg = Message::new("y".repeat(MAX_MESSAGE_SIZE as usize), 1);
        let result = encode_frame(&msg);
        assert!(matches!(result, Err(ProtocolError::FrameTooLarge { .. })));
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        let cases: [&[u8]; 6] = [
            b"",
            b"not json",
            b"{\"string_field\":\"x\"",
            b"{\"string_field\":\"x\"}",
            b"{\"string_field\":1,\"int_field\":2}",
            &[0xff, 0xfe, 0x00],
        ];
        for body in cases {
            let result = decode_body(body);
            assert!(
                matches!(result, Err(ProtocolError::MalformedPayload(_))),
                "expected malformed payload for {:?}",
                body
            );
        }
    }

    #[test]
    fn decode_message_incomplete_header() {
        let result = decode_message(&[0, 0]);
        assert!(matches!(
            result,
            Err(ProtocolError::IncompleteMessage {
                expected: 4,
                received: 2
            })
        ));
    }

    #[test]
    fn decode_message_incomplete_body() {
        let mut data = vec![0, 0, 0, 100];
        data.extend_from_slice(&[b' '; 10]);

        let result = decode_message(&data);
        assert!(matches!(
            result,
            Err(ProtocolError::IncompleteMessage {
                expected: 104,
                received: 14
            })
        ));
    }

    #[test]
    fn decode_message_rejects_huge_header() {
        let data = (MAX_MESSAGE_SIZE + 1).to_be_bytes();
        let result = decode_message(&data);
        assert!(matches!(result, Err(ProtocolError::FrameTooLarge { .. })));
    }

    #[test]
    fn decode_message_roundtrip() {
        let msg = Message::new("I'm here", 404);
        let mut bytes = encode_message(&msg).unwrap();
        bytes.extend_from_slice(b"trailing");
        assert_eq!(decode_message(&bytes).unwrap(), msg);
    }
}
