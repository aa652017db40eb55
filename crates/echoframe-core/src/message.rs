//! The message exchanged between client and server.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A typed record carried in the body of every frame.
///
/// Both ends agree on this schema at build time: field order and types are
/// fixed, and nothing is negotiated on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Free-form text.
    pub string_field: String,
    /// A 32-bit signed integer.
    pub int_field: i32,
}

impl Message {
    /// Creates a new message.
    pub fn new(string_field: impl Into<String>, int_field: i32) -> Self {
        Self {
            string_field: string_field.into(),
            int_field,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message {{ string_field: {:?}, int_field: {} }}",
            self.string_field, self.int_field
        )
    }
}
