//! Core types: the echoed message, tracing setup

pub mod message;
pub mod tracing;

pub use message::Message;
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
