#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;
pub mod node_writer;

pub use encoder::{MapEncoder, NodeBuilder, WireValue};
pub use error::EncodeError;
pub use node_writer::{NodeWriter, StringInterner};
