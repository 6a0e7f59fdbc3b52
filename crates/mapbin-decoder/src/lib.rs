#![warn(clippy::pedantic)]

pub mod attribute;
pub mod budget;
pub mod config;
pub mod decoder;
pub mod error;
pub mod streaming;

pub use budget::DecodeBudget;
pub use config::DecoderConfig;
pub use decoder::{DecodedMap, MapDecoder, decode_or_report};
pub use error::DecodeError;
pub use streaming::{read_document, read_file};
