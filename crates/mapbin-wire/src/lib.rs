#![warn(clippy::pedantic)]

pub mod error;
pub mod header;
pub mod lookup;
pub mod reader;
pub mod varint;

pub use error::WireError;
pub use header::MapHeader;
pub use lookup::StringLookupTable;
pub use reader::ByteReader;
