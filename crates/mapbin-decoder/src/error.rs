use std::time::Duration;

use mapbin_wire::WireError;

/// Errors that abort decoding of a map document.
///
/// Every variant is fatal to the whole document: the decoder never hands
/// back a partially built tree.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── Wire(WireError)       ← short read, bad varint, truncated string,
///   │                           invalid UTF-8, lookup index out of range
///   ├── UnknownAttributeType  ← attribute tag byte >= 8
///   ├── MalformedRunLength    ← run-length string with an odd byte length
///   ├── DepthLimitExceeded    ← nesting deeper than DecoderConfig::max_depth
///   ├── DecodedSizeExceeded   ← decoded strings larger than max_decoded_bytes
///   ├── DocumentTooLarge      ← async source longer than max_document_size
///   ├── Timeout               ← async source slower than read_timeout
///   └── Io(std::io::Error)    ← from the async reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A byte-level read failed.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The type tag of an attribute is not one of the eight known tags.
    ///
    /// Later bytes cannot be interpreted without knowing the payload
    /// width, so the attribute is never skipped.
    #[error("unknown attribute type {tag} at offset {offset}")]
    UnknownAttributeType { tag: u8, offset: usize },

    /// A run-length string declared an odd byte length, leaving half a
    /// `(count, code point)` pair.
    #[error("run-length string at offset {offset} has odd byte length {length}")]
    MalformedRunLength { length: u16, offset: usize },

    /// Nodes nest deeper than the configured limit.
    #[error("node nesting exceeds depth limit {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Names and string values built so far exceed the configured
    /// output budget.
    #[error("decoded strings exceed size limit of {limit} bytes")]
    DecodedSizeExceeded { limit: usize },

    /// The source produced more bytes than the configured limit.
    #[error("document exceeds size limit of {limit} bytes")]
    DocumentTooLarge { limit: usize },

    /// The source did not finish within the configured read timeout.
    #[error("reading document timed out after {after:?}")]
    Timeout { after: Duration },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
