use mapbin_wire::WireError;

/// Errors that can occur while writing a map payload.
///
/// Every limit here is a width limit of the wire format itself: a value
/// the format has no room to represent is refused rather than truncated.
///
/// ```text
///   EncodeError
///   ├── LookupTableFull       ← more than 65535 distinct strings
///   ├── TooManyAttributes     ← more than 255 attributes on one node
///   ├── TooManyChildren       ← more than 65535 children on one node
///   ├── StringTooLong         ← run-length body exceeds a u16 byte length
///   ├── UnencodableCodePoint  ← run-length string holds a char above U+00FF
///   ├── NotInterned           ← reference to a string missing from the table
///   └── Wire(WireError)       ← from mapbin-wire string writing
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("string lookup table is full ({count} entries)")]
    LookupTableFull { count: usize },

    #[error("node {node:?} has {count} attributes, limit is 255")]
    TooManyAttributes { node: String, count: usize },

    #[error("node {node:?} has {count} children, limit is 65535")]
    TooManyChildren { node: String, count: usize },

    #[error("run-length string needs {length} bytes, limit is 65535")]
    StringTooLong { length: usize },

    #[error("code point {code_point:?} cannot be run-length encoded (above U+00FF)")]
    UnencodableCodePoint { code_point: char },

    /// A name or lookup value was written before it was added to the
    /// string table.
    #[error("string {value:?} is not in the lookup table")]
    NotInterned { value: String },

    #[error(transparent)]
    Wire(#[from] WireError),
}
