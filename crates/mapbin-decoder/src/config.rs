use std::time::Duration;

/// Limits applied while reading and decoding a map document.
///
/// ```text
/// ┌───────────────────┬─────────┬──────────────────────────────────────────┐
/// │ Field             │ Default │ Applies to                               │
/// ├───────────────────┼─────────┼──────────────────────────────────────────┤
/// │ max_depth         │ 256     │ node nesting, every decode               │
/// │ max_document_size │ 64 MiB  │ bytes pulled from an async source        │
/// │ max_decoded_bytes │ 256 MiB │ string bytes built by one decode         │
/// │ read_timeout      │ 30 s    │ whole async read, start to end of stream │
/// └───────────────────┴─────────┴──────────────────────────────────────────┘
/// ```
///
/// Real maps nest a few levels deep (`Map/levels/level/entities/…`), so
/// the depth default leaves plenty of headroom while bounding recursion
/// on crafted input. `max_decoded_bytes` covers what `max_document_size`
/// cannot: lookup references and run-length pairs expand, so a small
/// document can describe a very large tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub max_depth: usize,
    pub max_document_size: usize,
    pub max_decoded_bytes: usize,
    pub read_timeout: Duration,
}

impl DecoderConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;
    pub const DEFAULT_MAX_DECODED_BYTES: usize = 256 * 1024 * 1024;
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_document_size: Self::DEFAULT_MAX_DOCUMENT_SIZE,
            max_decoded_bytes: Self::DEFAULT_MAX_DECODED_BYTES,
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
        }
    }
}
