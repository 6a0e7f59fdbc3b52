use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::config::DecoderConfig;
use crate::decoder::{DecodedMap, MapDecoder};
use crate::error::DecodeError;

/// Read a whole map document from an async source, then decode it.
///
/// The map format has no length header, so the document is buffered in
/// full before decoding. The read is bounded two ways:
///
/// ```text
///   AsyncRead ──take(max_document_size + 1)──▶ Vec<u8> ──▶ MapDecoder
///        └──────────── timeout(read_timeout) ─────┘
/// ```
///
/// The reader is owned by this call and dropped on every exit path.
///
/// # Example
///
/// ```rust,no_run
/// use mapbin_decoder::{DecoderConfig, read_document};
///
/// async fn from_socket(sock: tokio::net::TcpStream) {
///     let decoded = read_document(sock, &DecoderConfig::default()).await;
///     // ...
/// }
/// ```
///
/// # Errors
///
/// - [`DecodeError::Timeout`] if the source does not reach EOF in time.
/// - [`DecodeError::DocumentTooLarge`] past `max_document_size` bytes.
/// - [`DecodeError::Io`] from the source.
/// - Any error from [`MapDecoder::decode`].
pub async fn read_document<R>(reader: R, config: &DecoderConfig) -> Result<DecodedMap, DecodeError>
where
    R: AsyncRead + Unpin,
{
    let bytes = tokio::time::timeout(
        config.read_timeout,
        read_limited(reader, config.max_document_size),
    )
    .await
    .map_err(|_| DecodeError::Timeout {
        after: config.read_timeout,
    })??;

    debug!(bytes = bytes.len(), "read map document");
    MapDecoder::with_config(config.clone()).decode(&bytes)
}

/// Open `path` and decode it with [`read_document`].
///
/// # Errors
///
/// [`DecodeError::Io`] if the file cannot be opened, plus every error of
/// [`read_document`].
pub async fn read_file(path: &Path, config: &DecoderConfig) -> Result<DecodedMap, DecodeError> {
    let file = tokio::fs::File::open(path).await?;
    read_document(file, config).await
}

async fn read_limited<R>(reader: R, limit: usize) -> Result<Vec<u8>, DecodeError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    // One byte past the limit tells "exactly at limit" from "over".
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    reader.take(cap).read_to_end(&mut buf).await?;
    if buf.len() > limit {
        return Err(DecodeError::DocumentTooLarge { limit });
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use mapbin_encoder::{MapEncoder, NodeBuilder, WireValue};
    use tokio::io::AsyncWriteExt;

    fn sample() -> Vec<u8> {
        MapEncoder::new("Async")
            .encode(&NodeBuilder::new("Map").child(NodeBuilder::new("levels").attr("n", WireValue::Short(-1))))
            .unwrap()
    }

    #[tokio::test]
    async fn reads_and_decodes_slice() {
        let bytes = sample();
        let decoded = read_document(bytes.as_slice(), &DecoderConfig::default())
            .await
            .unwrap();
        assert_eq!(decoded.header.package, "Async");
        assert_eq!(decoded.root.children[0].name, "levels");
    }

    #[tokio::test]
    async fn exact_size_limit_is_allowed() {
        let bytes = sample();
        let config = DecoderConfig {
            max_document_size: bytes.len(),
            ..DecoderConfig::default()
        };
        assert!(read_document(bytes.as_slice(), &config).await.is_ok());
    }

    #[tokio::test]
    async fn oversized_document_rejected() {
        let bytes = sample();
        let config = DecoderConfig {
            max_document_size: bytes.len() - 1,
            ..DecoderConfig::default()
        };
        let limit = config.max_document_size;
        assert!(matches!(
            read_document(bytes.as_slice(), &config).await,
            Err(DecodeError::DocumentTooLarge { limit: l }) if l == limit
        ));
    }

    #[tokio::test]
    async fn stalled_source_times_out() {
        let (mut tx, rx) = tokio::io::duplex(64);
        tx.write_all(&sample()[..4]).await.unwrap();
        let config = DecoderConfig {
            read_timeout: Duration::from_millis(50),
            ..DecoderConfig::default()
        };
        let result = read_document(rx, &config).await;
        assert!(matches!(result, Err(DecodeError::Timeout { .. })));
        drop(tx);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let result = read_file(
            Path::new("/nonexistent/map.bin"),
            &DecoderConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(DecodeError::Io(_))));
    }
}
