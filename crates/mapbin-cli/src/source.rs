/// Input loading shared by every sub-command.
///
/// Files and stdin are both read through `mapbin_decoder::read_document`,
/// so the size cap and read timeout from `LimitArgs` apply to either.
/// The async reader runs on a single-threaded tokio runtime built per
/// invocation.
use std::path::Path;

use anyhow::{Context, Result};
use mapbin_decoder::{DecodeError, DecodedMap, DecoderConfig, read_document, read_file};
use tracing::debug;

/// Display name for log and error messages.
pub fn display_name(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read and decode `path` (or stdin for `-`).
///
/// The outer `Result` covers runtime setup; the inner one is the decode
/// outcome, kept separate so `validate` can report it as a diagnostic.
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created.
pub fn load(path: &Path, config: &DecoderConfig) -> Result<Result<DecodedMap, DecodeError>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start I/O runtime")?;

    debug!(
        source = %display_name(path),
        max_depth = config.max_depth,
        max_size = config.max_document_size,
        max_decoded = config.max_decoded_bytes,
        "loading map"
    );

    let outcome = runtime.block_on(async {
        if is_stdin(path) {
            read_document(tokio::io::stdin(), config).await
        } else {
            read_file(path, config).await
        }
    });
    Ok(outcome)
}

/// [`load`], with a decode failure turned into a contextual error.
///
/// # Errors
///
/// Runtime setup, I/O, limit, or decode failures.
pub fn load_or_fail(path: &Path, config: &DecoderConfig) -> Result<DecodedMap> {
    load(path, config)?.with_context(|| format!("failed to decode {}", display_name(path)))
}
