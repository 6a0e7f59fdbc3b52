/// Implementation of `mapbin validate`.
///
/// Attempts a full decode and reports either a series of success
/// checkmarks (`✓`) or a single diagnostic failure line (`✗`). Exit code
/// is 0 on a valid file and 1 on any error.
///
/// # Success output
///
/// ```text
/// ✓ Header: CELESTE MAP (package "1-ForsakenCity")
/// ✓ String table: 412 entries
/// ✓ Tree: 18344 nodes, depth 5
/// ✓ Trailing: none
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: unknown attribute type 9 at offset 5121
/// ```
///
/// Trailing bytes after the root do not fail validation; they are
/// reported with a `!` line instead.
use anyhow::{Result, anyhow};
use mapbin_decoder::DecodeError;
use mapbin_wire::WireError;

use crate::ValidateArgs;
use crate::source::load;

/// Run the `mapbin validate` command.
///
/// # Errors
///
/// Returns an error if the runtime cannot start or the document fails to
/// decode.
pub fn run(args: &ValidateArgs) -> Result<()> {
    match load(&args.file, &args.limits.decoder_config())? {
        Ok(decoded) => {
            println!(
                "✓ Header: {} (package {:?})",
                decoded.header.tag, decoded.header.package
            );
            println!(
                "✓ String table: {} entr{}",
                decoded.lookup_len,
                if decoded.lookup_len == 1 { "y" } else { "ies" }
            );
            println!(
                "✓ Tree: {} nodes, depth {}",
                decoded.root.node_count(),
                decoded.root.depth()
            );
            if decoded.trailing_bytes == 0 {
                println!("✓ Trailing: none");
            } else {
                println!("! Trailing: {} unread bytes after root", decoded.trailing_bytes);
            }
            Ok(())
        }

        Err(e) => {
            println!("✗ Error: {}", decode_error_diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a human-readable diagnostic string.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────────────────┐
/// │ DecodeError variant      │ Diagnostic message prefix                │
/// ├──────────────────────────┼──────────────────────────────────────────┤
/// │ Wire(UnexpectedEof)      │ "truncated document: …"                  │
/// │ Wire(InvalidLookupIndex) │ "bad string reference: …"                │
/// │ DepthLimitExceeded       │ "tree too deep: …"                       │
/// │ Io                       │ "cannot read input: …"                   │
/// │ everything else          │ "<error Display>"                        │
/// └──────────────────────────┴──────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::Wire(inner @ WireError::UnexpectedEof { .. }) => {
            format!("truncated document: {inner}")
        }
        DecodeError::Wire(inner @ WireError::InvalidLookupIndex { .. }) => {
            format!("bad string reference: {inner}")
        }
        DecodeError::DepthLimitExceeded { .. } => format!("tree too deep: {e} (see --max-depth)"),
        DecodeError::DocumentTooLarge { .. } => format!("{e} (see --max-size)"),
        DecodeError::DecodedSizeExceeded { .. } => format!("{e} (see --max-decoded-size)"),
        DecodeError::Io(inner) => format!("cannot read input: {inner}"),
        other => other.to_string(),
    }
}
