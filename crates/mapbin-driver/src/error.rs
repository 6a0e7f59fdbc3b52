/// Errors that can occur while rendering a decoded map.
///
/// Decoded trees are always complete, so the only failure left at this
/// stage is the output encoder itself.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
