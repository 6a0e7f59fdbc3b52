use crate::error::DecodeError;

/// Running total of string bytes a single decode has produced.
///
/// Lookup-table references and run-length pairs let a few input bytes
/// stand for a large amount of output, so input size alone does not
/// bound memory. Every owned string the decoder builds (node names,
/// attribute names, string values) is charged here before it is
/// allocated.
///
/// ```text
///   5-byte child record ──▶ clone of a 1 MiB table entry
///   2-byte run-length pair ──▶ up to 255 chars (510 UTF-8 bytes)
/// ```
#[derive(Clone, Debug)]
pub struct DecodeBudget {
    limit: usize,
    used: usize,
}

impl DecodeBudget {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    /// A budget that never runs out.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    /// Record `bytes` more output.
    ///
    /// # Errors
    ///
    /// [`DecodeError::DecodedSizeExceeded`] if the total would pass the
    /// limit. Nothing is recorded in that case.
    pub fn charge(&mut self, bytes: usize) -> Result<(), DecodeError> {
        match self.used.checked_add(bytes) {
            Some(total) if total <= self.limit => {
                self.used = total;
                Ok(())
            }
            _ => Err(DecodeError::DecodedSizeExceeded { limit: self.limit }),
        }
    }

    /// Charge for `s` and return an owned copy.
    ///
    /// # Errors
    ///
    /// As [`charge`](Self::charge).
    pub fn owned(&mut self, s: &str) -> Result<String, DecodeError> {
        self.charge(s.len())?;
        Ok(s.to_owned())
    }

    #[must_use]
    pub fn used(&self) -> usize {
        self.used
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
