//! Augmenter error types.
//!
//! These never escape [`augment`](super::augment): a malformed candidate is
//! logged and skipped while the run continues.

use thiserror::Error;

use super::scanner::ScanError;

/// Reasons a declaration candidate cannot be augmented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AugmentError {
    /// The candidate does not follow the tool declaration convention.
    #[error("Malformed declaration at line {line}: {reason}")]
    MalformedDeclaration { line: usize, reason: String },
}

impl AugmentError {
    /// Create a new "malformed declaration" error.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn scan(line: usize, err: ScanError) -> Self {
        Self::malformed(line, err.to_string())
    }
}
