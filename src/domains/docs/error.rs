//! Documentation generator error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating tool documentation.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The schema file could not be read.
    #[error("Cannot read tool schemas from '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The schema file is not a JSON array of tool descriptors.
    #[error("Invalid tool schemas in '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
