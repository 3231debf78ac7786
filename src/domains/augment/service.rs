//! File-level augmentation.
//!
//! Reads a Python module, augments it, and writes it back in place. The
//! caller is responsible for serializing concurrent runs on the same file.

use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use super::rewrite::{Augmented, augment};
use crate::core::{Result, Service};

/// Augment the tool declarations in the file at `path`.
///
/// The file is only rewritten when at least one declaration changed.
#[instrument(skip_all, fields(path = %path.display(), service = %service))]
pub fn augment_file(path: &Path, service: Service) -> Result<Augmented> {
    let source = fs::read_to_string(path)?;
    let result = augment(&source, service);

    if result.is_unchanged() {
        info!("No declarations to augment");
    } else {
        fs::write(path, &result.text)?;
        info!("Wrote {} augmented declaration(s)", result.modified.len());
    }

    Ok(result)
}
