//! Augment domain module.
//!
//! Adds per-call authentication parameters and credential fallback logic to
//! Python MCP tool declarations.
//!
//! ## Architecture
//!
//! - `scanner.rs` - String/comment/bracket aware lexical scanning
//! - `declaration.rs` - Tool declaration discovery and body statements
//! - `templates.rs` - Per-service parameter block and fallback fragment
//! - `rewrite.rs` - The `augment` text transformation
//! - `service.rs` - In-place file augmentation
//! - `error.rs` - Non-fatal candidate errors

mod declaration;
mod error;
mod rewrite;
mod scanner;
mod service;
pub mod templates;

pub use error::AugmentError;
pub use rewrite::{Augmented, augment};
pub use service::augment_file;
pub use templates::Templates;
