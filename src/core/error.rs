//! Error types and handling for the auth tooling.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, so the binary and embedding tool
//! servers can handle failures through a single type.

use thiserror::Error;

/// A specialized Result type for auth tooling operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the auth tooling.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the auth config builder.
    #[error("Auth configuration error: {0}")]
    Auth(#[from] crate::domains::auth::AuthConfigError),

    /// Error originating from the documentation generator.
    #[error("Documentation error: {0}")]
    Docs(#[from] crate::domains::docs::DocsError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from reading or writing source files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::{AuthConfigError, build_jira_config};

    fn build() -> Result<()> {
        build_jira_config("https://jira.acme.internal", "token", "saml", None, true)?;
        Ok(())
    }

    #[test]
    fn test_auth_error_converts() {
        let err = build().unwrap_err();
        assert!(matches!(
            err,
            Error::Auth(AuthConfigError::UnsupportedAuthType { .. })
        ));
        assert!(err.to_string().contains("saml"));
    }
}
