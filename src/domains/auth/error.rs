//! Auth configuration error types.

use thiserror::Error;

/// Errors that can occur while building an authentication configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthConfigError {
    /// A field required by the chosen auth type is missing or empty.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The auth type is outside the supported set.
    #[error("Unsupported auth_type: {value}. Must be 'oauth', 'pat', or 'basic'")]
    UnsupportedAuthType { value: String },
}

impl AuthConfigError {
    /// Create a new "invalid configuration" error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a new "unsupported auth type" error.
    pub fn unsupported(value: impl Into<String>) -> Self {
        Self::UnsupportedAuthType {
            value: value.into(),
        }
    }
}
