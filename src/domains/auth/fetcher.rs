//! Fetcher selection.
//!
//! A tool call either brings its own credentials (URL, token and type all
//! present) and gets a call-scoped fetcher, or falls back to the fetcher
//! cached for the session. The session is an explicit handle supplied by the
//! caller; lookup-or-create semantics belong to the provider.

use tracing::debug;

use super::builder::build_config;
use super::error::AuthConfigError;
use super::params::AuthParams;
use super::types::AuthConfig;
use crate::core::Service;

/// Downstream collaborator that constructs fetchers.
pub trait FetcherProvider {
    /// Authenticated API client handle.
    type Fetcher;

    /// Create a call-scoped fetcher from a freshly built configuration.
    fn from_config(&self, config: AuthConfig) -> Self::Fetcher;

    /// Look up (or create) the session-scoped fetcher for `service`.
    fn session_fetcher(&self, service: Service) -> Result<Self::Fetcher, AuthConfigError>;
}

/// Build a call-scoped configuration if the params carry explicit credentials.
///
/// Returns `Ok(None)` when URL, token or type is missing, meaning the caller
/// should use its session fetcher.
pub fn explicit_config(
    service: Service,
    params: &AuthParams,
) -> Result<Option<AuthConfig>, AuthConfigError> {
    let Some((url, token, auth_type)) = params.explicit_triple() else {
        return Ok(None);
    };
    build_config(
        service,
        url,
        token,
        auth_type,
        params.username.as_deref(),
        true,
    )
    .map(Some)
}

/// Pick the fetcher for one tool call.
pub fn acquire_fetcher<P: FetcherProvider>(
    provider: &P,
    service: Service,
    params: &AuthParams,
) -> Result<P::Fetcher, AuthConfigError> {
    match explicit_config(service, params)? {
        Some(config) => {
            debug!("Using call-scoped {} credentials", service.display_name());
            Ok(provider.from_config(config))
        }
        None => {
            debug!("Using session {} fetcher", service.display_name());
            provider.session_fetcher(service)
        }
    }
}
