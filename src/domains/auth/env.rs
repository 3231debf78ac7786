//! Environment credential resolution.
//!
//! Session-scoped fetchers are configured from environment variables. This
//! is the calling-code side of the builder contract: values are resolved
//! here and handed to [`build_config`] as explicit arguments.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `{S}_URL` | instance URL |
//! | `{S}_USERNAME` + `{S}_API_TOKEN` | basic auth |
//! | `{S}_PERSONAL_TOKEN` | personal access token |
//! | `ATLASSIAN_OAUTH_ACCESS_TOKEN` | bring-your-own OAuth token |
//! | `{S}_SSL_VERIFY` | `false`, `0` or `no` disables verification |
//!
//! `{S}` is `JIRA` or `CONFLUENCE`.

use tracing::debug;

use super::builder::build_config;
use super::error::AuthConfigError;
use super::types::{AuthConfig, AuthType, is_cloud_url};
use crate::core::Service;

/// Shared OAuth access token variable.
pub const OAUTH_ACCESS_TOKEN_VAR: &str = "ATLASSIAN_OAUTH_ACCESS_TOKEN";

/// Resolve a configuration from the process environment (and `.env`).
pub fn config_from_env(service: Service) -> Result<AuthConfig, AuthConfigError> {
    dotenvy::dotenv().ok();
    config_from_lookup(service, |key| std::env::var(key).ok())
}

/// Resolve a configuration using `lookup` for variable values.
///
/// Cloud URLs prefer basic auth over a personal token; Server/Data Center
/// URLs prefer the personal token. The OAuth token is used only when neither
/// is configured.
pub fn config_from_lookup<F>(service: Service, lookup: F) -> Result<AuthConfig, AuthConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = service.env_prefix();
    let var = |suffix: &str| lookup(&format!("{}_{}", prefix, suffix)).filter(|v| !v.is_empty());

    let url = var("URL")
        .ok_or_else(|| AuthConfigError::invalid(format!("{}_URL is not set", prefix)))?;
    let ssl_verify = var("SSL_VERIFY")
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
        .unwrap_or(true);

    let basic = var("USERNAME").zip(var("API_TOKEN"));
    let pat = var("PERSONAL_TOKEN");
    let oauth = lookup(OAUTH_ACCESS_TOKEN_VAR).filter(|v| !v.is_empty());

    let (auth_type, token, username) = match (basic, pat) {
        (Some((username, token)), _) if is_cloud_url(&url) => (AuthType::Basic, token, Some(username)),
        (_, Some(token)) => (AuthType::Pat, token, None),
        (Some((username, token)), None) => (AuthType::Basic, token, Some(username)),
        (None, None) => match oauth {
            Some(token) => (AuthType::Oauth, token, None),
            None => {
                return Err(AuthConfigError::invalid(format!(
                    "no {} credentials found; set {p}_USERNAME and {p}_API_TOKEN, {p}_PERSONAL_TOKEN, or {}",
                    service.display_name(),
                    OAUTH_ACCESS_TOKEN_VAR,
                    p = prefix
                )));
            }
        },
    };

    debug!(
        "Resolved {} credentials from environment: auth_type={}",
        service.display_name(),
        auth_type
    );

    build_config(
        service,
        &url,
        &token,
        auth_type.as_str(),
        username.as_deref(),
        ssl_verify,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_url() {
        let err = config_from_lookup(Service::Jira, lookup(&[("JIRA_PERSONAL_TOKEN", "t")]))
            .unwrap_err();
        assert_eq!(err, AuthConfigError::invalid("JIRA_URL is not set"));
    }

    #[test]
    fn test_cloud_prefers_basic() {
        let config = config_from_lookup(
            Service::Jira,
            lookup(&[
                ("JIRA_URL", "https://acme.atlassian.net"),
                ("JIRA_USERNAME", "bob@acme.com"),
                ("JIRA_API_TOKEN", "api"),
                ("JIRA_PERSONAL_TOKEN", "pat"),
            ]),
        )
        .unwrap();
        assert_eq!(config.auth_type(), AuthType::Basic);
        assert_eq!(config.username(), Some("bob@acme.com"));
    }

    #[test]
    fn test_server_prefers_pat() {
        let config = config_from_lookup(
            Service::Confluence,
            lookup(&[
                ("CONFLUENCE_URL", "https://wiki.acme.internal"),
                ("CONFLUENCE_USERNAME", "bob"),
                ("CONFLUENCE_API_TOKEN", "api"),
                ("CONFLUENCE_PERSONAL_TOKEN", "pat"),
                ("CONFLUENCE_SSL_VERIFY", "false"),
            ]),
        )
        .unwrap();
        assert_eq!(config.personal_token(), Some("pat"));
        assert!(!config.ssl_verify);
    }

    #[test]
    fn test_oauth_fallback() {
        let config = config_from_lookup(
            Service::Jira,
            lookup(&[
                ("JIRA_URL", "https://acme.atlassian.net"),
                ("ATLASSIAN_OAUTH_ACCESS_TOKEN", "access"),
            ]),
        )
        .unwrap();
        assert_eq!(config.oauth().unwrap().access_token, "access");
        assert!(config.ssl_verify);
    }

    #[test]
    fn test_no_credentials() {
        let err = config_from_lookup(
            Service::Jira,
            lookup(&[("JIRA_URL", "https://jira.acme.internal"), ("JIRA_USERNAME", "bob")]),
        )
        .unwrap_err();
        assert!(matches!(err, AuthConfigError::InvalidConfiguration(_)));
    }
}
