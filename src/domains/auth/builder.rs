//! Auth config builder.
//!
//! Turns explicit per-call parameters into a validated [`AuthConfig`]. The
//! builder never reads the environment and holds no state: identical inputs
//! produce identical configs.

use tracing::debug;

use super::error::AuthConfigError;
use super::types::{AuthConfig, AuthType, Credentials, OAuthSettings, is_cloud_url};
use crate::core::Service;

/// Build a configuration for `service`.
///
/// `auth_type` is taken as received so unsupported values can be reported
/// verbatim. `username` is required for `basic` and ignored otherwise.
pub fn build_config(
    service: Service,
    url: &str,
    auth_token: &str,
    auth_type: &str,
    username: Option<&str>,
    ssl_verify: bool,
) -> Result<AuthConfig, AuthConfigError> {
    debug!(
        "Building {} config from params: url={}, auth_type={}, username={:?}",
        service.display_name(),
        url,
        auth_type,
        username
    );

    let auth_type: AuthType = auth_type.parse()?;

    if url.trim().is_empty() {
        return Err(AuthConfigError::invalid(format!(
            "{} is required",
            service.url_param()
        )));
    }
    if auth_token.is_empty() {
        return Err(AuthConfigError::invalid(format!(
            "auth_token is required for '{}' authentication type",
            auth_type
        )));
    }

    let credentials = match auth_type {
        AuthType::Basic => {
            let username = username
                .filter(|u| !u.is_empty())
                .ok_or_else(|| {
                    AuthConfigError::invalid("username is required for 'basic' authentication type")
                })?;
            Credentials::Basic {
                username: username.to_string(),
                api_token: auth_token.to_string(),
            }
        }
        AuthType::Pat => Credentials::Pat {
            personal_token: auth_token.to_string(),
        },
        AuthType::Oauth => {
            if is_cloud_url(url) {
                debug!(
                    "Detected Atlassian Cloud URL. OAuth requires cloud_id which should be provided."
                );
            }
            Credentials::Oauth(OAuthSettings {
                access_token: auth_token.to_string(),
                cloud_id: String::new(),
            })
        }
    };

    Ok(AuthConfig {
        service,
        url: url.to_string(),
        credentials,
        ssl_verify,
    })
}

/// Build a Jira configuration. See [`build_config`].
pub fn build_jira_config(
    jira_url: &str,
    auth_token: &str,
    auth_type: &str,
    username: Option<&str>,
    ssl_verify: bool,
) -> Result<AuthConfig, AuthConfigError> {
    build_config(Service::Jira, jira_url, auth_token, auth_type, username, ssl_verify)
}

/// Build a Confluence configuration. See [`build_config`].
pub fn build_confluence_config(
    confluence_url: &str,
    auth_token: &str,
    auth_type: &str,
    username: Option<&str>,
    ssl_verify: bool,
) -> Result<AuthConfig, AuthConfigError> {
    build_config(
        Service::Confluence,
        confluence_url,
        auth_token,
        auth_type,
        username,
        ssl_verify,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://jira.example.com";

    #[test]
    fn test_basic_requires_username() {
        let err = build_jira_config(URL, "token", "basic", None, true).unwrap_err();
        assert!(matches!(err, AuthConfigError::InvalidConfiguration(_)));

        let err = build_jira_config(URL, "token", "basic", Some(""), true).unwrap_err();
        assert!(matches!(err, AuthConfigError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_basic_with_username() {
        let config = build_jira_config(URL, "token", "basic", Some("bob"), true).unwrap();
        assert_eq!(config.auth_type(), AuthType::Basic);
        assert_eq!(config.username(), Some("bob"));
        assert_eq!(config.api_token(), Some("token"));
        assert!(config.personal_token().is_none());
        assert!(config.oauth().is_none());
    }

    #[test]
    fn test_pat() {
        let config = build_confluence_config(URL, "pat-token", "pat", None, false).unwrap();
        assert_eq!(config.service, Service::Confluence);
        assert_eq!(config.personal_token(), Some("pat-token"));
        assert!(config.username().is_none());
        assert!(config.oauth().is_none());
        assert!(!config.ssl_verify);
    }

    #[test]
    fn test_pat_ignores_username() {
        let config = build_jira_config(URL, "pat-token", "pat", Some("bob"), true).unwrap();
        assert!(config.username().is_none());
    }

    #[test]
    fn test_oauth_leaves_cloud_id_empty() {
        let config =
            build_jira_config("https://x.atlassian.net", "access", "oauth", None, true).unwrap();
        let oauth = config.oauth().unwrap();
        assert_eq!(oauth.access_token, "access");
        assert_eq!(oauth.cloud_id, "");
        assert!(config.is_cloud());
        assert!(config.username().is_none());
        assert!(config.personal_token().is_none());
    }

    #[test]
    fn test_unsupported_auth_type() {
        let err = build_jira_config(URL, "token", "saml", None, true).unwrap_err();
        assert_eq!(err, AuthConfigError::unsupported("saml"));
        assert!(err.to_string().contains("saml"));
    }

    #[test]
    fn test_empty_required_fields() {
        assert!(matches!(
            build_jira_config("", "token", "pat", None, true),
            Err(AuthConfigError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            build_jira_config(URL, "", "pat", None, true),
            Err(AuthConfigError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let a = build_jira_config(URL, "token", "basic", Some("bob"), true).unwrap();
        let b = build_jira_config(URL, "token", "basic", Some("bob"), true).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
