//! Authentication configuration types.
//!
//! The credential shape is a sum type keyed by auth scheme, so a config can
//! never carry two shapes at once.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::AuthConfigError;
use crate::core::Service;

/// Hostname suffix of Atlassian Cloud instances.
pub const CLOUD_DOMAIN: &str = "atlassian.net";

/// Supported authentication schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Bring-your-own OAuth access token.
    Oauth,
    /// Personal access token (Server/Data Center).
    Pat,
    /// Username/email plus API token.
    Basic,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oauth => "oauth",
            Self::Pat => "pat",
            Self::Basic => "basic",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = AuthConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oauth" => Ok(Self::Oauth),
            "pat" => Ok(Self::Pat),
            "basic" => Ok(Self::Basic),
            other => Err(AuthConfigError::unsupported(other)),
        }
    }
}

/// OAuth settings for a bring-your-own access token.
///
/// `cloud_id` starts empty; the fetcher resolves it for cloud instances.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct OAuthSettings {
    pub access_token: String,
    pub cloud_id: String,
}

impl fmt::Debug for OAuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthSettings")
            .field("access_token", &"[REDACTED]")
            .field("cloud_id", &self.cloud_id)
            .finish()
    }
}

/// Credentials, one shape per auth type.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "auth_type", rename_all = "lowercase")]
pub enum Credentials {
    Basic { username: String, api_token: String },
    Pat { personal_token: String },
    Oauth(OAuthSettings),
}

/// Custom Debug implementation to redact secrets from logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("api_token", &"[REDACTED]")
                .finish(),
            Self::Pat { .. } => f
                .debug_struct("Pat")
                .field("personal_token", &"[REDACTED]")
                .finish(),
            Self::Oauth(settings) => f.debug_tuple("Oauth").field(settings).finish(),
        }
    }
}

impl Credentials {
    /// The auth type this shape belongs to.
    pub fn auth_type(&self) -> AuthType {
        match self {
            Self::Basic { .. } => AuthType::Basic,
            Self::Pat { .. } => AuthType::Pat,
            Self::Oauth(_) => AuthType::Oauth,
        }
    }
}

/// A validated connection/authentication configuration for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthConfig {
    /// Which product this configuration targets.
    pub service: Service,

    /// Base URL of the instance.
    pub url: String,

    /// Credentials for the chosen auth type.
    pub credentials: Credentials,

    /// Whether TLS certificates are verified.
    pub ssl_verify: bool,
}

impl AuthConfig {
    pub fn auth_type(&self) -> AuthType {
        self.credentials.auth_type()
    }

    pub fn username(&self) -> Option<&str> {
        match &self.credentials {
            Credentials::Basic { username, .. } => Some(username),
            _ => None,
        }
    }

    pub fn api_token(&self) -> Option<&str> {
        match &self.credentials {
            Credentials::Basic { api_token, .. } => Some(api_token),
            _ => None,
        }
    }

    pub fn personal_token(&self) -> Option<&str> {
        match &self.credentials {
            Credentials::Pat { personal_token } => Some(personal_token),
            _ => None,
        }
    }

    pub fn oauth(&self) -> Option<&OAuthSettings> {
        match &self.credentials {
            Credentials::Oauth(settings) => Some(settings),
            _ => None,
        }
    }

    /// Whether the URL points at an Atlassian Cloud instance.
    pub fn is_cloud(&self) -> bool {
        is_cloud_url(&self.url)
    }
}

pub(crate) fn is_cloud_url(url: &str) -> bool {
    url.contains(CLOUD_DOMAIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_type_parse() {
        assert_eq!("pat".parse::<AuthType>().unwrap(), AuthType::Pat);
        assert_eq!(
            "saml".parse::<AuthType>().unwrap_err(),
            AuthConfigError::unsupported("saml")
        );
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = Credentials::Basic {
            username: "bob".to_string(),
            api_token: "super_secret_token".to_string(),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(debug_str.contains("bob"));
        assert!(!debug_str.contains("super_secret_token"));

        let creds = Credentials::Oauth(OAuthSettings {
            access_token: "oauth_secret".to_string(),
            cloud_id: String::new(),
        });
        assert!(!format!("{:?}", creds).contains("oauth_secret"));
    }

    #[test]
    fn test_credentials_serialize_tagged() {
        let creds = Credentials::Pat {
            personal_token: "t".to_string(),
        };
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(value["auth_type"], "pat");
        assert_eq!(value["personal_token"], "t");
    }
}
