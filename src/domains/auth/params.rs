//! Per-call authentication parameters.
//!
//! Tool handlers flatten [`JiraAuthParams`] or [`ConfluenceAuthParams`] into
//! their own parameter structs; the schema descriptions mirror the block the
//! augmenter injects into Python tool declarations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::AuthType;

/// Auth parameters accepted by Jira tools.
#[derive(Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct JiraAuthParams {
    /// (Optional) Jira instance URL (e.g., 'https://mycompany.atlassian.net'). If not provided, uses environment variable JIRA_URL.
    #[serde(default)]
    pub jira_url: Option<String>,

    /// (Optional) Authentication token (OAuth token, PAT, or API token). If not provided, uses environment variable credentials.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// (Optional) Authentication type. Required if auth_token is provided. Choices: 'oauth', 'pat', 'basic'.
    #[serde(default)]
    pub auth_type: Option<AuthType>,

    /// (Optional) Username/email (required only for 'basic' auth type)
    #[serde(default)]
    pub username: Option<String>,
}

/// Auth parameters accepted by Confluence tools.
#[derive(Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ConfluenceAuthParams {
    /// (Optional) Confluence instance URL (e.g., 'https://mycompany.atlassian.net/wiki'). If not provided, uses environment variable CONFLUENCE_URL.
    #[serde(default)]
    pub confluence_url: Option<String>,

    /// (Optional) Authentication token (OAuth token, PAT, or API token). If not provided, uses environment variable credentials.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// (Optional) Authentication type. Required if auth_token is provided. Choices: 'oauth', 'pat', 'basic'.
    #[serde(default)]
    pub auth_type: Option<AuthType>,

    /// (Optional) Username/email (required only for 'basic' auth type)
    #[serde(default)]
    pub username: Option<String>,
}

/// Service-neutral view of the auth parameters.
///
/// `auth_type` stays a raw string so unsupported values reach the builder and
/// are reported by name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthParams {
    pub url: Option<String>,
    pub auth_token: Option<String>,
    pub auth_type: Option<String>,
    pub username: Option<String>,
}

impl AuthParams {
    /// URL, token and type, when all three are present and non-empty.
    pub fn explicit_triple(&self) -> Option<(&str, &str, &str)> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }
        Some((
            present(&self.url)?,
            present(&self.auth_token)?,
            present(&self.auth_type)?,
        ))
    }
}

impl From<JiraAuthParams> for AuthParams {
    fn from(params: JiraAuthParams) -> Self {
        Self {
            url: params.jira_url,
            auth_token: params.auth_token,
            auth_type: params.auth_type.map(|t| t.as_str().to_string()),
            username: params.username,
        }
    }
}

impl From<ConfluenceAuthParams> for AuthParams {
    fn from(params: ConfluenceAuthParams) -> Self {
        Self {
            url: params.confluence_url,
            auth_token: params.auth_token,
            auth_type: params.auth_type.map(|t| t.as_str().to_string()),
            username: params.username,
        }
    }
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "[REDACTED]")
}

/// Custom Debug implementation to redact secrets from logs.
impl fmt::Debug for AuthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthParams")
            .field("url", &self.url)
            .field("auth_token", &redact(&self.auth_token))
            .field("auth_type", &self.auth_type)
            .field("username", &self.username)
            .finish()
    }
}

impl fmt::Debug for JiraAuthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraAuthParams")
            .field("jira_url", &self.jira_url)
            .field("auth_token", &redact(&self.auth_token))
            .field("auth_type", &self.auth_type)
            .field("username", &self.username)
            .finish()
    }
}

impl fmt::Debug for ConfluenceAuthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfluenceAuthParams")
            .field("confluence_url", &self.confluence_url)
            .field("auth_token", &redact(&self.auth_token))
            .field("auth_type", &self.auth_type)
            .field("username", &self.username)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_partial() {
        let params: JiraAuthParams = serde_json::from_value(json!({
            "jira_url": "https://x.atlassian.net",
            "auth_type": "pat"
        }))
        .unwrap();
        assert_eq!(params.jira_url.as_deref(), Some("https://x.atlassian.net"));
        assert_eq!(params.auth_type, Some(AuthType::Pat));
        assert!(params.auth_token.is_none());
    }

    #[test]
    fn test_rejects_unknown_auth_type() {
        let result: Result<ConfluenceAuthParams, _> =
            serde_json::from_value(json!({ "auth_type": "saml" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_lists_all_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(JiraAuthParams)).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for name in ["jira_url", "auth_token", "auth_type", "username"] {
            assert!(properties.contains_key(name), "missing {}", name);
        }
        let required = schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.len())
            .unwrap_or(0);
        assert_eq!(required, 0);
    }

    #[test]
    fn test_explicit_triple() {
        let params = AuthParams {
            url: Some("https://x".to_string()),
            auth_token: Some("t".to_string()),
            auth_type: Some("pat".to_string()),
            username: None,
        };
        assert_eq!(params.explicit_triple(), Some(("https://x", "t", "pat")));

        let params = AuthParams {
            auth_token: Some(String::new()),
            ..params
        };
        assert!(params.explicit_triple().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let params = ConfluenceAuthParams {
            auth_token: Some("hunter2".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", params).contains("hunter2"));
        assert!(!format!("{:?}", AuthParams::from(params)).contains("hunter2"));
    }
}
