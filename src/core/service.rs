//! Target service selector.
//!
//! Both the augmenter and the config builder are parameterised by the
//! Atlassian product they target. The set is closed: Jira or Confluence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An Atlassian product that tools can authenticate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Jira,
    Confluence,
}

impl Service {
    /// Lowercase identifier (`jira`, `confluence`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jira => "jira",
            Self::Confluence => "confluence",
        }
    }

    /// Human-readable product name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Jira => "Jira",
            Self::Confluence => "Confluence",
        }
    }

    /// Name of the per-call URL parameter (`jira_url`, `confluence_url`).
    pub fn url_param(&self) -> &'static str {
        match self {
            Self::Jira => "jira_url",
            Self::Confluence => "confluence_url",
        }
    }

    /// Prefix used for this service's environment variables.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::Jira => "JIRA",
            Self::Confluence => "CONFLUENCE",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no supported service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Service must be 'jira' or 'confluence', got '{0}'")]
pub struct UnknownService(pub String);

impl FromStr for Service {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jira" => Ok(Self::Jira),
            "confluence" => Ok(Self::Confluence),
            _ => Err(UnknownService(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("JIRA".parse::<Service>().unwrap(), Service::Jira);
        assert_eq!("Confluence".parse::<Service>().unwrap(), Service::Confluence);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "bitbucket".parse::<Service>().unwrap_err();
        assert!(err.to_string().contains("bitbucket"));
    }

    #[test]
    fn test_url_param_names() {
        assert_eq!(Service::Jira.url_param(), "jira_url");
        assert_eq!(Service::Confluence.url_param(), "confluence_url");
    }
}
