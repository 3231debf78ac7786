//! Atlassian Auth Tools Library
//!
//! Tooling that lets MCP tool servers for Jira and Confluence accept
//! credentials per call instead of only per process.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling and the `Service` selector
//! - **domains**: business logic organized by bounded contexts
//!   - **augment**: injects the auth parameter block and fallback logic into
//!     Python tool declarations
//!   - **auth**: builds validated `AuthConfig` values for the three auth schemes
//!   - **docs**: renders the tool reference from exported schemas
//!
//! # Example
//!
//! ```rust
//! use atlassian_auth_tools::{Service, augment, build_jira_config};
//!
//! let source = "@jira_mcp.tool()\nasync def get_issue(issue_key: str) -> str:\n    pass\n";
//! let result = augment(source, Service::Jira);
//! assert_eq!(result.modified, vec!["get_issue"]);
//!
//! let config = build_jira_config("https://x.atlassian.net", "token", "oauth", None, true)?;
//! assert_eq!(config.oauth().map(|o| o.cloud_id.as_str()), Some(""));
//! # Ok::<(), atlassian_auth_tools::domains::auth::AuthConfigError>(())
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Result, Service};
pub use domains::augment::{Augmented, augment, augment_file};
pub use domains::auth::{
    AuthConfig, AuthType, build_config, build_confluence_config, build_jira_config,
};
