//! Auth domain module.
//!
//! Builds validated per-call authentication configurations for Jira and
//! Confluence tools.
//!
//! ## Architecture
//!
//! - `types.rs` - `AuthConfig`, `Credentials` and `AuthType`
//! - `builder.rs` - Config construction and validation
//! - `params.rs` - Typed auth parameter blocks for tool handlers
//! - `env.rs` - Environment credential resolution for session fetchers
//! - `fetcher.rs` - Call-scoped vs session-scoped fetcher selection
//! - `error.rs` - Auth-specific error types

mod builder;
pub mod env;
mod error;
pub mod fetcher;
mod params;
mod types;

pub use builder::{build_config, build_confluence_config, build_jira_config};
pub use error::AuthConfigError;
pub use fetcher::{FetcherProvider, acquire_fetcher, explicit_config};
pub use params::{AuthParams, ConfluenceAuthParams, JiraAuthParams};
pub use types::{AuthConfig, AuthType, CLOUD_DOMAIN, Credentials, OAuthSettings};
