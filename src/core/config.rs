//! Configuration management for the auth tooling.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults. Command-line flags override individual values in `main.rs`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;

use super::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tool identification and metadata.
    pub tool: ToolConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Documentation generator configuration.
    pub docs: DocsConfig,
}

/// Tool identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Name reported in logs.
    pub name: String,

    /// The version of the tool.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the documentation generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// JSON file holding the exported MCP tool descriptors.
    pub schemas_path: PathBuf,

    /// Markdown file the reference is written to.
    pub output_path: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            schemas_path: PathBuf::from("mcp_tools_schemas.json"),
            output_path: PathBuf::from("TOOLS_DOCUMENTATION.md"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: ToolConfig {
                name: "atlassian-auth-tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            docs: DocsConfig::default(),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level.
    pub fn level_filter(&self) -> Result<Level> {
        match self.level.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => Err(Error::config(format!("unknown log level '{}'", other))),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognised variables: `AUTH_TOOLS_LOG_LEVEL`, `AUTH_TOOLS_SCHEMAS_PATH`,
    /// `AUTH_TOOLS_DOCS_OUTPUT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(level) = std::env::var("AUTH_TOOLS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(path) = std::env::var("AUTH_TOOLS_SCHEMAS_PATH") {
            config.docs.schemas_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("AUTH_TOOLS_DOCS_OUTPUT") {
            config.docs.output_path = PathBuf::from(path);
        }

        config
    }
}
