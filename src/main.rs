//! Auth Tools Entry Point
//!
//! Command-line front end: loads configuration, initializes logging, and
//! runs the requested maintenance command.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use atlassian_auth_tools::core::Config;
use atlassian_auth_tools::domains::docs::generate_docs_file;
use atlassian_auth_tools::{Service, augment_file};

/// Per-call authentication tooling for Atlassian MCP tool servers
#[derive(Parser, Debug)]
#[command(name = "atlassian-auth-tools")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "AUTH_TOOLS_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add auth parameters and credential fallback to tool declarations in a file
    Augment {
        /// Python module to rewrite in place
        input: PathBuf,

        /// Target service: jira or confluence
        service: Service,

        /// Print the result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Generate the tool reference from exported MCP tool schemas
    Docs {
        /// JSON file with the tool descriptors
        #[arg(long, value_name = "PATH")]
        schemas: Option<PathBuf>,

        /// Markdown file to write
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let mut config = Config::from_env();
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(config.logging.level_filter()?);

    info!("Starting {} v{}", config.tool.name, config.tool.version);

    match cli.command {
        Command::Augment {
            input,
            service,
            json,
        } => {
            let result = augment_file(&input, service)
                .with_context(|| format!("Failed to augment {}", input.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "Modified {} functions in {}:",
                    result.modified.len(),
                    input.display()
                );
                for name in &result.modified {
                    println!("  - {}", name);
                }
            }
        }
        Command::Docs { schemas, output } => {
            let schemas = schemas.unwrap_or(config.docs.schemas_path);
            let output = output.unwrap_or(config.docs.output_path);

            let summary = generate_docs_file(&schemas, &output)
                .with_context(|| format!("Failed to generate docs from {}", schemas.display()))?;

            println!("Generated documentation for {} tools:", summary.total);
            println!("  - Jira: {}", summary.jira);
            println!("  - Confluence: {}", summary.confluence);
            println!("\nDocumentation written to {}", output.display());
        }
    }

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so stdout carries only the command report.
fn init_logging(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
