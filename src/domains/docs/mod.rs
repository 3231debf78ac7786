//! Docs domain module.
//!
//! Generates the Markdown tool reference from exported MCP tool schemas,
//! grouping tools by service and by read/write operation.

mod error;
mod generator;

pub use error::DocsError;
pub use generator::{
    DocsSummary, categorize_tools, format_tool_doc, generate_docs_file, generate_documentation,
    load_tools,
};
