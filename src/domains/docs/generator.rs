//! Markdown reference generation from exported MCP tool descriptors.

use rmcp::model::{JsonObject, Tool};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::error::DocsError;
use crate::core::{Result, Service};

/// Longest parameter description kept when no sentence break is found.
const MAX_PARAM_DESCRIPTION: usize = 150;

/// Name fragments that mark a Jira tool as a write operation.
const JIRA_WRITE_KEYWORDS: [&str; 8] = [
    "create",
    "update",
    "delete",
    "add",
    "link",
    "transition",
    "remove",
    "batch_create",
];

/// Name fragments that mark a Confluence tool as a write operation.
const CONFLUENCE_WRITE_KEYWORDS: [&str; 4] = ["create", "update", "delete", "add"];

/// Per-service tool counts of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocsSummary {
    pub total: usize,
    pub jira: usize,
    pub confluence: usize,
}

fn properties(tool: &Tool) -> Option<&JsonObject> {
    tool.input_schema
        .get("properties")
        .and_then(|p| p.as_object())
}

fn description(tool: &Tool) -> &str {
    tool.description.as_deref().unwrap_or("")
}

/// Split tools into (Jira, Confluence) by their service URL parameter.
///
/// Tools without a URL parameter fall back to a description match.
pub fn categorize_tools(tools: &[Tool]) -> (Vec<&Tool>, Vec<&Tool>) {
    let mut jira = Vec::new();
    let mut confluence = Vec::new();

    for tool in tools {
        let has = |service: Service| {
            properties(tool).is_some_and(|p| p.contains_key(service.url_param()))
        };
        match (has(Service::Jira), has(Service::Confluence)) {
            (true, false) => jira.push(tool),
            (false, true) => confluence.push(tool),
            (true, true) => {
                warn!("Tool {} has both URL types", tool.name);
                jira.push(tool);
            }
            (false, false) => {
                if description(tool).to_lowercase().contains("confluence") {
                    confluence.push(tool);
                } else {
                    jira.push(tool);
                }
            }
        }
    }

    (jira, confluence)
}

/// Shorten a parameter description to its first sentence.
fn summarize_param(description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        return String::new();
    }

    let first_line = description.lines().next().unwrap_or_default().trim();
    let summary = if let Some((sentence, _)) = first_line.split_once(". ") {
        format!("{}.", sentence)
    } else if first_line.ends_with('.') {
        first_line.to_string()
    } else if let Some((sentence, _)) = description.split_once(". ") {
        format!("{}.", sentence)
    } else if description.chars().count() > MAX_PARAM_DESCRIPTION {
        let cut: String = description.chars().take(MAX_PARAM_DESCRIPTION).collect();
        format!("{}...", cut)
    } else {
        description.to_string()
    };

    summary.replace("(Optional) ", "").replace("(Required) ", "")
}

/// Format a single tool's documentation.
pub fn format_tool_doc(tool: &Tool) -> String {
    let short_desc = description(tool)
        .trim()
        .lines()
        .next()
        .unwrap_or_default()
        .trim();

    let required = tool
        .input_schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|r| r.iter().filter_map(|v| v.as_str()).collect::<Vec<_>>())
        .unwrap_or_default();

    let params: Vec<String> = match properties(tool) {
        Some(props) => required
            .into_iter()
            .filter_map(|name| {
                let info = props.get(name)?;
                let desc = info
                    .get("description")
                    .and_then(|d| d.as_str())
                    .unwrap_or_default();
                Some(format!("  - **`{}`**: {}", name, summarize_param(desc)))
            })
            .collect(),
        None => Vec::new(),
    };

    let mut md = format!("#### `{}`\n\n{}\n\n", tool.name, short_desc);
    if !params.is_empty() {
        md.push_str("**Required Parameters:**\n");
        md.push_str(&params.join("\n"));
        md.push_str("\n\n");
    }
    md
}

fn service_section(service: Service, mut tools: Vec<&Tool>, write_keywords: &[&str]) -> String {
    tools.sort_by(|a, b| a.name.cmp(&b.name));
    let (write, read): (Vec<&Tool>, Vec<&Tool>) = tools
        .iter()
        .copied()
        .partition(|t| write_keywords.iter().any(|k| t.name.contains(*k)));

    let mut doc = format!(
        "#### {} Tools\n\nTotal: {} tools\n\n",
        service.display_name(),
        tools.len()
    );
    doc.push_str("##### Read Operations\n\n");
    for tool in read {
        doc.push_str(&format_tool_doc(tool));
    }
    doc.push_str("##### Write Operations\n\n");
    for tool in write {
        doc.push_str(&format_tool_doc(tool));
    }
    doc
}

/// Generate the complete tools reference.
pub fn generate_documentation(tools: &[Tool]) -> String {
    let (jira, confluence) = categorize_tools(tools);

    let mut doc = String::from("### Detailed Tool Reference\n\n");
    doc.push_str(&service_section(Service::Jira, jira, &JIRA_WRITE_KEYWORDS));
    doc.push_str(&service_section(
        Service::Confluence,
        confluence,
        &CONFLUENCE_WRITE_KEYWORDS,
    ));
    doc
}

/// Load a JSON array of tool descriptors.
pub fn load_tools(path: &Path) -> std::result::Result<Vec<Tool>, DocsError> {
    let content = fs::read_to_string(path).map_err(|source| DocsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DocsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate the reference from `schemas` and write it to `output`.
pub fn generate_docs_file(schemas: &Path, output: &Path) -> Result<DocsSummary> {
    let tools = load_tools(schemas)?;
    let documentation = generate_documentation(&tools);
    let (jira, confluence) = categorize_tools(&tools);

    let summary = DocsSummary {
        total: tools.len(),
        jira: jira.len(),
        confluence: confluence.len(),
    };

    fs::write(output, documentation)?;
    info!(
        "Documentation for {} tools written to {}",
        summary.total,
        output.display()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn tool(value: serde_json::Value) -> Tool {
        serde_json::from_value(value).unwrap()
    }

    fn sample_tools() -> Vec<Tool> {
        vec![
            tool(json!({
                "name": "jira_get_issue",
                "description": "Get details of a specific Jira issue.\n\nArgs: ...",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "issue_key": { "description": "Jira issue key (e.g., 'PROJ-123'). Case sensitive." },
                        "jira_url": { "description": "(Optional) Jira instance URL" }
                    },
                    "required": ["issue_key"]
                }
            })),
            tool(json!({
                "name": "jira_create_issue",
                "description": "Create a new Jira issue.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "summary": { "description": "(Required) Summary of the issue" },
                        "jira_url": { "description": "(Optional) Jira instance URL" }
                    },
                    "required": ["summary"]
                }
            })),
            tool(json!({
                "name": "confluence_search",
                "description": "Search Confluence content.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "confluence_url": { "description": "(Optional) Confluence instance URL" }
                    }
                }
            })),
            tool(json!({
                "name": "confluence_add_label",
                "description": "Add a label to a Confluence page.",
                "inputSchema": { "type": "object" }
            })),
        ]
    }

    #[test]
    fn test_categorize_tools() {
        let tools = sample_tools();
        let (jira, confluence) = categorize_tools(&tools);
        assert_eq!(jira.len(), 2);
        assert_eq!(confluence.len(), 2);
        assert_eq!(confluence[1].name, "confluence_add_label");
    }

    #[test]
    fn test_format_tool_doc() {
        let tools = sample_tools();
        let md = format_tool_doc(&tools[0]);
        assert_eq!(
            md,
            "#### `jira_get_issue`\n\nGet details of a specific Jira issue.\n\n**Required Parameters:**\n  - **`issue_key`**: Jira issue key (e.g., 'PROJ-123').\n\n"
        );

        let md = format_tool_doc(&tools[1]);
        assert!(md.contains("  - **`summary`**: Summary of the issue\n"));
    }

    #[test]
    fn test_format_tool_doc_without_required() {
        let tools = sample_tools();
        let md = format_tool_doc(&tools[2]);
        assert!(!md.contains("Required Parameters"));
    }

    #[test]
    fn test_summarize_param_truncates() {
        let long = "x".repeat(200);
        let summary = summarize_param(&long);
        assert_eq!(summary.len(), 153);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_generate_documentation_sections() {
        let doc = generate_documentation(&sample_tools());
        assert!(doc.starts_with("### Detailed Tool Reference\n\n#### Jira Tools\n\nTotal: 2 tools\n\n"));
        let read = doc.find("`jira_get_issue`").unwrap();
        let write_header = doc.find("##### Write Operations").unwrap();
        let create = doc.find("`jira_create_issue`").unwrap();
        assert!(read < write_header && write_header < create);
        assert!(doc.contains("#### Confluence Tools\n\nTotal: 2 tools\n\n"));
    }

    #[test]
    fn test_generate_docs_file() {
        let temp_dir = TempDir::new().unwrap();
        let schemas = temp_dir.path().join("schemas.json");
        let output = temp_dir.path().join("TOOLS.md");
        let raw: Vec<serde_json::Value> = sample_tools()
            .iter()
            .map(|t| serde_json::to_value(t).unwrap())
            .collect();
        fs::write(&schemas, serde_json::to_string(&raw).unwrap()).unwrap();

        let summary = generate_docs_file(&schemas, &output).unwrap();
        assert_eq!(
            summary,
            DocsSummary {
                total: 4,
                jira: 2,
                confluence: 2
            }
        );
        assert!(fs::read_to_string(&output).unwrap().contains("confluence_search"));
    }

    #[test]
    fn test_load_tools_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let schemas = temp_dir.path().join("schemas.json");
        fs::write(&schemas, "{ not json").unwrap();
        assert!(matches!(load_tools(&schemas), Err(DocsError::Parse { .. })));
    }
}
