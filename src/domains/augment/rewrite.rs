//! Declaration augmentation.
//!
//! Inserts the auth parameter block into each eligible tool header and swaps
//! the body's unconditional session-fetcher statement for the fallback
//! fragment. All edits are computed against the original text and spliced in
//! one pass.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::declaration::{Declaration, Statement, body_statements, discover};
use super::error::AugmentError;
use super::scanner::{LastToken, starts_string};
use super::templates::{CONFLICTING_PARAMS, RESERVED_PARAMS, Templates, indent};
use crate::core::Service;

/// Result of one augmentation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Augmented {
    /// The rewritten source.
    pub text: String,
    /// Names of the declarations whose headers were augmented, in source order.
    pub modified: Vec<String>,
    /// Subset of `modified` whose fetcher statement was also replaced.
    pub bodies_rewritten: Vec<String>,
}

impl Augmented {
    /// Whether the run changed anything.
    pub fn is_unchanged(&self) -> bool {
        self.modified.is_empty()
    }
}

struct Edit {
    start: usize,
    end: usize,
    text: String,
}

/// Augment every eligible tool declaration in `source` for `service`.
///
/// Never fails: malformed candidates are logged and left untouched. Running
/// it again on its own output changes nothing.
pub fn augment(source: &str, service: Service) -> Augmented {
    let templates = Templates::for_service(service);
    let mut edits = Vec::new();
    let mut modified = Vec::new();
    let mut bodies_rewritten = Vec::new();

    for candidate in discover(source) {
        let decl = match candidate {
            Ok(decl) => decl,
            Err(err) => {
                warn!("Skipping candidate: {}", err);
                continue;
            }
        };

        if let Err(err) = check_eligible(&decl) {
            debug!("Skipping {}: {}", decl.name, err);
            continue;
        }

        edits.push(header_edit(source, &decl, &templates));

        match fetcher_statement(source, &decl, &templates.fetcher_call) {
            Some(statement) => {
                let prefix = &source[statement.start..statement.code_start];
                edits.push(Edit {
                    start: statement.start,
                    end: statement.end,
                    text: indent(&templates.fallback, prefix),
                });
                bodies_rewritten.push(decl.name.clone());
            }
            None => debug!(
                "No session fetcher statement in {}; header updated only",
                decl.name
            ),
        }

        modified.push(decl.name);
    }

    info!(
        "Augmented {} {} declaration(s), {} body rewrite(s)",
        modified.len(),
        service.display_name(),
        bodies_rewritten.len()
    );

    Augmented {
        text: splice(source, edits),
        modified,
        bodies_rewritten,
    }
}

fn check_eligible(decl: &Declaration) -> Result<(), AugmentError> {
    if let Some(name) = decl
        .params
        .iter()
        .find(|p| RESERVED_PARAMS.contains(&p.as_str()))
    {
        return Err(AugmentError::malformed(
            decl.line,
            format!("already declares `{}`", name),
        ));
    }
    if let Some(name) = decl
        .params
        .iter()
        .find(|p| CONFLICTING_PARAMS.contains(&p.as_str()))
    {
        return Err(AugmentError::malformed(
            decl.line,
            format!("parameter `{}` would be duplicated", name),
        ));
    }
    if decl.has_kwargs {
        return Err(AugmentError::malformed(
            decl.line,
            "parameter list ends with a `**` catch-all",
        ));
    }
    Ok(())
}

/// Replace the gap between the last parameter and `)` with the block.
///
/// Comments in the gap are kept; a separator is synthesized when the last
/// parameter has none.
fn header_edit(source: &str, decl: &Declaration, templates: &Templates) -> Edit {
    let separator = match decl.last_token {
        LastToken::Other => ",",
        LastToken::Comma | LastToken::Open => "",
    };
    let gap = source[decl.last_token_end..decl.close_paren].trim_end();
    let block = indent(&templates.param_block, &format!("{}    ", decl.indent));

    Edit {
        start: decl.last_token_end,
        end: decl.close_paren,
        text: format!("{}{}\n{}\n{}", separator, gap, block, decl.indent),
    }
}

/// The unconditional fetcher statement at the top level of the body, after
/// the docstring.
fn fetcher_statement(source: &str, decl: &Declaration, call: &str) -> Option<Statement> {
    let statements = body_statements(source, decl);
    let first = statements.first()?;
    let top = first.indent();
    let docstring = usize::from(starts_string(source.as_bytes(), first.code_start));
    let wanted = normalize(call);

    statements
        .iter()
        .skip(docstring)
        .filter(|s| s.indent() == top)
        .find(|s| normalize(&source[s.code_start..s.end]) == wanted)
        .copied()
}

fn normalize(code: &str) -> String {
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn splice(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.start);
    let mut out = String::with_capacity(source.len() + edits.iter().map(|e| e.text.len()).sum::<usize>());
    let mut cursor = 0;
    for edit in edits {
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..]);
    out
}
