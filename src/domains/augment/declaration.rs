//! Declaration candidate discovery.
//!
//! A candidate is a tool function declared by convention:
//!
//! ```text
//! @mcp.tool(...)          <- marker annotation, `<name>.tool` with optional args
//! @check_write_access     <- optional second stacked decorator
//! async def name(         <- header, may span many lines
//!     ...
//! ) -> str:               <- fixed return marker
//! ```

use super::error::AugmentError;
use super::scanner::{
    LastToken, ident_end, logical_line_end, match_group, next_line, rest_of_line_blank,
    skip_inline_space,
};

/// A tool function header located in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Declaration {
    pub name: String,
    /// 1-based line of the marker annotation.
    pub line: usize,
    /// Indentation of the `async def` line.
    pub indent: String,
    /// Declared parameter names, in order.
    pub params: Vec<String>,
    /// Offset of the `)` closing the parameter list.
    pub close_paren: usize,
    /// End of the last significant token inside the parameter list.
    pub last_token_end: usize,
    pub last_token: LastToken,
    /// The parameter list ends with a `**kwargs` catch-all.
    pub has_kwargs: bool,
    /// Offset just past the `:` of the return marker.
    pub header_end: usize,
}

/// One logical line of a function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Statement {
    /// Start of the physical line, before indentation.
    pub start: usize,
    pub code_start: usize,
    /// Offset of the terminating newline (or end of source).
    pub end: usize,
}

impl Statement {
    pub fn indent(&self) -> usize {
        self.code_start - self.start
    }
}

fn line_of(src: &str, pos: usize) -> usize {
    src[..pos].matches('\n').count() + 1
}

/// Parse `@dotted.name` at `pos`; returns the end offset and whether the
/// name has the `<owner>.tool` shape.
fn decorator_name(bytes: &[u8], pos: usize) -> Option<(usize, bool)> {
    if bytes.get(pos) != Some(&b'@') {
        return None;
    }
    let mut p = skip_inline_space(bytes, pos + 1);
    let mut segments = 0;
    let last_is_tool = loop {
        let end = ident_end(bytes, p);
        if end == p {
            return None;
        }
        segments += 1;
        let is_tool = &bytes[p..end] == b"tool";
        p = end;
        if bytes.get(p) != Some(&b'.') {
            break is_tool;
        }
        p += 1;
    };
    Some((p, segments >= 2 && last_is_tool))
}

/// Parse the decorator at `pos`; returns the start of the following line.
fn decorator(src: &str, pos: usize, line: usize) -> Result<usize, AugmentError> {
    let bytes = src.as_bytes();
    let (name_end, _) = decorator_name(bytes, pos)
        .ok_or_else(|| AugmentError::malformed(line, "expected a decorator name"))?;

    let mut p = skip_inline_space(bytes, name_end);
    if bytes.get(p) == Some(&b'(') {
        let args = match_group(src, p).map_err(|e| AugmentError::scan(line, e))?;
        p = args.close + 1;
    }
    rest_of_line_blank(src, p)
        .ok_or_else(|| AugmentError::malformed(line, "unexpected text after decorator"))
}

/// `kw` followed by at least one space at `pos`; returns the offset after the spaces.
fn keyword(bytes: &[u8], pos: usize, kw: &str) -> Option<usize> {
    let after = pos + kw.len();
    (bytes[pos..].starts_with(kw.as_bytes()) && matches!(bytes.get(after), Some(b' ' | b'\t')))
        .then(|| skip_inline_space(bytes, after))
}

/// Offset just past `-> str:` starting at `pos`, allowing inline spaces.
fn return_marker_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let p = skip_inline_space(bytes, pos);
    if !bytes[p..].starts_with(b"->") {
        return None;
    }
    let p = skip_inline_space(bytes, p + 2);
    if ident_end(bytes, p) != p + 3 || !bytes[p..].starts_with(b"str") {
        return None;
    }
    let p = skip_inline_space(bytes, p + 3);
    (bytes.get(p) == Some(&b':')).then_some(p + 1)
}

fn parse_declaration(src: &str, start: usize) -> Result<Declaration, AugmentError> {
    let bytes = src.as_bytes();
    let line = line_of(src, start);
    let marker_at = skip_inline_space(bytes, start);
    let indent = &src[start..marker_at];

    let mut pos = decorator(src, marker_at, line)?;

    let stacked = skip_inline_space(bytes, pos);
    if bytes.get(stacked) == Some(&b'@') {
        if &src[pos..stacked] != indent {
            return Err(AugmentError::malformed(line, "stacked decorator is not aligned"));
        }
        pos = decorator(src, stacked, line)?;
    }

    let def_at = skip_inline_space(bytes, pos);
    if &src[pos..def_at] != indent {
        return Err(AugmentError::malformed(
            line,
            "function header is not aligned with its decorator",
        ));
    }
    let name_at = keyword(bytes, def_at, "async")
        .and_then(|p| keyword(bytes, p, "def"))
        .ok_or_else(|| AugmentError::malformed(line, "expected `async def` after tool decorator"))?;
    let name_end = ident_end(bytes, name_at);
    if name_end == name_at {
        return Err(AugmentError::malformed(line, "missing function name"));
    }

    let open = skip_inline_space(bytes, name_end);
    if bytes.get(open) != Some(&b'(') {
        return Err(AugmentError::malformed(line, "expected a parameter list"));
    }
    let group = match_group(src, open).map_err(|e| AugmentError::scan(line, e))?;
    let header_end = return_marker_end(bytes, group.close + 1)
        .ok_or_else(|| AugmentError::malformed(line, "expected `-> str:` after parameter list"))?;

    Ok(Declaration {
        name: src[name_at..name_end].to_string(),
        line,
        indent: indent.to_string(),
        params: group.items,
        close_paren: group.close,
        last_token_end: group.last_token_end,
        last_token: group.last_token,
        has_kwargs: group.ends_with_double_star,
        header_end,
    })
}

/// Find every tool declaration in `src`, in source order.
///
/// Candidates that start like a tool declaration but break the convention
/// are returned as errors; scanning resumes on the following line.
pub(crate) fn discover(src: &str) -> Vec<Result<Declaration, AugmentError>> {
    let bytes = src.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let marker_at = skip_inline_space(bytes, pos);
        if let Some((_, true)) = decorator_name(bytes, marker_at) {
            let result = parse_declaration(src, pos);
            if let Ok(decl) = &result {
                let resume = next_line(src, decl.header_end);
                found.push(result);
                pos = resume;
                continue;
            }
            found.push(result);
        }
        pos = next_line(src, pos);
    }

    found
}

/// Top-level logical lines of the body following `decl`'s header.
///
/// Returns nothing for a body written on the header line.
pub(crate) fn body_statements(src: &str, decl: &Declaration) -> Vec<Statement> {
    let bytes = src.as_bytes();
    let Some(mut pos) = rest_of_line_blank(src, decl.header_end) else {
        return Vec::new();
    };

    let mut statements = Vec::new();
    while pos < bytes.len() {
        let code_start = skip_inline_space(bytes, pos);
        if let Some(next) = rest_of_line_blank(src, code_start) {
            pos = next;
            continue;
        }
        if code_start - pos <= decl.indent.len() {
            break;
        }
        let end = logical_line_end(src, code_start);
        statements.push(Statement {
            start: pos,
            code_start,
            end,
        });
        pos = end + 1;
    }

    statements
}
