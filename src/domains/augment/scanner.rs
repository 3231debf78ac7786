//! Lexical scanning of Python source.
//!
//! Just enough of the lexical grammar to find declaration boundaries safely:
//! string literals (prefixed, triple-quoted, escaped), comments, line
//! continuations and bracket nesting. Everything else is an opaque word or
//! punctuation byte.
//!
//! All offsets are byte offsets into the source. Every delimiter the scanner
//! cares about is ASCII, so offsets always fall on `char` boundaries.

use thiserror::Error;

/// Low-level scan failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ScanError {
    #[error("unterminated string literal at byte {0}")]
    UnterminatedString(usize),

    #[error("unclosed '{open}' at byte {offset}")]
    Unclosed { open: char, offset: usize },

    #[error("mismatched '{found}' at byte {offset}")]
    Mismatched { found: char, offset: usize },
}

/// One lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lexeme {
    Newline,
    Whitespace,
    Comment,
    Str,
    /// Identifier, keyword or number.
    Word,
    Punct(u8),
}

pub(crate) fn is_ident_start(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic() || b >= 0x80
}

pub(crate) fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// End of the identifier starting at `pos`, or `pos` if there is none.
pub(crate) fn ident_end(bytes: &[u8], pos: usize) -> usize {
    if pos >= bytes.len() || !is_ident_start(bytes[pos]) {
        return pos;
    }
    let mut end = pos + 1;
    while end < bytes.len() && is_ident_char(bytes[end]) {
        end += 1;
    }
    end
}

/// End of the run of spaces and tabs starting at `pos`.
pub(crate) fn skip_inline_space(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t') {
        pos += 1;
    }
    pos
}

/// Length of a string prefix (`r`, `b`, `f`, `rb`, ...) at `pos` if a quote follows it.
fn string_prefix_len(bytes: &[u8], pos: usize) -> Option<usize> {
    let is_prefix = |b: u8| matches!(b.to_ascii_lowercase(), b'r' | b'b' | b'u' | b'f');
    (0..=2).find(|&n| {
        pos + n < bytes.len()
            && bytes[pos..pos + n].iter().all(|&b| is_prefix(b))
            && matches!(bytes[pos + n], b'"' | b'\'')
    })
}

/// Whether a string literal starts at `pos`.
pub(crate) fn starts_string(bytes: &[u8], pos: usize) -> bool {
    string_prefix_len(bytes, pos).is_some()
}

fn skip_string(bytes: &[u8], pos: usize, prefix: usize) -> Result<usize, ScanError> {
    let quote_at = pos + prefix;
    let quote = bytes[quote_at];
    let triple = bytes[quote_at..].starts_with(&[quote; 3]);
    let mut i = quote_at + if triple { 3 } else { 1 };

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if !triple => return Err(ScanError::UnterminatedString(pos)),
            c if c == quote => {
                if !triple {
                    return Ok(i + 1);
                }
                if bytes[i..].starts_with(&[quote; 3]) {
                    return Ok(i + 3);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    Err(ScanError::UnterminatedString(pos))
}

/// Read the lexeme starting at `pos` (which must be in bounds).
pub(crate) fn lex(bytes: &[u8], pos: usize) -> Result<(Lexeme, usize), ScanError> {
    let b = bytes[pos];
    let lexeme = match b {
        b'\n' => (Lexeme::Newline, pos + 1),
        b' ' | b'\t' | b'\r' | 0x0c => {
            let mut end = pos + 1;
            while end < bytes.len() && matches!(bytes[end], b' ' | b'\t' | b'\r' | 0x0c) {
                end += 1;
            }
            (Lexeme::Whitespace, end)
        }
        b'\\' if bytes[pos + 1..].starts_with(b"\n") => (Lexeme::Whitespace, pos + 2),
        b'\\' if bytes[pos + 1..].starts_with(b"\r\n") => (Lexeme::Whitespace, pos + 3),
        b'#' => {
            let end = bytes[pos..]
                .iter()
                .position(|&c| c == b'\n')
                .map_or(bytes.len(), |n| pos + n);
            (Lexeme::Comment, end)
        }
        _ => {
            if let Some(prefix) = string_prefix_len(bytes, pos) {
                (Lexeme::Str, skip_string(bytes, pos, prefix)?)
            } else if is_ident_char(b) {
                let mut end = pos + 1;
                while end < bytes.len() && is_ident_char(bytes[end]) {
                    end += 1;
                }
                (Lexeme::Word, end)
            } else {
                (Lexeme::Punct(b), pos + 1)
            }
        }
    };
    Ok(lexeme)
}

fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        _ => None,
    }
}

/// Kind of the last significant token inside a bracket group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LastToken {
    /// The group is empty: only the opening bracket precedes the closer.
    Open,
    /// A top-level separator precedes the closer.
    Comma,
    Other,
}

/// A balanced bracket group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group {
    /// Offset of the closing bracket.
    pub close: usize,
    /// End offset of the last significant token before `close`.
    pub last_token_end: usize,
    pub last_token: LastToken,
    /// Leading identifier of each top-level comma-separated item.
    pub items: Vec<String>,
    /// Whether the last item is a `**name` catch-all.
    pub ends_with_double_star: bool,
}

/// Match the bracket at `open` against its closer, tracking nesting depth.
pub(crate) fn match_group(src: &str, open: usize) -> Result<Group, ScanError> {
    let bytes = src.as_bytes();
    let mut stack = vec![bytes[open]];
    let mut items = Vec::new();
    let mut expect_item = true;
    let mut stars = 0;
    let mut ends_with_double_star = false;
    let mut last_token_end = open + 1;
    let mut last_token = LastToken::Open;
    let mut pos = open + 1;

    while pos < bytes.len() {
        let (lexeme, end) = lex(bytes, pos)?;
        let top_level = stack.len() == 1;
        match lexeme {
            Lexeme::Newline | Lexeme::Whitespace | Lexeme::Comment => {
                pos = end;
                continue;
            }
            Lexeme::Word if top_level && expect_item && is_ident_start(bytes[pos]) => {
                items.push(src[pos..end].to_string());
                ends_with_double_star = stars >= 2;
                expect_item = false;
            }
            Lexeme::Punct(c @ (b'*' | b'/')) if top_level && expect_item => {
                if c == b'*' {
                    stars += 1;
                }
            }
            Lexeme::Punct(b',') if top_level => {
                expect_item = true;
                stars = 0;
            }
            Lexeme::Punct(c @ (b'(' | b'[' | b'{')) => {
                stack.push(c);
                expect_item = false;
            }
            Lexeme::Punct(c @ (b')' | b']' | b'}')) => {
                if stack.pop().and_then(closer_for) != Some(c) {
                    return Err(ScanError::Mismatched {
                        found: c as char,
                        offset: pos,
                    });
                }
                if stack.is_empty() {
                    return Ok(Group {
                        close: pos,
                        last_token_end,
                        last_token,
                        items,
                        ends_with_double_star,
                    });
                }
            }
            _ => expect_item = false,
        }
        last_token_end = end;
        last_token = match lexeme {
            Lexeme::Punct(b',') if top_level => LastToken::Comma,
            _ => LastToken::Other,
        };
        pos = end;
    }

    Err(ScanError::Unclosed {
        open: bytes[open] as char,
        offset: open,
    })
}

/// Start of the physical line following the one containing `pos`.
///
/// String literals that span lines are skipped whole, so a line inside a
/// docstring is never reported as a line start.
pub(crate) fn next_line(src: &str, mut pos: usize) -> usize {
    let bytes = src.as_bytes();
    while pos < bytes.len() {
        match lex(bytes, pos) {
            Ok((Lexeme::Newline, end)) => return end,
            Ok((_, end)) => pos = end,
            Err(_) => return line_after(bytes, pos),
        }
    }
    bytes.len()
}

/// Offset of the newline ending the logical line that starts at `pos`, or
/// the source length if the line runs to the end.
///
/// Newlines inside brackets, strings and after a continuation backslash do
/// not end a logical line.
pub(crate) fn logical_line_end(src: &str, mut pos: usize) -> usize {
    let bytes = src.as_bytes();
    let mut depth = 0usize;
    while pos < bytes.len() {
        match lex(bytes, pos) {
            Ok((Lexeme::Newline, _)) if depth == 0 => return pos,
            Ok((Lexeme::Punct(b'(' | b'[' | b'{'), end)) => {
                depth += 1;
                pos = end;
            }
            Ok((Lexeme::Punct(b')' | b']' | b'}'), end)) => {
                depth = depth.saturating_sub(1);
                pos = end;
            }
            Ok((_, end)) => pos = end,
            Err(_) => return line_end(bytes, pos),
        }
    }
    bytes.len()
}

/// If only whitespace and a comment remain on the line at `pos`, the start
/// of the next line.
pub(crate) fn rest_of_line_blank(src: &str, mut pos: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    while pos < bytes.len() {
        match lex(bytes, pos).ok()? {
            (Lexeme::Newline, end) => return Some(end),
            (Lexeme::Whitespace | Lexeme::Comment, end) => pos = end,
            _ => return None,
        }
    }
    Some(bytes.len())
}

fn line_end(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|&c| c == b'\n')
        .map_or(bytes.len(), |n| pos + n)
}

fn line_after(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|&c| c == b'\n')
        .map_or(bytes.len(), |n| pos + n + 1)
}
