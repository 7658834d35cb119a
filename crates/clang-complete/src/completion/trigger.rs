//! Locates the member-access / scope-resolution chain immediately before a
//! cursor, from raw buffer text alone.
//!
//! This deliberately replicates C++-aware tokenization heuristics without a
//! real lexer: the chain is recognized purely by character classes, so it
//! stays total over arbitrary, possibly ill-formed, mid-edit buffers.

use once_cell::sync::Lazy;
use regex::Regex;

/// A whitespace-stripped access chain ending in `::`, `->` or `.`, anchored
/// at the 1-based (line, column) of the character immediately after the last
/// operator. Columns are byte-based, matching the clang convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerToken {
    pub text: String,
    pub line: u32,
    pub column: u32,
}

/// One or more segments, each a run of characters that cannot be part of an
/// access operator or expression punctuation, terminated by a true access
/// operator. Anchored at the end of the haystack so the leftmost match is the
/// longest chain suffix.
static ACCESS_CHAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:[^=+*/&^;{}<>:."'\-]+(?:::|->|\.))+$"#).expect("chain pattern"));

/// Individual characters that can end an expression before the cursor. The
/// halves of `::` and `->` are listed separately: the rightmost-delimiter
/// scan is per character, never per operator.
const DELIMITERS: &[char] = &[
    ':', '-', '>', '.', '{', '}', '=', '+', '*', '/', '&', '^', '<', ';',
];

/// Find the trigger token for a completion request at the given 1-based
/// cursor. Returns `None` when no access chain precedes the cursor; the
/// caller then falls back to a context-free request at the raw position.
///
/// Re-invoking with the returned anchor reproduces the same token and the
/// same anchor.
pub fn find_trigger(
    text: &str,
    line: u32,
    column: u32,
) -> Option<TriggerToken> {
    let cursor = byte_offset(text, line, column);
    let window = &text[..cursor];

    let delimiter = window.rfind(DELIMITERS)?;
    // Delimiters are ASCII, so `delimiter + 1` is a char boundary.
    let slice = &window[..delimiter + 1];
    let chain = match_chain(slice)?;

    let (line, column) = position_after(text, delimiter);
    Some(TriggerToken {
        text: strip_whitespace(chain),
        line,
        column,
    })
}

/// The longest access-chain suffix of `slice`, still carrying any interior
/// whitespace. `None` when the slice does not end in an access operator.
pub(crate) fn match_chain(slice: &str) -> Option<&str> {
    ACCESS_CHAIN.find(slice).map(|m| m.as_str())
}

/// Convert a 1-based (line, column) to a flat byte offset. A line past the
/// end of the buffer stops at the last line; the offset clamps to the buffer
/// length, so a malformed cursor degrades to "no trigger found" instead of
/// failing.
fn byte_offset(
    text: &str,
    line: u32,
    column: u32,
) -> usize {
    let mut line_start = 0usize;
    let mut current_line = 1u32;
    while current_line < line {
        match text[line_start..].find('\n') {
            Some(newline) => {
                line_start += newline + 1;
                current_line += 1;
            },
            None => break,
        }
    }

    let mut offset = line_start.saturating_add(column.saturating_sub(1) as usize).min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// 1-based (line, column) of the position immediately after the byte at
/// `delimiter`, recomputed by re-walking newlines.
fn position_after(
    text: &str,
    delimiter: usize,
) -> (u32, u32) {
    let before = &text[..delimiter];
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let column = (delimiter - line_start) as u32 + 2;
    (line, column)
}

fn strip_whitespace(token: &str) -> String {
    token.chars().filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{8}')).collect()
}

#[cfg(test)]
#[path = "../../tests/src/completion/trigger_tests.rs"]
mod tests;
