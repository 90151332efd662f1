//! Locating the insertion point inside the returned localization table.
//!
//! The localization script ends by returning one table literal, either
//! through a named variable (`local loc = { ... }` ... `return loc`) or
//! directly (`return { ... }`). New entries are spliced in immediately
//! before the table's closing brace.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Where and how to splice new entries into the table literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    /// Byte offset immediately before the table's closing brace.
    pub offset: usize,
    /// Whether a comma must precede the new entries.
    pub needs_separator: bool,
    /// Whether a line break must precede the new entries.
    pub needs_leading_newline: bool,
}

/// `return <identifier>` at the end of the file.
static NAMED_RETURN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"return\s+(\w+)\s*$").expect("Invalid named return regex"));

/// Direct `return {` form.
static TABLE_RETURN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"return\s*\{").expect("Invalid table return regex"));

/// Computes the [`InsertionPoint`] for the given localization file content.
///
/// # Errors
/// - [`Error::ReturnConventionNotFound`] if neither return form exists.
/// - [`Error::TableNotFound`] if `return <name>` exists but no
///   `<name> = {` definition does.
/// - [`Error::LiteralUnterminated`] if the table never closes.
pub fn locate_insertion(content: &str) -> Result<InsertionPoint> {
    let start = table_start(content)?;
    let offset = closing_brace(content, start)?;
    let (needs_separator, needs_leading_newline) = formatting_needs(&content[start..offset]);
    Ok(InsertionPoint {
        offset,
        needs_separator,
        needs_leading_newline,
    })
}

/// Byte offset just past the opening brace of the returned table.
///
/// Searches are last-match-wins, mirroring a backward scan from the end
/// of the file.
fn table_start(content: &str) -> Result<usize> {
    if let Some(caps) = NAMED_RETURN_REGEX.captures_iter(content).last() {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let definition = Regex::new(&format!(r"{}\s*=\s*\{{", regex::escape(name)))
            .expect("escaped identifier always forms a valid pattern");
        return match definition.find_iter(content).last() {
            Some(m) => Ok(m.end()),
            None => Err(Error::TableNotFound {
                name: name.to_string(),
            }),
        };
    }

    match TABLE_RETURN_REGEX.find_iter(content).last() {
        Some(m) => Ok(m.end()),
        None => Err(Error::ReturnConventionNotFound),
    }
}

/// Walks forward from `start` to the brace closing the table, tracking
/// nesting depth and skipping braces inside quoted strings.
fn closing_brace(content: &str, start: usize) -> Result<usize> {
    let mut depth = 1usize;
    let mut in_string = false;

    for (i, ch) in content[start..].char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Ok(start + i);
                }
            }
            _ => {}
        }
    }
    Err(Error::LiteralUnterminated)
}

/// One backward walk over the table body computes two independent facts:
/// whether the new entries need a preceding comma, and whether they need
/// a preceding line break.
///
/// Only `,`, `{` and `}` decide the separator: a comma means the last
/// entry is already terminated, an opening brace means the table is
/// empty so far, and a closing brace means an unterminated entry sits
/// before the insertion point. Other characters (trailing comments, a
/// bare value) are walked past; if none of the three is found, a
/// separator is needed exactly when the body has any content at all.
/// The newline track is separate: a newline seen before any
/// non-whitespace means the insertion point already sits on a fresh
/// line.
fn formatting_needs(body: &str) -> (bool, bool) {
    let mut needs_separator = body.chars().any(|ch| !ch.is_whitespace());
    let mut needs_leading_newline = true;
    let mut seen_non_whitespace = false;

    for ch in body.chars().rev() {
        match ch {
            ',' | '{' => {
                needs_separator = false;
                break;
            }
            '}' => {
                needs_separator = true;
                break;
            }
            '\n' if !seen_non_whitespace => needs_leading_newline = false,
            _ => {}
        }
        if !ch.is_whitespace() {
            seen_non_whitespace = true;
        }
    }
    (needs_separator, needs_leading_newline)
}
