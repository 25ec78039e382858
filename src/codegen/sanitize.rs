//! Input sanitization for generated source.
//!
//! Everything in a registry snapshot is external data. Component names end
//! up as exported identifiers, author handles end up as directory names and
//! factory arguments, and free-form text ends up inside string literals.
//! This module is the single place where each of those is made safe.

use crate::error::{BlockforgeError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Valid JavaScript identifier (ASCII subset; the registry publishes ASCII names).
static JS_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid regex pattern"));

/// Author handles become directory names; keep them to a filesystem-safe set.
static SAFE_AUTHOR_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("Invalid regex pattern"));

/// Words that parse as identifiers but cannot be export names.
const JS_RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "import", "in", "instanceof", "let", "new", "null", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Validate a componentName for use as a generated export identifier.
///
/// The server is supposed to only publish valid names; this is the defensive
/// backstop that turns a bad name into a generation error instead of
/// silently emitting code that does not parse.
pub fn validate_component_name(name: &str, author: Option<&str>) -> Result<()> {
    if !JS_IDENTIFIER.is_match(name) || JS_RESERVED.contains(&name) {
        return Err(BlockforgeError::InvalidIdentifier {
            name: name.to_string(),
            author: author.map(str::to_string),
        });
    }
    Ok(())
}

/// Validate an author handle for use as a subdirectory name and factory
/// argument. Rejects empty handles, path separators, and traversal.
pub fn validate_author_handle(author: &str) -> Result<()> {
    if author.is_empty()
        || author.contains("..")
        || !SAFE_AUTHOR_HANDLE.is_match(author)
    {
        return Err(BlockforgeError::InvalidAuthor(author.to_string()));
    }
    Ok(())
}

/// Escape arbitrary text for embedding in a single-quoted JS string literal.
///
/// Escapes the backslash, the delimiter, literal newlines, and the JS line
/// separators U+2028/U+2029 (legal in JSON, fatal inside a string literal).
/// Everything else, Unicode included, passes through unchanged.
pub fn escape_js_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render text as a quoted literal, delimiter included.
pub fn js_string(input: &str) -> String {
    format!("'{}'", escape_js_string(input))
}

/// Render a tag list as a literal list. Empty stays `[]`, never null.
pub fn js_string_array(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| js_string(item)).collect();
    format!("[{}]", quoted.join(", "))
}
