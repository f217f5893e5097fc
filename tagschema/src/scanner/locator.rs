//! Locating a single type definition inside source text.
//!
//! The block boundary is found by counting raw `{` and `}` characters from the
//! header's opening brace. This is a deliberate approximation, not a grammar:
//! a brace inside a string or rune literal in the declaration will corrupt
//! the count.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{ExtractError, Result};

static TYPE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\btype\s+(\w+)\s+struct\s+\{").expect("type header pattern is valid")
});

/// Find the first `type <name> struct {` definition and return its block,
/// from the `type` keyword through the matching closing brace.
///
/// `type_name` is matched literally, so regex metacharacters in it never
/// widen the match. Returns `Ok(None)` when the type is not declared in `text`.
pub fn locate_type_block<'a>(type_name: &str, text: &'a str) -> Result<Option<&'a str>> {
    let pattern = format!(r"\btype\s+{}\s+struct\s+\{{", regex::escape(type_name));
    let header = Regex::new(&pattern)?;

    let Some(found) = header.find(text) else {
        log::debug!("type '{type_name}' not found");
        return Ok(None);
    };

    let mut depth = 1usize;
    for (offset, ch) in text[found.end()..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => continue,
        }
        if depth == 0 {
            let end = found.end() + offset + ch.len_utf8();
            return Ok(Some(&text[found.start()..end]));
        }
    }

    log::warn!("type '{type_name}' body is never closed");
    Err(ExtractError::UnbalancedBraces {
        type_name: type_name.to_string(),
    })
}

/// Names of all types declared with a `type <name> struct {` header, in
/// textual order and without duplicates.
pub fn type_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TYPE_HEADER.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}
