//! Structured-output parsing.
//!
//! Models asked for JSON still wrap it in prose or Markdown fences now and
//! then, and the prose may itself contain braces. Every balanced `{ ... }`
//! in the reply is a candidate; the first one that fits the expected shape
//! wins.

use serde::de::DeserializeOwned;

use crate::error::BedrockError;

/// Balanced JSON-object candidates in `text`, in order of their opening
/// brace.
///
/// Each candidate runs from a `{` to its matching `}`, tracking string
/// literals and escapes. Openings with no matching close are skipped.
pub fn json_object_candidates(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('{')
        .filter_map(move |(start, _)| balanced_object_at(text, start))
}

fn balanced_object_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a model reply into `T`. `what` names the expected shape in
/// error messages.
///
/// Fails with `ResponseParse` when the reply holds no balanced object, and
/// with `SchemaViolation` (reporting the first candidate's error) when no
/// candidate deserializes.
pub fn parse_structured<T: DeserializeOwned>(text: &str, what: &str) -> Result<T, BedrockError> {
    let mut first_error = None;

    for candidate in json_object_candidates(text) {
        match serde_json::from_str(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(BedrockError::SchemaViolation(format!(
            "failed to parse {what}: {e}"
        ))),
        None => Err(BedrockError::ResponseParse(format!(
            "no JSON object in {what} response"
        ))),
    }
}
