//! Parsing of the mapping text returned by a provider.

use merger_model::FieldMapping;

use crate::error::{MappingError, Result};

/// Parses a mapping payload such as `{"Name": ["Full Name", "name"]}`.
///
/// Surrounding whitespace is ignored, and so is a single Markdown code fence
/// around the object (chat models often add one). An empty object parses
/// successfully; deciding whether an empty mapping is acceptable is up to the
/// caller.
pub fn parse_mapping_payload(payload: &str) -> Result<FieldMapping> {
    let body = strip_code_fence(payload.trim());
    serde_json::from_str(body).map_err(|source| MappingError::Parse { source })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    match rest.find('\n') {
        Some(newline) if !rest[..newline].trim_start().starts_with('{') => {
            rest[newline + 1..].trim()
        }
        Some(_) => rest.trim(),
        None => rest
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .trim(),
    }
}
