//! Pull a structured document out of a fetched page

use super::Document;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// `var <identifier> = `
static ASSIGNMENT_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var ([A-Za-z_$][\w$]*) = ").expect("assignment start pattern is valid"));

/// Value up to the first `;</script>` on the same line
static ASSIGNMENT_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?);</script>").expect("assignment value pattern is valid"));

/// Document parse errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("script variable '{0}' not found in page")]
    MissingAssignment(String),

    #[error("invalid document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse raw JSON text into a [`Document`]
pub fn parse_document(raw: &str) -> Result<Document, DocumentError> {
    Ok(serde_json::from_str(raw)?)
}

/// Raw right-hand side of `var <name> = ...;</script>` in an HTML page
///
/// Only the first complete assignment is returned. The match stops at the first
/// `;</script>`, so the value has to be written on a single line.
pub fn extract_script_assignment<'a>(html: &'a str, variable: &str) -> Option<&'a str> {
    ASSIGNMENT_START
        .captures_iter(html)
        .filter(|caps| &caps[1] == variable)
        .find_map(|caps| {
            let rest = &html[caps.get(0)?.end()..];
            ASSIGNMENT_VALUE.captures(rest)?.get(1).map(|m| m.as_str())
        })
}

/// Extract and parse the document assigned to `variable` in `html`
pub fn parse_embedded_document(html: &str, variable: &str) -> Result<Document, DocumentError> {
    let raw = extract_script_assignment(html, variable)
        .ok_or_else(|| DocumentError::MissingAssignment(variable.to_string()))?;
    parse_document(raw)
}
