use regex::Regex;
use std::sync::OnceLock;

use crate::transcript::CitedDocument;

static CLASSIFICATION: OnceLock<Regex> = OnceLock::new();
static DATE: OnceLock<Regex> = OnceLock::new();

fn classification_pattern() -> &'static Regex {
    CLASSIFICATION.get_or_init(|| Regex::new(r"(?i)(CONFIDENTIAL|TOP SECRET|SECRET|UNCLASSIFIED)").unwrap())
}

fn date_pattern() -> &'static Regex {
    DATE.get_or_init(|| {
        Regex::new(r"\b(0?[1-9]|1[0-2])[/\-](0?[1-9]|[12]\d|3[01])[/\-](19\d{2}|20\d{2})\b").unwrap()
    })
}

/// Display identifier for a cited document: the final path segment with
/// its extension stripped.
pub fn document_id(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_string(),
        _ => name.to_string(),
    }
}

/// First classification marker found in the document text, uppercased.
pub fn classification(doc: &CitedDocument) -> Option<String> {
    classification_pattern().find(&doc.text).map(|m| m.as_str().to_uppercase())
}

/// First date shaped like `MM/DD/YYYY` (or `-` separated) in the text.
pub fn first_date(doc: &CitedDocument) -> Option<String> {
    date_pattern().find(&doc.text).map(|m| m.as_str().to_string())
}
