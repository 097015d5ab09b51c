use dossier_core::CitedDocument;

use crate::types::LineEvent;

/// Prefix carried by every payload line
pub const DATA_PREFIX: &str = "data: ";

const ERROR_MARKER: &str = "[ERROR]";
const STATS_MARKER: &str = "[STATS]";
const DOCS_MARKER: &str = "[DOCS]";

/// Classify one decoded line into a protocol event.
///
/// Returns None for ignorable lines: blank lines, lines without the
/// `data: ` prefix, and documents annotations whose payload fails to
/// parse (those are logged and dropped; the stream keeps going).
///
/// Annotation values are trimmed; content deltas are not, since leading
/// whitespace in a delta is part of the response text.
pub fn classify_line(line: &str) -> Option<LineEvent> {
    if line.trim().is_empty() {
        return None;
    }

    let payload = line.strip_prefix(DATA_PREFIX)?;

    if let Some(rest) = payload.strip_prefix(ERROR_MARKER) {
        return Some(LineEvent::BackendError(rest.trim().to_string()));
    }

    if let Some(rest) = payload.strip_prefix(STATS_MARKER) {
        return Some(LineEvent::Stats(rest.trim().to_string()));
    }

    if let Some(rest) = payload.strip_prefix(DOCS_MARKER) {
        return match serde_json::from_str::<Vec<CitedDocument>>(rest.trim()) {
            Ok(documents) => Some(LineEvent::Documents(documents)),
            Err(e) => {
                tracing::warn!("dropping malformed documents payload: {}", e);
                None
            }
        };
    }

    Some(LineEvent::Delta(payload.to_string()))
}
