use serde::{Deserialize, Serialize};

use dossier_core::CitedDocument;

/// Outbound request body for the archive chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveQuery {
    pub text: String,
    pub chat_history: Vec<String>,
}

impl ArchiveQuery {
    pub fn new(text: impl Into<String>, chat_history: Vec<String>) -> Self {
        Self { text: text.into(), chat_history }
    }
}

/// One classified protocol line.
///
/// The wire protocol is newline-delimited `data: ` payloads with bracket
/// markers for annotations; the classifier turns each line into exactly
/// one of these variants so downstream code never dispatches on string
/// prefixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum LineEvent {
    /// Incremental response text to append
    Delta(String),
    /// Response-time annotation, whitespace trimmed
    Stats(String),
    /// Cited documents annotation
    Documents(Vec<CitedDocument>),
    /// Backend-reported error marker
    BackendError(String),
}

/// Events surfaced by a streaming response
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A classified protocol line
    Line(LineEvent),
    /// Transport-level failure; the stream ends after this
    TransportError(String),
    /// End of stream
    Done,
}

impl StreamEvent {
    pub fn delta(text: impl Into<String>) -> Self {
        StreamEvent::Line(LineEvent::Delta(text.into()))
    }

    pub fn stats(value: impl Into<String>) -> Self {
        StreamEvent::Line(LineEvent::Stats(value.into()))
    }

    pub fn documents(documents: Vec<CitedDocument>) -> Self {
        StreamEvent::Line(LineEvent::Documents(documents))
    }
}
