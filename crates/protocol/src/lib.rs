pub mod classify;
pub mod client;
pub mod decode;
pub mod mock;
pub mod types;

pub use classify::{DATA_PREFIX, classify_line};
pub use client::{ArchiveClient, Backend, EventStream, clean_legacy_body};
pub use decode::LineDecoder;
pub use mock::ScriptedBackend;
pub use types::{ArchiveQuery, LineEvent, StreamEvent};

pub use dossier_core::{CitedDocument, Error, Result};
