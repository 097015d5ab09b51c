pub mod config;
pub mod docmeta;
pub mod error;
pub mod history;
pub mod logging;
pub mod transcript;

pub use config::{BackendConfig, Config, FileLoggingConfig, HistoryConfig, LoggingSection};
pub use error::{Error, Result};
pub use history::{DEFAULT_RETAIN, HistoryWindow};
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use transcript::{Author, CitedDocument, Message, Transcript};
