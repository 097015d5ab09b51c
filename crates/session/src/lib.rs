pub mod session;

pub use session::{CONNECTION_ERROR_SUFFIX, ChatSession, ExchangePhase, Outcome};

pub use dossier_core::{Error, Result};
