use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::history::DEFAULT_RETAIN;

/// Backend endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Chat endpoint URL
    pub url: String,

    /// Request timeout in seconds (no explicit timeout when absent)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// History window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Turns retained before each new exchange is appended
    #[serde(default = "default_retain")]
    pub retain: usize,
}

fn default_retain() -> usize {
    DEFAULT_RETAIN
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { retain: DEFAULT_RETAIN }
    }
}

/// Logging configuration (`[logging]` in dossier.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Default log level for stderr output
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stderr: pretty, json, compact
    #[serde(default = "default_log_format")]
    pub format: String,

    /// File logging
    #[serde(default)]
    pub file: FileLoggingConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format(), file: FileLoggingConfig::default() }
    }
}

/// File logging configuration (`[logging.file]`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    /// Enable daily-rolling file output under ~/.dossier/logs
    #[serde(default)]
    pub enabled: bool,
}

/// Root configuration structure for dossier.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub backend: BackendConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(toml_str).map_err(|e| crate::Error::Config(format!("TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        use crate::Error;

        if self.backend.url.trim().is_empty() {
            return Err(Error::Config("backend.url must not be empty".to_string()));
        }

        if !self.backend.url.starts_with("http://") && !self.backend.url.starts_with("https://") {
            return Err(Error::Config(format!(
                "backend.url must be an http(s) URL, got '{}'",
                self.backend.url
            )));
        }

        Ok(())
    }

    /// Example config written on first run
    pub fn example() -> &'static str {
        r#"# dossier configuration

[backend]
# Chat endpoint of the archive question-answering service
url = "https://sea-turtle-app-k2vwt.ondigitalocean.app/chat"
# timeout_secs = 120

[history]
# Prior turns retained before each new exchange is appended.
# The window holds at most retain + 2 turns after an exchange settles.
retain = 4

[logging]
level = "warn"
format = "pretty"

[logging.file]
enabled = false
"#
    }
}
