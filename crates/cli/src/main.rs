use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use dossier_core::{Config, LoggingConfig, init_logging};
use dossier_protocol::{ArchiveClient, ArchiveQuery, LineEvent, StreamEvent};
use dossier_session::{ChatSession, ExchangePhase, Outcome};
use dossier_ui::App;

/// dossier - a terminal client for the declassified JFK files archive
#[derive(Parser, Debug)]
#[command(name = "dossier")]
#[command(about = "Chat with the JFK assassination files from your terminal", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to dossier.toml (default: ./dossier.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive TUI session
    Start,
    /// Ask a single question and print the streamed answer
    Ask {
        /// The question to send to the archive
        #[arg(required = true, value_name = "QUESTION")]
        question: Vec<String>,

        /// Use the legacy whole-body endpoint instead of streaming
        #[arg(long)]
        no_stream: bool,
    },
    /// Show the current configuration
    Status,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from("dossier.toml"));
    let config = load_or_create_config(&config_path)?;

    let mut logging: LoggingConfig = config.logging.clone().into();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    init_logging(Some(logging)).context("Failed to initialize logging")?;

    if cli.verbose {
        eprintln!("{} Using config: {}", "Info:".blue().bold(), config_path.display());
        eprintln!("{} Endpoint: {}", "Info:".blue().bold(), config.backend.url.cyan());
    }

    match cli.command {
        Commands::Start => cmd_start(config).await?,
        Commands::Ask { question, no_stream } => cmd_ask(config, question.join(" "), no_stream).await?,
        Commands::Status => cmd_status(config),
    }

    Ok(())
}

/// Load config from file, materializing the example on first run
fn load_or_create_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::from_file(path).with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        std::fs::write(path, Config::example()).context("Failed to create config")?;
        eprintln!(
            "{} Created default config at {}",
            "Info:".blue().bold(),
            path.display()
        );
        Config::from_file(path).context("Failed to load created config")
    }
}

/// Start the interactive TUI session
async fn cmd_start(config: Config) -> Result<()> {
    let client = ArchiveClient::from_config(&config.backend).context("Failed to build archive client")?;

    let mut app = App::new(Arc::new(client), config.history.retain);
    app.run().await.context("TUI session failed")?;

    Ok(())
}

/// Ask one question and print the answer
async fn cmd_ask(config: Config, question: String, no_stream: bool) -> Result<()> {
    let client = ArchiveClient::from_config(&config.backend).context("Failed to build archive client")?;

    if no_stream {
        let answer = client.ask(&ArchiveQuery::new(question, Vec::new())).await?;
        println!("{}", answer);
        return Ok(());
    }

    let mut session = ChatSession::new(config.history.retain);
    session
        .run_exchange(&client, &question, |event| {
            if let StreamEvent::Line(LineEvent::Delta(text)) = event {
                print!("{}", text);
                let _ = std::io::stdout().flush();
            }
        })
        .await?;
    println!();

    let Some(message) = session.transcript().last() else {
        return Ok(());
    };

    if session.phase() == ExchangePhase::Settled(Outcome::Failed) {
        eprintln!("{}", "Connection to the archives was lost.".red());
    }

    if let Some(error) = session.last_backend_error() {
        eprintln!("{} {}", "Archive reported:".yellow().bold(), error);
    }

    if let Some(time) = &message.response_time {
        println!("{} {}", "Response time:".green().bold(), time);
    }

    if let Some(documents) = &message.documents
        && !documents.is_empty()
    {
        println!("{}", "Cited documents:".green().bold());
        for document in documents {
            println!("  - {}", document.path.cyan());
        }
    }

    Ok(())
}

/// Show the current configuration
fn cmd_status(config: Config) {
    println!("{}", "Dossier Status".green().bold().underline());
    println!();

    println!("{} Backend", "Info:".blue().bold());
    println!("  Endpoint: {}", config.backend.url.cyan());
    match config.backend.timeout_secs {
        Some(secs) => println!("  Timeout: {}s", secs.to_string().cyan()),
        None => println!("  Timeout: {}", "transport default".cyan()),
    }

    println!();
    println!("{} History", "Info:".blue().bold());
    println!("  Retained turns: {}", config.history.retain.to_string().cyan());

    println!();
    println!("{} Logging", "Info:".blue().bold());
    println!("  Level: {}", config.logging.level.cyan());
    println!("  Format: {}", config.logging.format.cyan());
    println!(
        "  File logging: {}",
        if config.logging.file.enabled { "enabled".cyan().to_string() } else { "disabled".cyan().to_string() }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["dossier", "status"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::try_parse_from(["dossier", "--config", "/path/to/dossier.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/dossier.toml")));
    }

    #[test]
    fn test_cli_start_command() {
        let cli = Cli::try_parse_from(["dossier", "start"]).unwrap();
        assert!(matches!(cli.command, Commands::Start));
    }

    #[test]
    fn test_cli_ask_command_joins_words() {
        let cli = Cli::try_parse_from(["dossier", "ask", "Who", "killed", "JFK?"]).unwrap();

        if let Commands::Ask { question, no_stream } = cli.command {
            assert_eq!(question.join(" "), "Who killed JFK?");
            assert!(!no_stream);
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_ask_no_stream_flag() {
        let cli = Cli::try_parse_from(["dossier", "ask", "--no-stream", "question"]).unwrap();

        if let Commands::Ask { no_stream, .. } = cli.command {
            assert!(no_stream);
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_ask_requires_question() {
        let result = Cli::try_parse_from(["dossier", "ask"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_create_config_existing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("dossier.toml");
        std::fs::write(&config_path, Config::example()).unwrap();

        let config = load_or_create_config(&config_path).unwrap();
        assert!(config.backend.url.starts_with("https://"));
    }

    #[test]
    fn test_load_or_create_config_materializes_example() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("dossier.toml");

        let config = load_or_create_config(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(config.history.retain, 4);

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[backend]"));
        assert!(content.contains("[history]"));
    }

    #[test]
    fn test_load_or_create_config_invalid() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("dossier.toml");
        std::fs::write(&config_path, "invalid toml").unwrap();

        let result = load_or_create_config(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_cmd_status() {
        let config = Config::from_toml_str(Config::example()).unwrap();
        cmd_status(config);
    }
}
