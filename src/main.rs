//! Straylight CLI entry point.
//!
//! Provides `run`, `check-config`, and `render` subcommands for running
//! the bot, validating configuration, and previewing formatter output.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use straylight::config::Config;
use straylight::providers::registry::ProviderRegistry;
use straylight::{format, logging, telegram};

/// Straylight — Telegram chat bot backed by a hosted LLM.
#[derive(Parser)]
#[command(name = "straylight", version, about)]
struct Cli {
    /// Path to the configuration file (default: ./config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Run the bot (long polling).
    Run,
    /// Load and validate configuration, then exit.
    CheckConfig,
    /// Read markdown on stdin and print the formatted output.
    Render {
        /// Output mode.
        #[arg(long, value_enum, default_value = "html")]
        mode: RenderMode,
    },
}

/// Output mode for the `render` subcommand.
#[derive(Clone, Copy, ValueEnum)]
enum RenderMode {
    /// Telegram HTML.
    Html,
    /// Plain text with markdown stripped.
    Plain,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up .env before anything reads the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Command::Run => handle_run(cli.config).await,
        Command::CheckConfig => handle_check_config(cli.config),
        Command::Render { mode } => handle_render(mode),
    }
}

/// Run the bot: wire config → provider registry → AI client → dispatcher.
async fn handle_run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_path.as_deref()).context("failed to load configuration")?;

    let _logging_guard = logging::init_production(&config.logging)?;

    info!(version = env!("CARGO_PKG_VERSION"), "straylight starting");

    let registry = ProviderRegistry::with_defaults();
    let ai = registry
        .create(&config.ai)
        .context("failed to create AI client")?;
    info!(provider = %config.ai.provider, model = %ai.model_id(), "AI provider ready");

    let bot_token = config.telegram.resolve_bot_token()?;
    let bot = telegram::build_bot(&bot_token, &config)?;

    telegram::run_bot(bot, Arc::new(config), ai).await
}

/// Validate configuration: load it, resolve the provider and both
/// secrets, and print a summary without revealing them.
fn handle_check_config(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    logging::init_cli();

    let config = Config::load(config_path.as_deref()).context("failed to load configuration")?;

    let registry = ProviderRegistry::with_defaults();
    let ai = registry
        .create(&config.ai)
        .context("failed to create AI client")?;
    let bot_token = config.telegram.resolve_bot_token()?;

    println!("provider:     {} ({})", config.ai.provider, ai.model_id());
    println!("reply format: {:?}", config.telegram.reply_format);
    println!("bot token:    set ({} chars)", bot_token.chars().count());
    println!("configuration OK");
    Ok(())
}

/// Format markdown from stdin and print the result.
fn handle_render(mode: RenderMode) -> anyhow::Result<()> {
    logging::init_cli();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let output = match mode {
        RenderMode::Html => format::to_telegram_html(&input),
        RenderMode::Plain => format::strip_to_plain(&input),
    };
    println!("{output}");
    Ok(())
}
