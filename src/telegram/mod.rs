//! Telegram adapter: bot client construction, dispatcher, command routing.
//!
//! Thin plumbing around teloxide: each incoming text message triggers one
//! AI call, one formatting call, and one send. The formatter is pure, so
//! concurrent handler tasks need no coordination.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::providers::AiClient;

pub mod commands;
pub mod reply;

/// Characters of inbound text retained in logs.
const LOG_INBOUND_CHARS: usize = 500;

/// Characters of outbound text retained in logs.
const LOG_OUTBOUND_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// Shared state for handler injection
// ---------------------------------------------------------------------------

/// Shared dependencies injected into teloxide handlers via `dptree::deps!`.
#[derive(Clone)]
struct SharedState {
    config: Arc<Config>,
    ai: Arc<dyn AiClient>,
}

// ---------------------------------------------------------------------------
// Bot construction
// ---------------------------------------------------------------------------

/// Build the Telegram bot client from configuration.
///
/// Applies the configured client timeout and optional proxy on top of
/// teloxide's default reqwest settings.
///
/// # Errors
///
/// Returns an error when the proxy URL is invalid or the HTTP client
/// cannot be built.
pub fn build_bot(bot_token: &str, config: &Config) -> anyhow::Result<Bot> {
    let mut builder = teloxide::net::default_reqwest_settings()
        .timeout(Duration::from_secs(config.telegram.client_timeout_seconds));

    if let Some(ref proxy) = config.telegram.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .with_context(|| format!("invalid telegram proxy URL: {proxy}"))?;
        builder = builder.proxy(proxy);
    }

    let client = builder
        .build()
        .context("failed to build telegram HTTP client")?;
    Ok(Bot::with_client(bot_token, client))
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Run the bot until stopped (Ctrl+C).
///
/// Long-polls for updates; the underlying listener retries transient
/// network failures with backoff, so a dropped connection resumes polling
/// instead of ending the process.
pub async fn run_bot(bot: Bot, config: Arc<Config>, ai: Arc<dyn AiClient>) -> anyhow::Result<()> {
    let shared = SharedState { config, ai };

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    info!("telegram dispatcher starting");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![shared])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

// ---------------------------------------------------------------------------
// Message handler
// ---------------------------------------------------------------------------

/// Handle one incoming Telegram message.
///
/// Routes slash commands to their handlers; everything else goes to the
/// AI client and the reply comes back rendered for the configured
/// delivery mode. An AI failure turns into a fixed apology; the error
/// detail is logged, never shown to the user.
async fn handle_message(bot: Bot, msg: Message, state: SharedState) -> ResponseResult<()> {
    let chat_id = msg.chat.id;

    let Some(text) = msg.text() else {
        debug!(%chat_id, "non-text message, ignoring");
        return Ok(());
    };

    let text = text.trim();
    if text.is_empty() {
        bot.send_message(chat_id, "Send me a text message.").await?;
        return Ok(());
    }

    if let Some(command) = text.strip_prefix('/') {
        bot.send_message(chat_id, dispatch_command(command)).await?;
        return Ok(());
    }

    info!(
        %chat_id,
        text = %truncate_chars(text, LOG_INBOUND_CHARS),
        "incoming message"
    );

    let system_prompt = state.config.ai.system_prompt.trim();
    let system_prompt = (!system_prompt.is_empty()).then_some(system_prompt);

    match state.ai.reply(text, system_prompt).await {
        Ok(raw) => {
            let rendered = reply::render(&raw, state.config.telegram.reply_format);
            if rendered.text.is_empty() {
                warn!(%chat_id, "AI reply rendered to empty text, nothing to send");
                return Ok(());
            }

            info!(
                %chat_id,
                text = %truncate_chars(&rendered.text, LOG_OUTBOUND_CHARS),
                "outgoing message"
            );

            let mut request = bot.send_message(chat_id, rendered.text);
            if rendered.html {
                request = request.parse_mode(ParseMode::Html);
            }
            request.await?;
        }
        Err(e) => {
            error!(%chat_id, error = %e, "AI call failed");
            bot.send_message(chat_id, reply::apology_for(&e.to_string()))
                .await?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Command dispatcher
// ---------------------------------------------------------------------------

/// Route a slash command (leading `/` already stripped) to its handler.
///
/// Bot-mention suffixes like `help@straylight_bot` are stripped before
/// dispatch; unknown commands get a short fallback response.
pub fn dispatch_command(input: &str) -> String {
    let full_command = match input.split_once(' ') {
        Some((cmd, _args)) => cmd,
        None => input,
    };
    let command = full_command.split('@').next().unwrap_or(full_command);

    match command {
        "start" => commands::handle_start(),
        "help" => commands::handle_help(),
        "ask" => commands::handle_ask(),
        "about" => commands::handle_about(),
        _ => commands::handle_unknown(command),
    }
}

/// Truncate text to a character budget for logging.
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_owned()
    } else {
        let shortened: String = text.chars().take(limit).collect();
        format!("{shortened}...")
    }
}
