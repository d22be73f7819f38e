//! Configuration loading and validation.
//!
//! Settings come from a TOML file (`./config.toml` or
//! `$STRAYLIGHT_CONFIG_PATH`) with environment overrides.
//! Precedence: env vars > config file > defaults.
//!
//! Secrets are referenced by environment variable name (`api_key_env`,
//! `bot_token_env`) and never stored in the file itself.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// System prompt used when the config does not provide one.
const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a friendly assistant in a Telegram chat. Keep answers short and to the point.";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AI provider settings.
    pub ai: AiConfig,
    /// Telegram transport settings.
    pub telegram: TelegramConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration with precedence env vars > TOML file > defaults.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::load_from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML string into config (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML does not match the config schema.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }

    fn load_from_file(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                toml::from_str(&contents)
                    .with_context(|| format!("failed to parse config at {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "failed to read config at {}: {e}",
                path.display()
            )),
        }
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function for testability.
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("STRAYLIGHT_AI_PROVIDER") {
            self.ai.provider = v;
        }
        if let Some(v) = env("STRAYLIGHT_AI_MODEL") {
            self.ai.model = v;
        }
        if let Some(v) = env("STRAYLIGHT_AI_TEMPERATURE") {
            match v.parse() {
                Ok(n) => self.ai.temperature = n,
                Err(_) => tracing::warn!(
                    var = "STRAYLIGHT_AI_TEMPERATURE",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("STRAYLIGHT_AI_MAX_TOKENS") {
            match v.parse() {
                Ok(n) => self.ai.max_tokens = n,
                Err(_) => tracing::warn!(
                    var = "STRAYLIGHT_AI_MAX_TOKENS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("STRAYLIGHT_SYSTEM_PROMPT") {
            self.ai.system_prompt = v;
        }
        if let Some(v) = env("STRAYLIGHT_REPLY_FORMAT") {
            match v.to_lowercase().as_str() {
                "html" => self.telegram.reply_format = DeliveryMode::Html,
                "plain" => self.telegram.reply_format = DeliveryMode::Plain,
                _ => tracing::warn!(
                    var = "STRAYLIGHT_REPLY_FORMAT",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("STRAYLIGHT_TELEGRAM_PROXY") {
            self.telegram.proxy = Some(v);
        }
        if let Some(v) = env("STRAYLIGHT_CLIENT_TIMEOUT_SECS") {
            match v.parse() {
                Ok(n) => self.telegram.client_timeout_seconds = n,
                Err(_) => tracing::warn!(
                    var = "STRAYLIGHT_CLIENT_TIMEOUT_SECS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
    }
}

/// Outbound message delivery mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Strip markdown and send with no parse mode.
    #[default]
    Plain,
    /// Convert markdown to Telegram HTML and send with HTML parse mode.
    Html,
}

/// AI provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Provider backend name, resolved through the provider registry.
    pub provider: String,
    /// Environment variable holding the provider API key.
    pub api_key_env: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens per reply.
    pub max_tokens: u32,
    /// System prompt sent before every user message. Empty disables it.
    pub system_prompt: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "deepseek".to_owned(),
            api_key_env: "DEEPSEEK_API_KEY".to_owned(),
            model: "deepseek-chat".to_owned(),
            temperature: 0.7,
            max_tokens: 1000,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
        }
    }
}

impl AiConfig {
    /// Resolve the API key from the environment variable named by
    /// `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns an error when the variable is unset or empty. The bot must
    /// never start with an empty key and fail later on the first call.
    pub fn resolve_api_key(&self) -> anyhow::Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(ref key) if !key.trim().is_empty() => Ok(key.trim().to_owned()),
            _ => Err(anyhow::anyhow!(
                "AI API key missing: set {} in the environment or .env",
                self.api_key_env
            )),
        }
    }
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Environment variable holding the bot token.
    pub bot_token_env: String,
    /// Outbound delivery mode.
    pub reply_format: DeliveryMode,
    /// HTTP client timeout in seconds.
    pub client_timeout_seconds: u64,
    /// Optional proxy URL for the Telegram API.
    pub proxy: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token_env: "TELEGRAM_BOT_TOKEN".to_owned(),
            reply_format: DeliveryMode::Plain,
            client_timeout_seconds: 30,
            proxy: None,
        }
    }
}

impl TelegramConfig {
    /// Resolve the bot token from the environment variable named by
    /// `bot_token_env`.
    ///
    /// # Errors
    ///
    /// Returns an error when the variable is unset or empty.
    pub fn resolve_bot_token(&self) -> anyhow::Result<String> {
        match std::env::var(&self.bot_token_env) {
            Ok(ref token) if !token.trim().is_empty() => Ok(token.trim().to_owned()),
            _ => Err(anyhow::anyhow!(
                "Telegram bot token missing: set {} in the environment or .env",
                self.bot_token_env
            )),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory override; defaults to `logs/` under [`data_dir`].
    pub dir: Option<PathBuf>,
}

/// Resolve the config file path: `$STRAYLIGHT_CONFIG_PATH` or
/// `./config.toml` in the working directory.
fn default_config_path() -> PathBuf {
    match std::env::var("STRAYLIGHT_CONFIG_PATH") {
        Ok(p) if !p.is_empty() => PathBuf::from(p),
        _ => PathBuf::from("config.toml"),
    }
}

/// Resolve the application data directory (`~/.straylight/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn data_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".straylight"))
}
