//! LLM provider abstraction layer.
//!
//! Defines the [`AiClient`] trait implemented by every provider backend
//! and the shared [`ProviderError`] type. Provider selection happens once
//! at startup through [`registry::ProviderRegistry`]; the rest of the bot
//! only ever sees `Arc<dyn AiClient>`.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

pub mod deepseek;
pub mod registry;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by AI providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport failure.
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response did not match the expected schema.
    #[error("provider response parse error: {0}")]
    Parse(String),
    /// Upstream provider responded with an error status.
    ///
    /// The status code stays in the display output so failure
    /// classification downstream can match on it.
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Core AI reply interface.
///
/// Implementations must be `Send + Sync` so handler tasks can share one
/// client across chats.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send one user message and return the assistant's text reply.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on API, network, or parse failure.
    async fn reply(
        &self,
        user_message: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, ProviderError>;

    /// The model identifier this client is configured for.
    fn model_id(&self) -> &str;
}

impl std::fmt::Debug for dyn AiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiClient")
            .field("model_id", &self.model_id())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// HTTP helpers (useful for all providers)
// ---------------------------------------------------------------------------

/// Check HTTP response status and return body text or a structured error.
///
/// # Errors
///
/// Returns `ProviderError::Request` on transport failure, `ProviderError::HttpStatus` on non-2xx.
pub async fn check_http_response(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
            body: sanitize_http_error_body(&body),
        });
    }
    Ok(body)
}

/// Token-shaped substrings that must never reach logs or user-visible
/// errors: provider API keys and Telegram bot tokens.
static SECRET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"sk-[A-Za-z0-9_\-]{16,}", r"\d{6,}:[A-Za-z0-9_\-]{30,}"]
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

fn sanitize_http_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sanitized = collapsed;
    for pattern in SECRET_PATTERNS.iter() {
        sanitized = pattern.replace_all(&sanitized, "[REDACTED]").into_owned();
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}
