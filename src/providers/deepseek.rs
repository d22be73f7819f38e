//! DeepSeek provider implementation using the `/chat/completions` API.
//!
//! DeepSeek speaks the chat-completions wire format: a message list with
//! an optional leading `system` entry, bearer auth, first choice carries
//! the assistant reply.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AiConfig;

use super::{check_http_response, AiClient, ProviderError};

const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/chat/completions";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Chat completions request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation messages, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A message in chat-completions format.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: `system`, `user`, or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

/// Chat completions response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Response choices; the first one carries the reply.
    pub choices: Vec<ChatChoice>,
    /// Token usage.
    pub usage: Option<ChatUsage>,
}

/// A response choice.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// Assistant message for this choice.
    pub message: ChatResponseMessage,
}

/// Assistant message in a response choice.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    /// Reply text; absent on some refusal shapes.
    pub content: Option<String>,
}

/// Usage statistics.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ChatUsage {
    /// Prompt token count.
    pub prompt_tokens: Option<u32>,
    /// Completion token count.
    pub completion_tokens: Option<u32>,
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build a chat-completions request for one user message.
#[doc(hidden)]
pub fn build_request(
    model: &str,
    temperature: f64,
    max_tokens: u32,
    user_message: &str,
    system_prompt: Option<&str>,
) -> ChatRequest {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system_prompt {
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_owned(),
                content: system.to_owned(),
            });
        }
    }
    messages.push(ChatMessage {
        role: "user".to_owned(),
        content: user_message.to_owned(),
    });

    ChatRequest {
        model: model.to_owned(),
        messages,
        temperature,
        max_tokens,
    }
}

/// Parse a chat-completions response body into the reply text, trimmed.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the body cannot be deserialized or
/// contains no choices.
#[doc(hidden)]
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let resp: ChatResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("missing choices[0]".to_owned()))?;

    if let Some(usage) = resp.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens.unwrap_or(0),
            completion_tokens = usage.completion_tokens.unwrap_or(0),
            "chat completion usage"
        );
    }

    Ok(choice.message.content.unwrap_or_default().trim().to_owned())
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// DeepSeek chat-completions provider.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    client: reqwest::Client,
}

impl DeepSeekClient {
    /// Create a client with explicit settings.
    pub fn new(api_key: String, model: String, temperature: f64, max_tokens: u32) -> Self {
        Self {
            api_key,
            model,
            temperature,
            max_tokens,
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from AI configuration, resolving the API key from
    /// the environment variable the config names.
    ///
    /// # Errors
    ///
    /// Returns an error when the API key is unset or empty.
    pub fn from_config(config: &AiConfig) -> anyhow::Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(
            api_key,
            config.model.clone(),
            config.temperature,
            config.max_tokens,
        ))
    }
}

#[async_trait::async_trait]
impl AiClient for DeepSeekClient {
    async fn reply(
        &self,
        user_message: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, ProviderError> {
        let api_request = build_request(
            &self.model,
            self.temperature,
            self.max_tokens,
            user_message,
            system_prompt,
        );

        debug!(
            model = %self.model,
            chars = user_message.chars().count(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(DEEPSEEK_API_BASE)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&api_request)
            .send()
            .await?;

        let payload = check_http_response(response).await?;
        let reply = parse_response(&payload)?;

        debug!(chars = reply.chars().count(), "received chat completion reply");
        Ok(reply)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
