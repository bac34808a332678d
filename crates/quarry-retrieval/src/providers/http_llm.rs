//! OpenAI-compatible chat-completions client.
//!
//! One user message per prompt, blocking `reqwest`, bearer auth. The API key
//! is read from the environment variable named in `LlmConfig`.

use std::time::Duration;

use quarry_core::config::LlmConfig;
use quarry_core::errors::{LanguageModelError, QuarryResult};
use quarry_core::traits::LanguageModel;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Language model reached over HTTP.
#[derive(Debug)]
pub struct HttpLanguageModel {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
}

impl HttpLanguageModel {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> QuarryResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| LanguageModelError::RequestFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Build from config, reading the API key from `config.api_key_env`.
    ///
    /// # Errors
    /// `LanguageModelError::MissingApiKey` when the variable is unset or blank.
    pub fn from_config(config: &LlmConfig) -> QuarryResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LanguageModelError::MissingApiKey {
                env_var: config.api_key_env.clone(),
            })?;
        Self::new(config, api_key)
    }
}

impl LanguageModel for HttpLanguageModel {
    fn invoke(&self, prompt: &str) -> QuarryResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| LanguageModelError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LanguageModelError::HttpStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: ChatResponse =
            response
                .json()
                .map_err(|e| LanguageModelError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LanguageModelError::EmptyResponse)?;

        tracing::debug!(model = %self.model, reply_chars = content.len(), "model replied");
        Ok(content)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
