use serde::{Deserialize, Serialize};

use super::defaults;

/// Language-model client configuration (OpenAI-compatible chat completions).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key. The key itself is never stored in config.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_LLM_ENDPOINT.to_string(),
            model: defaults::DEFAULT_LLM_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_LLM_API_KEY_ENV.to_string(),
            temperature: defaults::DEFAULT_LLM_TEMPERATURE,
            max_tokens: defaults::DEFAULT_LLM_MAX_TOKENS,
            timeout_secs: defaults::DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}
