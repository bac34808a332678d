use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Which reranking backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RerankBackend {
    Passthrough,
    LocalModel,
    RemoteApi,
    LlmJudge,
}

impl fmt::Display for RerankBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Passthrough => "passthrough",
            Self::LocalModel => "local_model",
            Self::RemoteApi => "remote_api",
            Self::LlmJudge => "llm_judge",
        };
        f.write_str(name)
    }
}

/// Reranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Backend selected once at construction.
    pub backend: RerankBackend,
    /// Upper bound on a whole rerank call before the pipeline falls back.
    pub timeout_ms: u64,
    /// HTTP timeout for the remote endpoint.
    pub request_timeout_ms: u64,
    /// Remote rerank endpoint (Jina-compatible).
    pub endpoint: String,
    /// Model name sent to the remote endpoint.
    pub model: String,
    /// Environment variable holding the remote API key.
    pub api_key_env: String,
    /// Cross-encoder used by the local backend.
    pub local_model: String,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            backend: RerankBackend::RemoteApi,
            timeout_ms: defaults::DEFAULT_RERANK_TIMEOUT_MS,
            request_timeout_ms: defaults::DEFAULT_RERANK_REQUEST_TIMEOUT_MS,
            endpoint: defaults::DEFAULT_RERANK_ENDPOINT.to_string(),
            model: defaults::DEFAULT_RERANK_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_RERANK_API_KEY_ENV.to_string(),
            local_model: defaults::DEFAULT_LOCAL_RERANK_MODEL.to_string(),
        }
    }
}
