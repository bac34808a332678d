use super::{LanguageModelError, RerankError, RetrievalError};

/// Top-level error type for the Quarry pipeline.
///
/// Only retrieval and language-model failures escape a request; rerank errors
/// are converted into a degraded ranking before they reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum QuarryError {
    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("rerank error: {0}")]
    RerankError(#[from] RerankError),

    #[error("language model error: {0}")]
    LanguageModelError(#[from] LanguageModelError),

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
