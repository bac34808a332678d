/// Reranking subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("model load failed: {model}: {reason}")]
    ModelLoadFailed { model: String, reason: String },

    #[error("reranker unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("rerank endpoint returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("rerank transport failed: {reason}")]
    Transport { reason: String },

    #[error("malformed rerank response: {reason}")]
    MalformedResponse { reason: String },

    #[error("score count mismatch: expected {expected}, got {actual}")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("rerank timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },
}
