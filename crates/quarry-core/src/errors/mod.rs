mod llm_error;
mod quarry_error;
mod rerank_error;
mod retrieval_error;

pub use llm_error::LanguageModelError;
pub use quarry_error::QuarryError;
pub use rerank_error::RerankError;
pub use retrieval_error::RetrievalError;

/// Convenience alias used throughout the workspace.
pub type QuarryResult<T> = Result<T, QuarryError>;
