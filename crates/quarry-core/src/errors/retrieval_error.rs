/// Retrieval subsystem errors. Fatal for the request that raised them.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("dense search failed: {reason}")]
    DenseSearchFailed { reason: String },

    #[error("sparse search failed: {reason}")]
    SparseSearchFailed { reason: String },

    #[error("malformed {backend} results: {reason}")]
    MalformedResults { backend: String, reason: String },
}
