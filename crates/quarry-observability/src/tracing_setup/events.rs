//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a completed hybrid retrieval.
pub fn retrieval_completed(dense_hits: usize, sparse_hits: usize, fused: usize) {
    tracing::info!(
        event = "retrieval_completed",
        dense_hits = dense_hits,
        sparse_hits = sparse_hits,
        fused = fused,
        "hybrid retrieval completed"
    );
}

/// Log a completed rerank.
pub fn rerank_completed(strategy: &str, candidates: usize, kept: usize) {
    tracing::info!(
        event = "rerank_completed",
        strategy = %strategy,
        candidates = candidates,
        kept = kept,
        "rerank completed"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a model reply that needed recovery beyond a plain parse.
pub fn parse_recovered(stage: &str, reply_chars: usize) {
    tracing::warn!(
        event = "parse_recovered",
        stage = %stage,
        reply_chars = reply_chars,
        "model reply recovered by fallback parser"
    );
}

/// Log a one-time model load.
pub fn model_loaded(model: &str, elapsed_ms: u64) {
    tracing::info!(
        event = "model_loaded",
        model = %model,
        elapsed_ms = elapsed_ms,
        "rerank model loaded"
    );
}
