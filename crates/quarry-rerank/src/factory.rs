//! Backend selection, done once at construction.

use std::sync::Arc;

use quarry_core::config::{RerankBackend, RerankConfig};
use quarry_core::traits::LanguageModel;

use crate::llm_judge::LlmJudgeReranker;
use crate::local::LocalModelReranker;
use crate::passthrough::PassThroughReranker;
use crate::remote::RemoteApiReranker;
use crate::strategy::RerankerStrategy;

/// Build the configured reranker.
///
/// The LLM judge needs a language model; without one the passthrough
/// reranker is returned instead. The local backend is shared process-wide.
pub fn create_reranker(
    config: &RerankConfig,
    llm: Option<Arc<dyn LanguageModel>>,
) -> Arc<dyn RerankerStrategy> {
    tracing::info!(backend = %config.backend, "creating reranker");
    match config.backend {
        RerankBackend::Passthrough => Arc::new(PassThroughReranker),
        RerankBackend::LocalModel => LocalModelReranker::shared(config),
        RerankBackend::RemoteApi => Arc::new(RemoteApiReranker::from_config(config)),
        RerankBackend::LlmJudge => match llm {
            Some(llm) => Arc::new(LlmJudgeReranker::new(llm)),
            None => {
                tracing::warn!("llm_judge reranker requested without a language model; using passthrough");
                Arc::new(PassThroughReranker)
            }
        },
    }
}
