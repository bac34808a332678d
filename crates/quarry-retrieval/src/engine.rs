//! The question-answering pipeline.
//!
//! ```text
//! ask(question)
//!  ├── classify ─────────────► AnswerType
//!  ├── embed + dense search ─┐
//!  ├── sparse search ────────┴► fuse ──► rerank (bounded) ──► context
//!  ├── answer prompt ──► LanguageModel::invoke
//!  └── parse ──► AskResponse { answer, sources, structured, provenance }
//! ```
//!
//! Retrieval and model failures fail the request. Reranking never does: a
//! failing or slow reranker leaves the fused order in place.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use quarry_answer::{classify, parse_with_stage, prompts};
use quarry_core::config::{QuarryConfig, RetrievalConfig};
use quarry_core::constants::NOT_FOUND_ANSWER;
use quarry_core::errors::{QuarryError, QuarryResult, RerankError, RetrievalError};
use quarry_core::models::{
    AskResponse, Candidate, DegradationEvent, FinalAnswer, RerankStatus, Reranking, SearchHit,
};
use quarry_core::traits::{DenseSearch, Embedder, LanguageModel, SparseSearch};
use quarry_observability::tracing_setup::events;
use quarry_rerank::strategy::POSITIONAL_FALLBACK;
use quarry_rerank::{create_reranker, outcome, RerankerStrategy};
use uuid::Uuid;

use crate::context;
use crate::fusion;

/// Candidates that survived retrieval, with how they were ranked.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub candidates: Vec<Candidate>,
    pub rerank_status: RerankStatus,
    pub degradations: Vec<DegradationEvent>,
}

/// Hybrid retrieval plus answer generation over injected collaborators.
pub struct RetrievalPipeline {
    embedder: Arc<dyn Embedder>,
    dense: Arc<dyn DenseSearch>,
    sparse: Arc<dyn SparseSearch>,
    reranker: Arc<dyn RerankerStrategy>,
    llm: Arc<dyn LanguageModel>,
    config: RetrievalConfig,
    rerank_timeout: Duration,
}

impl RetrievalPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        dense: Arc<dyn DenseSearch>,
        sparse: Arc<dyn SparseSearch>,
        reranker: Arc<dyn RerankerStrategy>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            embedder,
            dense,
            sparse,
            reranker,
            llm,
            config: RetrievalConfig::default(),
            rerank_timeout: Duration::from_millis(
                quarry_core::config::defaults::DEFAULT_RERANK_TIMEOUT_MS,
            ),
        }
    }

    /// Build the pipeline and its reranker from configuration.
    pub fn from_config(
        config: &QuarryConfig,
        embedder: Arc<dyn Embedder>,
        dense: Arc<dyn DenseSearch>,
        sparse: Arc<dyn SparseSearch>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        let reranker = create_reranker(&config.rerank, Some(Arc::clone(&llm)));
        Self::new(embedder, dense, sparse, reranker, llm)
            .with_config(config.retrieval.clone())
            .with_rerank_timeout(Duration::from_millis(config.rerank.timeout_ms))
    }

    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_rerank_timeout(mut self, timeout: Duration) -> Self {
        self.rerank_timeout = timeout;
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn reranker(&self) -> &Arc<dyn RerankerStrategy> {
        &self.reranker
    }

    /// Fused and optionally reranked candidates for `query`, best first.
    pub fn hybrid_search(
        &self,
        query: &str,
        top_k: usize,
        use_rerank: bool,
    ) -> QuarryResult<Vec<Candidate>> {
        Ok(self.retrieve(query, top_k, use_rerank)?.candidates)
    }

    /// `hybrid_search` with the rerank status and degradations kept.
    pub fn retrieve(&self, query: &str, top_k: usize, use_rerank: bool) -> QuarryResult<Retrieval> {
        if top_k == 0 {
            return Err(QuarryError::InvalidRequest {
                reason: "top_k must be at least 1".to_string(),
            });
        }
        let _span = quarry_observability::retrieval_span!(query, top_k).entered();

        let fetch = top_k.saturating_mul(self.config.fusion_multiplier.max(1));
        let (dense, sparse) = rayon::join(
            || self.dense_hits(query, fetch),
            || self.sparse_hits(query, fetch),
        );
        let (dense, sparse) = (dense?, sparse?);
        let (dense_count, sparse_count) = (dense.len(), sparse.len());

        let fused = fusion::fuse(dense, sparse, self.config.vector_weight, fetch);
        events::retrieval_completed(dense_count, sparse_count, fused.len());

        let reranking = if use_rerank {
            self.rerank_bounded(query, fused, top_k)
        } else {
            outcome::passthrough(&fused, top_k)
        };

        let degradations = match &reranking.status {
            RerankStatus::Degraded { strategy, reason } => vec![DegradationEvent::now(
                format!("rerank.{strategy}"),
                reason.clone(),
                POSITIONAL_FALLBACK,
            )],
            _ => Vec::new(),
        };
        let rerank_status = reranking.status.clone();

        Ok(Retrieval {
            candidates: reranking.into_candidates(),
            rerank_status,
            degradations,
        })
    }

    /// Answer `question` from the top `top_k` retrieved candidates.
    ///
    /// # Errors
    /// Retrieval failures, language-model failures, and invalid requests.
    /// A malformed model reply is not an error.
    pub fn ask(&self, question: &str, top_k: usize, use_rerank: bool) -> QuarryResult<AskResponse> {
        if question.trim().is_empty() {
            return Err(QuarryError::InvalidRequest {
                reason: "question is empty".to_string(),
            });
        }

        let request_id = Uuid::new_v4();
        let answer_type = classify(question);
        let _span = quarry_observability::ask_span!(request_id, answer_type).entered();

        let retrieval = self.retrieve(question, top_k, use_rerank)?;
        let context = context::build_context(&retrieval.candidates);
        let prompt = prompts::answer_prompt(answer_type, &context, question);

        let reply = {
            let _llm = quarry_observability::llm_span!(self.llm.name(), prompt.len()).entered();
            self.llm.invoke(&prompt)?
        };

        let parsed = parse_with_stage(&reply);
        let answer = if parsed.answer.final_answer.is_blank() {
            FinalAnswer::text(NOT_FOUND_ANSWER)
        } else {
            parsed.answer.final_answer.clone()
        };

        Ok(AskResponse {
            request_id,
            answer,
            answer_type,
            sources: context::sources(&retrieval.candidates),
            structured: parsed.answer,
            parse_stage: parsed.stage,
            candidates: retrieval.candidates,
            rerank_status: retrieval.rerank_status,
            degradations: retrieval.degradations,
        })
    }

    /// `ask` with the configured default `top_k` and rerank flag.
    pub fn ask_default(&self, question: &str) -> QuarryResult<AskResponse> {
        self.ask(question, self.config.default_top_k, self.config.use_rerank)
    }

    fn dense_hits(&self, query: &str, k: usize) -> QuarryResult<Vec<SearchHit>> {
        let vector = self
            .embedder
            .embed(query)
            .map_err(|e| as_retrieval_error(e, |reason| RetrievalError::EmbeddingFailed { reason }))?;
        let hits = self
            .dense
            .dense_search(&vector, k)
            .map_err(|e| as_retrieval_error(e, |reason| RetrievalError::DenseSearchFailed { reason }))?;
        validate_hits("dense", hits)
    }

    fn sparse_hits(&self, query: &str, k: usize) -> QuarryResult<Vec<SearchHit>> {
        let hits = self
            .sparse
            .sparse_search(query, k)
            .map_err(|e| as_retrieval_error(e, |reason| RetrievalError::SparseSearchFailed { reason }))?;
        validate_hits("sparse", hits)
    }

    /// Rerank on a worker thread, giving up after `rerank_timeout`.
    ///
    /// A timed-out worker is abandoned; its result is dropped when it finishes.
    fn rerank_bounded(&self, query: &str, fused: Vec<Candidate>, top_k: usize) -> Reranking {
        let (tx, rx) = mpsc::channel();
        let reranker = Arc::clone(&self.reranker);
        let worker_query = query.to_string();
        let worker_candidates = fused.clone();

        let spawned = thread::Builder::new()
            .name("quarry-rerank".to_string())
            .spawn(move || {
                let _ = tx.send(reranker.rerank(&worker_query, &worker_candidates, top_k));
            });

        let failure = match spawned {
            Err(e) => RerankError::Unavailable {
                reason: format!("rerank worker did not start: {e}"),
            },
            Ok(_) => match rx.recv_timeout(self.rerank_timeout) {
                Ok(reranking) => return reranking,
                Err(RecvTimeoutError::Timeout) => RerankError::Timeout {
                    elapsed_ms: self.rerank_timeout.as_millis() as u64,
                },
                Err(RecvTimeoutError::Disconnected) => RerankError::Unavailable {
                    reason: "rerank worker exited without a result".to_string(),
                },
            },
        };

        let strategy = self.reranker.name();
        events::degradation_triggered(strategy, &failure.to_string(), POSITIONAL_FALLBACK);
        outcome::degraded(strategy, &failure, &fused, top_k)
    }
}

/// Keep retrieval errors as they are; wrap anything else with `wrap`.
fn as_retrieval_error(
    err: QuarryError,
    wrap: impl FnOnce(String) -> RetrievalError,
) -> QuarryError {
    match err {
        QuarryError::RetrievalError(_) => err,
        other => wrap(other.to_string()).into(),
    }
}

/// Reject hits with an empty id or a non-finite score.
fn validate_hits(backend: &str, hits: Vec<SearchHit>) -> QuarryResult<Vec<SearchHit>> {
    if let Some(bad) = hits
        .iter()
        .find(|h| h.id.trim().is_empty() || !h.score.is_finite())
    {
        return Err(RetrievalError::MalformedResults {
            backend: backend.to_string(),
            reason: format!("hit id {:?} with score {}", bad.id, bad.score),
        }
        .into());
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_ids_and_nan_scores() {
        assert!(validate_hits("dense", vec![SearchHit::new("", "x", 0.5)]).is_err());
        assert!(validate_hits("dense", vec![SearchHit::new("a", "x", f64::NAN)]).is_err());
        assert!(validate_hits("dense", vec![SearchHit::new("a", "x", 0.5)]).is_ok());
    }

    #[test]
    fn non_retrieval_errors_are_wrapped() {
        let err = as_retrieval_error(
            QuarryError::ConfigError("bad".into()),
            |reason| RetrievalError::EmbeddingFailed { reason },
        );
        assert!(matches!(
            err,
            QuarryError::RetrievalError(RetrievalError::EmbeddingFailed { .. })
        ));

        let kept = as_retrieval_error(
            RetrievalError::SparseSearchFailed {
                reason: "down".into(),
            }
            .into(),
            |reason| RetrievalError::EmbeddingFailed { reason },
        );
        assert!(matches!(
            kept,
            QuarryError::RetrievalError(RetrievalError::SparseSearchFailed { .. })
        ));
    }
}
