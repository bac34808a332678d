//! The reranking contract shared by every backend.

use quarry_core::errors::RerankError;
use quarry_core::models::{Candidate, RerankStatus, Reranking};
use quarry_observability::tracing_setup::events;

use crate::outcome;

/// Fallback label recorded in degradation events.
pub const POSITIONAL_FALLBACK: &str = "positional order";

/// A second-pass relevance scorer over an already-fused ranking.
///
/// Implementors only provide `score`; `rerank` handles validation, sorting,
/// truncation and the fallback. A failing backend never fails the request.
pub trait RerankerStrategy: Send + Sync {
    /// Short backend name used in logs and `RerankStatus`.
    fn name(&self) -> &str;

    /// One relevance score per document, in document order.
    fn score(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, RerankError>;

    /// The ranking returned when `score` fails.
    fn fallback(&self, candidates: &[Candidate], top_k: usize, error: &RerankError) -> Reranking {
        outcome::degraded(self.name(), error, candidates, top_k)
    }

    /// Rerank `candidates` and keep the best `top_k`.
    ///
    /// Always returns `min(top_k, candidates.len())` outcomes.
    fn rerank(&self, query: &str, candidates: &[Candidate], top_k: usize) -> Reranking {
        let _span = quarry_observability::rerank_span!(self.name(), candidates.len()).entered();

        if candidates.is_empty() || top_k == 0 {
            return outcome::passthrough(&[], 0);
        }

        let result = if query.trim().is_empty() {
            Err(RerankError::Unavailable {
                reason: "empty query".to_string(),
            })
        } else {
            let documents: Vec<&str> = candidates.iter().map(|c| c.content.as_str()).collect();
            self.score(query, &documents)
                .and_then(|scores| validate_scores(scores, documents.len()))
        };

        match result {
            Ok(scores) => {
                let outcomes = outcome::scored(candidates, &scores, top_k);
                events::rerank_completed(self.name(), candidates.len(), outcomes.len());
                Reranking {
                    outcomes,
                    status: RerankStatus::Scored {
                        strategy: self.name().to_string(),
                    },
                }
            }
            Err(e) => {
                events::degradation_triggered(self.name(), &e.to_string(), POSITIONAL_FALLBACK);
                self.fallback(candidates, top_k, &e)
            }
        }
    }
}

/// Exactly one finite score per document.
pub(crate) fn validate_scores(scores: Vec<f64>, expected: usize) -> Result<Vec<f64>, RerankError> {
    if scores.len() != expected {
        return Err(RerankError::ScoreCountMismatch {
            expected,
            actual: scores.len(),
        });
    }
    if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(RerankError::MalformedResponse {
            reason: format!("non-finite score {bad}"),
        });
    }
    Ok(scores)
}
