//! Reranking by asking the language model to score each block.
//!
//! When the judge cannot produce one score per block, every candidate gets
//! 0.0 and the incoming order is kept. That result is reported as
//! `RerankStatus::Degraded` so it cannot be mistaken for a uniform judgment.

use std::sync::Arc;

use quarry_answer::parser::extract_json_with;
use quarry_answer::prompts;
use quarry_core::errors::RerankError;
use quarry_core::models::{Candidate, RerankStatus, Reranking};
use quarry_core::traits::LanguageModel;
use serde_json::Value;

use crate::outcome;
use crate::strategy::RerankerStrategy;

pub struct LlmJudgeReranker {
    llm: Arc<dyn LanguageModel>,
}

impl std::fmt::Debug for LlmJudgeReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmJudgeReranker")
            .field("llm", &self.llm.name())
            .finish()
    }
}

impl LlmJudgeReranker {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }
}

/// A score is a bare number or an object carrying `relevance_score`.
fn block_score(item: &Value) -> Option<f64> {
    match item {
        Value::Number(n) => n.as_f64(),
        Value::Object(map) => map.get("relevance_score").and_then(Value::as_f64),
        _ => None,
    }
}

/// Accept `{"block_rankings": [...]}` or a bare list of scores.
fn accept_rankings(value: Value) -> Option<Vec<f64>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("block_rankings")? {
            Value::Array(items) => items,
            _ => return None,
        },
        _ => return None,
    };
    items.iter().map(block_score).collect()
}

impl RerankerStrategy for LlmJudgeReranker {
    fn name(&self) -> &str {
        "llm_judge"
    }

    fn score(&self, query: &str, documents: &[&str]) -> Result<Vec<f64>, RerankError> {
        let reply = self
            .llm
            .invoke(&prompts::rerank_prompt(query, documents))
            .map_err(|e| RerankError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let (scores, stage) = extract_json_with(&reply, accept_rankings).ok_or_else(|| {
            RerankError::MalformedResponse {
                reason: "no block rankings in judge reply".to_string(),
            }
        })?;
        tracing::debug!(stage = %stage, scores = scores.len(), "judge reply parsed");
        Ok(scores)
    }

    fn fallback(&self, candidates: &[Candidate], top_k: usize, error: &RerankError) -> Reranking {
        let zeros = vec![0.0; candidates.len()];
        Reranking {
            outcomes: outcome::scored(candidates, &zeros, top_k),
            status: RerankStatus::Degraded {
                strategy: self.name().to_string(),
                reason: error.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_block_rankings_objects() {
        let value = json!({"block_rankings": [
            {"reasoning": "on topic", "relevance_score": 0.9},
            {"reasoning": "off topic", "relevance_score": 0}
        ]});
        assert_eq!(accept_rankings(value), Some(vec![0.9, 0.0]));
    }

    #[test]
    fn accepts_bare_number_list() {
        assert_eq!(accept_rankings(json!([0.2, 1])), Some(vec![0.2, 1.0]));
    }

    #[test]
    fn rejects_entries_without_scores() {
        assert_eq!(accept_rankings(json!([{"reasoning": "x"}])), None);
        assert_eq!(accept_rankings(json!({"rankings": [0.1]})), None);
        assert_eq!(accept_rankings(json!("0.5")), None);
    }
}
