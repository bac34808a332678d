use serde::{Deserialize, Serialize};

use super::Candidate;

/// One reranked candidate with its before/after positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankOutcome {
    pub candidate: Candidate,
    pub score: f64,
    /// The candidate's 1-based rank after fusion.
    pub previous_rank: usize,
    /// 1-based position after this rerank.
    pub new_rank: usize,
}

impl RerankOutcome {
    /// Positions moved up (positive) or down (negative).
    pub fn rank_shift(&self) -> i64 {
        self.previous_rank as i64 - self.new_rank as i64
    }
}

/// How a ranking was produced.
///
/// `Degraded` means the backend could not judge the list; its scores are a
/// fallback and must not be read as relevance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RerankStatus {
    Scored { strategy: String },
    PassThrough,
    Degraded { strategy: String, reason: String },
}

impl RerankStatus {
    pub fn is_scored(&self) -> bool {
        matches!(self, Self::Scored { .. })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// The result of one rerank call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reranking {
    pub outcomes: Vec<RerankOutcome>,
    pub status: RerankStatus,
}

impl Reranking {
    /// Candidates in their new order, with rerank provenance written in when the
    /// backend actually scored them.
    pub fn into_candidates(self) -> Vec<Candidate> {
        let scored = self.status.is_scored();
        self.outcomes
            .into_iter()
            .map(|outcome| {
                let mut candidate = outcome.candidate;
                if scored {
                    candidate.rerank_score = Some(outcome.score);
                    candidate.rerank_rank = Some(outcome.new_rank);
                }
                candidate
            })
            .collect()
    }
}
