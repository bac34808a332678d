//! Building `RerankOutcome` lists from candidates and scores.

use std::cmp::Ordering;

use quarry_core::models::{Candidate, RerankOutcome, RerankStatus, Reranking};

/// Score that keeps the incoming order: `1 / (position + 1)`.
pub fn positional_score(position: usize) -> f64 {
    1.0 / (position as f64 + 1.0)
}

/// Outcomes in incoming order with positional scores, truncated to `top_k`.
pub fn positional(candidates: &[Candidate], top_k: usize) -> Vec<RerankOutcome> {
    candidates
        .iter()
        .take(top_k)
        .enumerate()
        .map(|(i, candidate)| RerankOutcome {
            candidate: candidate.clone(),
            score: positional_score(i),
            previous_rank: candidate.original_rank,
            new_rank: i + 1,
        })
        .collect()
}

/// Outcomes sorted by descending score, truncated to `top_k`.
///
/// The sort is stable, so equal scores keep their incoming order.
/// `scores[i]` belongs to `candidates[i]`; the caller checks the lengths match.
pub fn scored(candidates: &[Candidate], scores: &[f64], top_k: usize) -> Vec<RerankOutcome> {
    let mut order: Vec<usize> = (0..candidates.len().min(scores.len())).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });

    order
        .into_iter()
        .take(top_k)
        .enumerate()
        .map(|(i, idx)| RerankOutcome {
            candidate: candidates[idx].clone(),
            score: scores[idx],
            previous_rank: candidates[idx].original_rank,
            new_rank: i + 1,
        })
        .collect()
}

/// The ranking used when no reranking was asked for.
pub fn passthrough(candidates: &[Candidate], top_k: usize) -> Reranking {
    Reranking {
        outcomes: positional(candidates, top_k),
        status: RerankStatus::PassThrough,
    }
}

/// The shared fallback: positional order, flagged as degraded.
pub fn degraded(
    strategy: &str,
    reason: impl ToString,
    candidates: &[Candidate],
    top_k: usize,
) -> Reranking {
    Reranking {
        outcomes: positional(candidates, top_k),
        status: RerankStatus::Degraded {
            strategy: strategy.to_string(),
            reason: reason.to_string(),
        },
    }
}
