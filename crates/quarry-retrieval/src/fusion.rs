//! Weighted-sum fusion of dense and sparse hit lists.
//!
//! `fused = dense * w + sparse * (1 - w)`. A hit missing from one list scores
//! 0.0 there. Ties keep first-seen order: dense hits first, then sparse-only.

use std::cmp::Ordering;
use std::collections::HashMap;

use quarry_core::config::defaults::DEFAULT_VECTOR_WEIGHT;
use quarry_core::models::{Candidate, SearchHit};

/// Clamp `w` into [0, 1]; a non-finite weight falls back to the default.
pub fn clamp_weight(w: f64) -> f64 {
    if !w.is_finite() {
        tracing::warn!(vector_weight = w, "non-finite vector weight, using default");
        return DEFAULT_VECTOR_WEIGHT;
    }
    if !(0.0..=1.0).contains(&w) {
        tracing::warn!(vector_weight = w, "vector weight outside [0, 1], clamping");
    }
    w.clamp(0.0, 1.0)
}

/// Merge two ranked lists into one deduplicated ranking of at most `limit`.
///
/// Each returned candidate has `original_rank` set to its 1-based position.
pub fn fuse(
    dense: Vec<SearchHit>,
    sparse: Vec<SearchHit>,
    vector_weight: f64,
    limit: usize,
) -> Vec<Candidate> {
    let weight = clamp_weight(vector_weight);
    let mut entries: Vec<Candidate> = Vec::with_capacity(dense.len() + sparse.len());
    let mut has_dense: Vec<bool> = Vec::with_capacity(entries.capacity());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(entries.capacity());

    for hit in dense {
        match index.get(&hit.id) {
            Some(&i) => {
                let entry = &mut entries[i];
                entry.dense_score = hit.score;
                entry.content = hit.content;
                entry.metadata = hit.metadata;
            }
            None => {
                index.insert(hit.id.clone(), entries.len());
                entries.push(Candidate::from_dense(hit));
                has_dense.push(true);
            }
        }
    }

    for hit in sparse {
        match index.get(&hit.id) {
            Some(&i) if has_dense[i] => {
                let entry = &mut entries[i];
                entry.sparse_score = hit.score;
                for (key, value) in hit.metadata {
                    entry.metadata.entry(key).or_insert(value);
                }
            }
            Some(&i) => {
                let entry = &mut entries[i];
                entry.sparse_score = hit.score;
                entry.content = hit.content;
                entry.metadata = hit.metadata;
            }
            None => {
                index.insert(hit.id.clone(), entries.len());
                entries.push(Candidate::from_sparse(hit));
                has_dense.push(false);
            }
        }
    }

    for entry in &mut entries {
        entry.fused_score = entry.dense_score * weight + entry.sparse_score * (1.0 - weight);
    }

    // Stable: equal scores keep insertion order.
    entries.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(Ordering::Equal)
    });
    entries.truncate(limit);

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.original_rank = i + 1;
    }
    entries
}
