//! Model context and source provenance from the surviving candidates.

use quarry_core::constants::CONTEXT_SEPARATOR;
use quarry_core::models::{Candidate, Source};

/// Candidate contents in ranking order, separated by a blank line.
pub fn build_context(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

pub fn sources(candidates: &[Candidate]) -> Vec<Source> {
    candidates.iter().map(Source::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::models::SearchHit;

    #[test]
    fn context_joins_with_blank_line() {
        let candidates = vec![
            Candidate::from_dense(SearchHit::new("a", "first", 0.9)),
            Candidate::from_dense(SearchHit::new("b", "second", 0.5)),
        ];
        assert_eq!(build_context(&candidates), "first\n\nsecond");
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn source_score_prefers_rerank_score() {
        let mut candidate = Candidate::from_dense(SearchHit::new("a", "text", 0.9));
        candidate.fused_score = 0.63;
        assert_eq!(sources(&[candidate.clone()])[0].score, 0.63);

        candidate.rerank_score = Some(0.2);
        candidate.rerank_rank = Some(3);
        let source = &sources(&[candidate])[0];
        assert_eq!(source.score, 0.2);
        assert_eq!(source.fused_score, 0.63);
        assert!(source.reranked);
    }
}
