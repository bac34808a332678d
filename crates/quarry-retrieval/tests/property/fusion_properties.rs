use std::collections::HashSet;

use proptest::prelude::*;
use quarry_core::models::SearchHit;
use quarry_retrieval::fuse;

fn hits(prefix: &'static str) -> impl Strategy<Value = Vec<SearchHit>> {
    prop::collection::vec((0u8..12, 0.0f64..1.0), 0..12).prop_map(move |pairs| {
        pairs
            .into_iter()
            .map(|(id, score)| SearchHit::new(format!("{prefix}{id}"), "text", score))
            .collect()
    })
}

proptest! {
    #[test]
    fn fused_score_is_weighted_sum_and_sorted(
        dense in hits("d"),
        sparse in hits("d"),
        w in 0.0f64..=1.0,
        limit in 0usize..30,
    ) {
        let fused = fuse(dense.clone(), sparse.clone(), w, limit);

        for candidate in &fused {
            let expected = candidate.dense_score * w + candidate.sparse_score * (1.0 - w);
            prop_assert!((candidate.fused_score - expected).abs() < 1e-12);
        }
        for pair in fused.windows(2) {
            prop_assert!(pair[0].fused_score >= pair[1].fused_score);
        }

        let unique: HashSet<&str> = dense.iter().chain(&sparse).map(|h| h.id.as_str()).collect();
        prop_assert_eq!(fused.len(), unique.len().min(limit));
    }

    #[test]
    fn ids_are_unique_and_ranks_are_positions(
        dense in hits("x"),
        sparse in hits("x"),
        w in 0.0f64..=1.0,
    ) {
        let fused = fuse(dense, sparse, w, 100);
        let ids: HashSet<&str> = fused.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(ids.len(), fused.len());
        for (i, candidate) in fused.iter().enumerate() {
            prop_assert_eq!(candidate.original_rank, i + 1);
        }
    }

    #[test]
    fn shared_id_combines_both_scores(d in 0.0f64..1.0, s in 0.0f64..1.0, w in 0.0f64..=1.0) {
        let fused = fuse(
            vec![SearchHit::new("same", "dense text", d)],
            vec![SearchHit::new("same", "sparse text", s)],
            w,
            10,
        );
        prop_assert_eq!(fused.len(), 1);
        prop_assert_eq!(fused[0].dense_score, d);
        prop_assert_eq!(fused[0].sparse_score, s);
    }
}
