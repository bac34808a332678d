use std::sync::Arc;

use proptest::prelude::*;
use quarry_core::errors::RerankError;
use quarry_core::models::{Candidate, SearchHit};
use quarry_rerank::{
    LlmJudgeReranker, LocalModelReranker, ModelLoader, PairScorer, PassThroughReranker,
    RerankerStrategy,
};
use test_fixtures::{FailingLanguageModel, ScriptedLanguageModel};

fn candidates(n: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| {
            let mut c = Candidate::from_dense(SearchHit::new(format!("id-{i}"), format!("text {i}"), 0.1));
            c.original_rank = i + 1;
            c
        })
        .collect()
}

fn failing_local() -> LocalModelReranker {
    let loader: ModelLoader = Box::new(|| -> Result<Box<dyn PairScorer>, RerankError> {
        Err(RerankError::ModelLoadFailed {
            model: "none".into(),
            reason: "absent".into(),
        })
    });
    LocalModelReranker::with_loader("none", loader)
}

fn assert_prefix_in_order(outcome_ids: Vec<String>, input: &[Candidate], k: usize) {
    let expected: Vec<String> = input.iter().take(k).map(|c| c.id.clone()).collect();
    assert_eq!(outcome_ids, expected);
}

proptest! {
    #[test]
    fn degraded_strategies_return_min_k_n_in_input_order(n in 0usize..20, k in 0usize..25) {
        let input = candidates(n);
        let strategies: Vec<Box<dyn RerankerStrategy>> = vec![
            Box::new(PassThroughReranker),
            Box::new(failing_local()),
            Box::new(LlmJudgeReranker::new(Arc::new(FailingLanguageModel))),
            Box::new(LlmJudgeReranker::new(Arc::new(ScriptedLanguageModel::always("no scores")))),
        ];

        for strategy in strategies {
            let reranking = strategy.rerank("query", &input, k);
            prop_assert_eq!(reranking.outcomes.len(), k.min(n));
            let ids: Vec<String> = reranking.outcomes.iter().map(|o| o.candidate.id.clone()).collect();
            assert_prefix_in_order(ids, &input, k);
            for (i, outcome) in reranking.outcomes.iter().enumerate() {
                prop_assert_eq!(outcome.new_rank, i + 1);
                prop_assert_eq!(outcome.previous_rank, i + 1);
            }
        }
    }

    #[test]
    fn scored_outcomes_are_sorted_descending(scores in prop::collection::vec(0.0f64..1.0, 1..15), k in 1usize..20) {
        let input = candidates(scores.len());
        let outcomes = quarry_rerank::outcome::scored(&input, &scores, k);
        prop_assert_eq!(outcomes.len(), k.min(scores.len()));
        for pair in outcomes.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
