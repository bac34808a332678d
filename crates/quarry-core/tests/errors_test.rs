use quarry_core::errors::*;

#[test]
fn retrieval_error_converts_into_quarry_error() {
    let err: QuarryError = RetrievalError::DenseSearchFailed {
        reason: "index offline".into(),
    }
    .into();
    assert!(matches!(err, QuarryError::RetrievalError(_)));
    assert!(err.to_string().contains("index offline"));
}

#[test]
fn malformed_results_names_backend() {
    let err = RetrievalError::MalformedResults {
        backend: "sparse".into(),
        reason: "empty id at position 3".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("sparse"));
    assert!(msg.contains("position 3"));
}

#[test]
fn rerank_error_carries_status_and_body() {
    let err = RerankError::HttpStatus {
        status: 429,
        body: "rate limited".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("429"));
    assert!(msg.contains("rate limited"));
}

#[test]
fn score_count_mismatch_carries_values() {
    let err = RerankError::ScoreCountMismatch {
        expected: 5,
        actual: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains('5'));
    assert!(msg.contains('3'));
}

#[test]
fn language_model_error_converts_into_quarry_error() {
    let err: QuarryError = LanguageModelError::MissingApiKey {
        env_var: "DASHSCOPE_API_KEY".into(),
    }
    .into();
    assert!(matches!(err, QuarryError::LanguageModelError(_)));
    assert!(err.to_string().contains("DASHSCOPE_API_KEY"));
}

#[test]
fn serde_error_converts_into_quarry_error() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: QuarryError = parse_err.into();
    assert!(matches!(err, QuarryError::SerializationError(_)));
}
