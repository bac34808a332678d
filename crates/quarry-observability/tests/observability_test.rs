use quarry_core::config::ObservabilityConfig;
use quarry_observability::tracing_setup::spans::names;

#[test]
fn span_macros_use_named_spans() {
    let span = quarry_observability::retrieval_span!("总资产", 5);
    // Without a subscriber the span is disabled but still constructible.
    let _guard = span.enter();
    let _rerank = quarry_observability::rerank_span!("remote_api", 10);
    let _llm = quarry_observability::llm_span!("qwen-max", 1024);
    let _parse = quarry_observability::parse_span!(64);
    assert_eq!(names::RETRIEVAL, "quarry.retrieval");
    assert_eq!(names::RERANK, "quarry.rerank");
}

#[test]
fn init_tracing_is_idempotent() {
    let config = ObservabilityConfig {
        log_level: "debug".into(),
        json: false,
    };
    let first = quarry_observability::init_tracing(&config);
    let second = quarry_observability::init_tracing(&config);
    // The global subscriber can only be installed once per process.
    assert!(!(first && second));
    assert!(!second);
}
