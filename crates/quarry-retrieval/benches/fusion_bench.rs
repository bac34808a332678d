use criterion::{criterion_group, criterion_main, Criterion};

use quarry_answer::parse;
use quarry_core::models::SearchHit;
use quarry_retrieval::fuse;

fn hits(prefix: &str, n: usize) -> Vec<SearchHit> {
    (0..n)
        .map(|i| SearchHit::new(format!("{prefix}{i}"), "chunk text", 1.0 / (i as f64 + 1.0)))
        .collect()
}

fn bench_fusion_1k(c: &mut Criterion) {
    // Half the ids overlap between the two lists.
    let dense = hits("doc-", 1_000);
    let sparse: Vec<SearchHit> = (500..1_500)
        .map(|i| SearchHit::new(format!("doc-{i}"), "chunk text", 0.5))
        .collect();

    c.bench_function("fuse_1k_dense_1k_sparse", |b| {
        b.iter(|| fuse(dense.clone(), sparse.clone(), 0.7, 20));
    });
}

fn bench_parse_cascade(c: &mut Criterion) {
    let direct = r#"{"step_by_step_analysis": "a", "reasoning_summary": "b", "relevant_pages": [1, 2], "final_answer": "c"}"#;
    let recovery = r#"Sure. step_by_step_analysis: "a", relevant_pages: [1, 2], final_answer: "c" (truncated"#;

    c.bench_function("parse_direct", |b| b.iter(|| parse(direct)));
    c.bench_function("parse_field_recovery", |b| b.iter(|| parse(recovery)));
}

criterion_group!(benches, bench_fusion_1k, bench_parse_cascade);
criterion_main!(benches);
