//! Benchmarks for schema inference and multi-sample merging.
//!
//! Run with: cargo bench -p schema-inference

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use schema_inference::{infer, merge, SchemaLearner};
use serde_json::json;

/// Flat payload - the common API response shape.
fn make_flat_payload(i: u64) -> serde_json::Value {
    json!({
        "id": i,
        "user_id": i % 100,
        "action": "click",
        "created_at": "2024-03-01T08:00:00Z",
        "active": true
    })
}

/// Nested payload with arrays and optional structure.
fn make_nested_payload(i: u64) -> serde_json::Value {
    json!({
        "id": i,
        "profile": {
            "email": "user@example.com",
            "tags": ["alpha", "beta", "gamma"],
            "settings": {
                "notify": i % 2 == 0,
                "priority": i % 5
            }
        },
        "scores": [1.5, 2.0, 3.25]
    })
}

fn bench_infer(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer");
    group.throughput(Throughput::Elements(1));

    group.bench_function("flat", |b| {
        let payload = make_flat_payload(1);
        b.iter(|| infer(black_box(&payload)));
    });

    group.bench_function("nested", |b| {
        let payload = make_nested_payload(1);
        b.iter(|| infer(black_box(&payload)));
    });

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    c.bench_function("merge/nested", |b| {
        let base = infer(&make_nested_payload(1));
        let next = infer(&make_nested_payload(2));
        b.iter(|| merge(black_box(&base), black_box(&next)));
    });
}

fn bench_learner(c: &mut Criterion) {
    c.bench_function("learner/observe_100", |b| {
        b.iter(|| {
            let mut learner = SchemaLearner::enabled();
            for i in 0..100u64 {
                learner.observe("events", &make_nested_payload(i));
            }
            black_box(learner.sample_count("events"))
        });
    });
}

criterion_group!(benches, bench_infer, bench_merge, bench_learner);
criterion_main!(benches);
