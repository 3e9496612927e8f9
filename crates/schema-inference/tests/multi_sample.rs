//! Multi-sample learning properties: idempotence, commutativity, and
//! optional-field discovery across samples.

use schema_inference::{infer, merge};
use schemadrift_core::{SchemaKind, SchemaNode};
use serde_json::json;

fn properties(node: &SchemaNode) -> &std::collections::BTreeMap<String, SchemaNode> {
    match &node.kind {
        SchemaKind::Object { properties, .. } => properties,
        other => panic!("expected object, got {other:?}"),
    }
}

fn required(node: &SchemaNode) -> &std::collections::BTreeSet<String> {
    match &node.kind {
        SchemaKind::Object { required, .. } => required,
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn merge_with_self_is_idempotent() {
    let samples = [
        json!({"id": 1, "name": "Alice", "tags": ["a"]}),
        json!([1, 2, 3]),
        json!("2024-01-15"),
        json!(null),
    ];
    for sample in &samples {
        let once = infer(sample);
        let twice = merge(&once, &once);
        assert!(twice.same_kind(&once), "kind changed for {sample}");
        assert_eq!(twice.format(), once.format());
        assert_eq!(twice.nullable, once.nullable);
        assert_eq!(twice.sample_count, 2);
    }
}

#[test]
fn merge_is_commutative() {
    let a = infer(&json!({"id": 1, "name": "A", "extra": true}));
    let b = infer(&json!({"id": "x", "name": null, "other": [1.5]}));
    assert_eq!(merge(&a, &b), merge(&b, &a));
}

#[test]
fn merge_is_associative_on_structure() {
    let a = infer(&json!({"v": 1}));
    let b = infer(&json!({"v": "s"}));
    let c = infer(&json!({"v": true}));

    let left = merge(&merge(&a, &b), &c);
    let right = merge(&a, &merge(&b, &c));
    assert_eq!(left, right);
}

#[test]
fn merge_is_associative_with_null_samples() {
    // A null sample folded in before the union forms must produce the same
    // node as one folded in after, variant bookkeeping included.
    let a = infer(&json!({"v": 1}));
    let b = infer(&json!({"v": "s"}));
    let n = infer(&json!({"v": null}));

    let union_then_null = merge(&merge(&a, &b), &n);
    let null_then_union = merge(&a, &merge(&b, &n));
    assert_eq!(union_then_null, null_then_union);
    assert_eq!(union_then_null, merge(&merge(&a, &n), &b));
    assert_eq!(union_then_null.sample_count, 3);
}

#[test]
fn required_fields_narrow_across_samples() {
    let a = infer(&json!({"id": 1, "name": "A", "email": "x@example.com"}));
    let b = infer(&json!({"id": 2, "name": "B"}));
    let merged = merge(&a, &b);

    let req = required(&merged);
    assert!(req.contains("id"));
    assert!(req.contains("name"));
    assert!(!req.contains("email"));
    // The optional field is still described.
    assert!(properties(&merged).contains_key("email"));
}

#[test]
fn nullable_propagates_without_losing_shape() {
    let shaped = infer(&json!({"profile": {"bio": "hello"}}));
    let nulled = infer(&json!({"profile": null}));
    let merged = merge(&shaped, &nulled);

    let profile = &properties(&merged)["profile"];
    assert!(profile.is_object());
    assert!(profile.nullable);
}

#[test]
fn incompatible_field_kinds_union_per_field() {
    let a = infer(&json!({"value": 1}));
    let b = infer(&json!({"value": "one"}));
    let merged = merge(&a, &b);

    let value = &properties(&merged)["value"];
    match &value.kind {
        SchemaKind::Union { variants } => {
            let labels: Vec<String> =
                variants.iter().map(|v| v.type_label()).collect();
            assert!(labels.iter().any(|l| l.starts_with("number")));
            assert!(labels.iter().any(|l| l == "string"));
        }
        other => panic!("expected union, got {other:?}"),
    }
}

#[test]
fn sample_counts_sum_across_merges() {
    let mut learned = infer(&json!({"id": 1}));
    for i in 2..=5 {
        learned = merge(&learned, &infer(&json!({"id": i})));
    }
    assert_eq!(learned.sample_count, 5);
}
