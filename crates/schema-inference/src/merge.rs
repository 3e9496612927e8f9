//! Schema merging - the multi-sample learning step.
//!
//! Merging is total: two nodes of incompatible kinds degrade to a union
//! rather than failing. It is commutative and associative up to property
//! order; union alternatives are kept in a canonical kind order so
//! structurally equal merges compare equal.

use std::collections::BTreeMap;

use schemadrift_core::{SchemaKind, SchemaNode};

/// Combine two already-inferred nodes into one.
///
/// Null forces nullability onto the other side's shape, unknown carries no
/// information and adopts the other side, differing kinds build a union, and
/// equal kinds merge field-wise. The result's sample count is the sum of
/// both inputs'.
pub fn merge(a: &SchemaNode, b: &SchemaNode) -> SchemaNode {
    let samples = a.sample_count.saturating_add(b.sample_count);

    match (&a.kind, &b.kind) {
        (SchemaKind::Null, SchemaKind::Null) => {
            SchemaNode::null().with_sample_count(samples)
        }
        // One null: keep the other shape, forced nullable.
        (SchemaKind::Null, _) => {
            let mut out = b.clone();
            out.nullable = true;
            out.sample_count = samples;
            out
        }
        (_, SchemaKind::Null) => {
            let mut out = a.clone();
            out.nullable = true;
            out.sample_count = samples;
            out
        }
        // Unknown carries no information: adopt the other shape.
        (SchemaKind::Unknown, _) => {
            let mut out = b.clone();
            out.nullable |= a.nullable;
            out.sample_count = samples;
            out
        }
        (_, SchemaKind::Unknown) => {
            let mut out = a.clone();
            out.nullable |= b.nullable;
            out.sample_count = samples;
            out
        }
        // Any union participant: rebuild the union over all alternatives.
        (SchemaKind::Union { .. }, _) | (_, SchemaKind::Union { .. }) => {
            let mut out = build_union(vec![a.clone(), b.clone()]);
            out.nullable |= a.nullable || b.nullable;
            out.sample_count = samples;
            out
        }
        (
            SchemaKind::String { format: fa },
            SchemaKind::String { format: fb },
        ) => SchemaNode {
            kind: SchemaKind::String {
                // Disagreement drops the hint rather than guessing.
                format: if fa == fb { *fa } else { None },
            },
            nullable: a.nullable || b.nullable,
            sample_count: samples,
        },
        (
            SchemaKind::Number { format: fa },
            SchemaKind::Number { format: fb },
        ) => SchemaNode {
            kind: SchemaKind::Number {
                format: if fa == fb { *fa } else { None },
            },
            nullable: a.nullable || b.nullable,
            sample_count: samples,
        },
        (SchemaKind::Boolean, SchemaKind::Boolean) => SchemaNode {
            kind: SchemaKind::Boolean,
            nullable: a.nullable || b.nullable,
            sample_count: samples,
        },
        (
            SchemaKind::Array {
                items: ia,
                homogeneous: ha,
            },
            SchemaKind::Array {
                items: ib,
                homogeneous: hb,
            },
        ) => {
            let items = merge(ia, ib);
            let homogeneous = *ha
                && *hb
                && !matches!(
                    items.kind,
                    SchemaKind::Unknown | SchemaKind::Union { .. }
                );
            SchemaNode {
                kind: SchemaKind::Array {
                    items: Box::new(items),
                    homogeneous,
                },
                nullable: a.nullable || b.nullable,
                sample_count: samples,
            }
        }
        (
            SchemaKind::Object {
                properties: pa,
                required: ra,
            },
            SchemaKind::Object {
                properties: pb,
                required: rb,
            },
        ) => {
            let mut properties: BTreeMap<String, SchemaNode> = BTreeMap::new();
            for (name, node_a) in pa {
                let merged = match pb.get(name) {
                    Some(node_b) => merge(node_a, node_b),
                    None => node_a.clone(),
                };
                properties.insert(name.clone(), merged);
            }
            for (name, node_b) in pb {
                if !pa.contains_key(name) {
                    properties.insert(name.clone(), node_b.clone());
                }
            }
            // A key required in only one sample set becomes optional; this
            // is how sometimes-present fields are detected.
            let required = ra.intersection(rb).cloned().collect();
            SchemaNode {
                kind: SchemaKind::Object {
                    properties,
                    required,
                },
                nullable: a.nullable || b.nullable,
                sample_count: samples,
            }
        }
        // Kinds differ, neither null nor unknown: degrade to a union.
        _ => {
            let mut out = build_union(vec![a.clone(), b.clone()]);
            out.sample_count = samples;
            out
        }
    }
}

/// Build a union node from candidate alternatives.
///
/// Null candidates are dropped and recorded as nullability, nested unions
/// are flattened, and remaining candidates are grouped by kind with
/// duplicates merged inside each group (so a hint disagreement inside a
/// group drops the hint). A single surviving group collapses the union to
/// that group's node.
pub fn build_union(candidates: Vec<SchemaNode>) -> SchemaNode {
    let mut flat: Vec<SchemaNode> = Vec::new();
    let mut nullable = false;
    let mut total: u64 = 0;
    for candidate in candidates {
        total = total.saturating_add(candidate.sample_count);
        nullable |= candidate.nullable;
        match candidate.kind {
            SchemaKind::Null => {
                nullable = true;
            }
            SchemaKind::Union { variants } => {
                for variant in variants {
                    nullable |= variant.nullable;
                    flat.push(variant.with_nullable(false));
                }
            }
            _ => flat.push(candidate.with_nullable(false)),
        }
    }

    let mut groups: Vec<SchemaNode> = Vec::new();
    for candidate in flat {
        match groups.iter_mut().find(|g| g.same_kind(&candidate)) {
            Some(group) => *group = merge(group, &candidate),
            None => groups.push(candidate),
        }
    }
    // Variant-level counts carry no meaning and depend on merge order; only
    // the union node keeps the sum. Resetting them keeps merge associative.
    for group in &mut groups {
        group.sample_count = 1;
    }
    groups.sort_by_key(variant_order);

    match groups.len() {
        // Every candidate was null.
        0 => SchemaNode::null().with_sample_count(total.max(1)),
        1 => {
            let mut node = groups.remove(0);
            node.nullable |= nullable;
            node.sample_count = total.max(1);
            node
        }
        _ => SchemaNode {
            kind: SchemaKind::Union { variants: groups },
            nullable,
            sample_count: total.max(1),
        },
    }
}

/// Canonical ordering of union alternatives.
fn variant_order(node: &SchemaNode) -> u8 {
    match node.kind {
        SchemaKind::Boolean => 0,
        SchemaKind::Number { .. } => 1,
        SchemaKind::String { .. } => 2,
        SchemaKind::Array { .. } => 3,
        SchemaKind::Object { .. } => 4,
        SchemaKind::Null => 5,
        SchemaKind::Unknown => 6,
        SchemaKind::Union { .. } => 7,
    }
}
