//! Schema inference from concrete values.
//!
//! Inference is total over well-formed JSON values and never fails; a
//! single sample treats every present object key as required, and nested
//! shapes are inferred recursively.

use std::collections::BTreeMap;

use serde_json::Value;

use schemadrift_core::{FormatHint, SchemaNode};

use crate::formats::detect_string_format;
use crate::merge::{build_union, merge};

/// Infer a schema node from one concrete value.
pub fn infer(value: &Value) -> SchemaNode {
    match value {
        Value::Null => SchemaNode::null(),
        Value::Bool(_) => SchemaNode::boolean(),
        Value::Number(n) => SchemaNode::number(Some(number_format(n))),
        Value::String(s) => SchemaNode::string(detect_string_format(s)),
        Value::Array(items) => infer_array(items),
        Value::Object(map) => {
            let properties: BTreeMap<String, SchemaNode> = map
                .iter()
                .map(|(name, child)| (name.clone(), infer(child)))
                .collect();
            SchemaNode::object(properties)
        }
    }
}

/// Infer with an absent sentinel: `None` means the value was missing
/// entirely, which yields `unknown` - not nullable. Only a literal null
/// sets nullability.
pub fn infer_optional(value: Option<&Value>) -> SchemaNode {
    match value {
        Some(v) => infer(v),
        None => SchemaNode::unknown(),
    }
}

fn number_format(n: &serde_json::Number) -> FormatHint {
    if n.is_i64() || n.is_u64() {
        return FormatHint::Integer;
    }
    // A float-typed literal with no fractional part still counts as integer.
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.is_finite() => FormatHint::Integer,
        _ => FormatHint::Float,
    }
}

fn infer_array(items: &[Value]) -> SchemaNode {
    if items.is_empty() {
        return SchemaNode::array(SchemaNode::unknown(), true);
    }
    let inferred: Vec<SchemaNode> = items.iter().map(infer).collect();
    let homogeneous = inferred.iter().all(|n| n.same_kind(&inferred[0]));
    if homogeneous {
        let folded = inferred
            .into_iter()
            .reduce(|a, b| merge(&a, &b))
            .expect("non-empty array");
        SchemaNode::array(folded, true)
    } else {
        SchemaNode::array(build_union(inferred), false)
    }
}
