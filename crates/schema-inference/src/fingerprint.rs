//! Schema fingerprint generation.
//!
//! Generates stable SHA-256 fingerprints from schema nodes for version
//! tracking and idempotent persistence. The fingerprint only considers the
//! structural shape (kinds, field names, required flags, format hints,
//! nullability), never the sample counts that change with every
//! observation.

use sha2::{Digest, Sha256};

use schemadrift_core::{SchemaKind, SchemaNode};

/// Compute a stable fingerprint for a schema's structure.
///
/// Hex-encoded first 8 bytes of a SHA-256 over the structural
/// representation: same structure always produces the same 16-char string.
pub fn fingerprint(schema: &SchemaNode) -> String {
    let mut hasher = Sha256::new();
    hash_structure(schema, &mut hasher);
    let result = hasher.finalize();
    hex::encode(&result[..8])
}

/// Short 8-char form of a fingerprint for log lines.
pub fn short_fingerprint(fingerprint: &str) -> &str {
    &fingerprint[..fingerprint.len().min(8)]
}

fn hash_structure(node: &SchemaNode, hasher: &mut Sha256) {
    hasher.update([node.nullable as u8]);
    match &node.kind {
        SchemaKind::String { format } => {
            hasher.update(b"string");
            hash_format(format.map(|f| f.as_str()), hasher);
        }
        SchemaKind::Number { format } => {
            hasher.update(b"number");
            hash_format(format.map(|f| f.as_str()), hasher);
        }
        SchemaKind::Boolean => {
            hasher.update(b"bool");
        }
        SchemaKind::Null => {
            hasher.update(b"null");
        }
        SchemaKind::Unknown => {
            hasher.update(b"?");
        }
        SchemaKind::Array { items, homogeneous } => {
            hasher.update(b"seq[");
            hasher.update([*homogeneous as u8]);
            hash_structure(items, hasher);
            hasher.update(b"]");
        }
        SchemaKind::Object {
            properties,
            required,
        } => {
            hasher.update(b"struct{");
            // BTreeMap iteration order is deterministic.
            for (name, child) in properties {
                hasher.update(name.as_bytes());
                hasher.update(b":");
                hasher.update([required.contains(name) as u8]);
                hash_structure(child, hasher);
                hasher.update(b",");
            }
            hasher.update(b"}");
        }
        SchemaKind::Union { variants } => {
            hasher.update(b"union(");
            // Variants are kept in canonical kind order by construction.
            for variant in variants {
                hash_structure(variant, hasher);
                hasher.update(b"|");
            }
            hasher.update(b")");
        }
    }
}

fn hash_format(format: Option<&str>, hasher: &mut Sha256) {
    match format {
        Some(name) => {
            hasher.update(b"<");
            hasher.update(name.as_bytes());
            hasher.update(b">");
        }
        None => hasher.update(b"<>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::infer;
    use serde_json::json;

    #[test]
    fn fingerprint_is_stable() {
        let schema = infer(&json!({"id": 1, "name": "test"}));
        assert_eq!(fingerprint(&schema), fingerprint(&schema));
    }

    #[test]
    fn same_structure_different_values_match() {
        let a = infer(&json!({"id": 1, "name": "Alice"}));
        let b = infer(&json!({"id": 999, "name": "Bob"}));
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn different_fields_differ() {
        let a = infer(&json!({"id": 1}));
        let b = infer(&json!({"name": "test"}));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn different_types_differ() {
        let a = infer(&json!({"value": 123}));
        let b = infer(&json!({"value": "text"}));
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn nullability_affects_fingerprint() {
        let plain = infer(&json!({"value": "x"}));
        let nullable = crate::merge::merge(&plain, &infer(&json!({"value": null})));
        assert_ne!(fingerprint(&plain), fingerprint(&nullable));
    }

    #[test]
    fn sample_count_does_not_affect_fingerprint() {
        let once = infer(&json!({"id": 1}));
        let twice = crate::merge::merge(&once, &infer(&json!({"id": 2})));
        assert_eq!(fingerprint(&once), fingerprint(&twice));
    }

    #[test]
    fn fingerprint_length() {
        let schema = infer(&json!({"test": true}));
        let full = fingerprint(&schema);
        assert_eq!(full.len(), 16);
        assert_eq!(short_fingerprint(&full), &full[..8]);
    }
}
