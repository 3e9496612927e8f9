//! The canonical schema node model.
//!
//! A [`SchemaNode`] describes the inferred shape of a JSON-like value. The
//! `kind` discriminant is a closed enum so invalid combinations (array fields
//! on a string node, a union carrying object properties) are unrepresentable.
//! Nodes are treated as immutable once built; inference and merging always
//! produce new nodes.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DriftError;

/// Refinement tag for `string` and `number` kinds.
///
/// String hints are detected in a fixed priority order during inference;
/// number hints distinguish integral from fractional values. A hint
/// disagreement between merged samples drops the hint entirely.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FormatHint {
    #[serde(rename = "iso-datetime")]
    IsoDateTime,
    #[serde(rename = "iso-date")]
    IsoDate,
    #[serde(rename = "uuid")]
    Uuid,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "ipv4")]
    Ipv4,
    #[serde(rename = "ipv6")]
    Ipv6,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "float")]
    Float,
}

impl FormatHint {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FormatHint::IsoDateTime => "iso-datetime",
            FormatHint::IsoDate => "iso-date",
            FormatHint::Uuid => "uuid",
            FormatHint::Email => "email",
            FormatHint::Url => "url",
            FormatHint::Ipv4 => "ipv4",
            FormatHint::Ipv6 => "ipv6",
            FormatHint::Integer => "integer",
            FormatHint::Float => "float",
        }
    }
}

impl fmt::Display for FormatHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind discriminant with per-kind payload.
///
/// Serializes internally tagged on `"kind"`, so persisted schemas are
/// self-describing JSON (`{"kind": "object", "properties": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaKind {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<FormatHint>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<FormatHint>,
    },
    Boolean,
    Null,
    Object {
        #[serde(default)]
        properties: BTreeMap<String, SchemaNode>,
        /// Property names present in every sample merged into this node.
        #[serde(default)]
        required: BTreeSet<String>,
    },
    Array {
        items: Box<SchemaNode>,
        /// True iff all observed items reduce to a single kind.
        homogeneous: bool,
    },
    Union {
        /// Distinct alternatives, never containing null or nested unions.
        #[serde(rename = "one_of")]
        variants: Vec<SchemaNode>,
    },
    Unknown,
}

/// The canonical type descriptor for a value or sub-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(flatten)]
    pub kind: SchemaKind,

    /// True if any contributing sample was literal null.
    #[serde(default)]
    pub nullable: bool,

    /// Raw samples folded into this node; sums across merges.
    #[serde(default = "default_sample_count")]
    pub sample_count: u64,
}

fn default_sample_count() -> u64 {
    1
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
            sample_count: 1,
        }
    }

    pub fn string(format: Option<FormatHint>) -> Self {
        Self::new(SchemaKind::String { format })
    }

    pub fn number(format: Option<FormatHint>) -> Self {
        Self::new(SchemaKind::Number { format })
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    /// A null-kind node is always nullable.
    pub fn null() -> Self {
        Self {
            kind: SchemaKind::Null,
            nullable: true,
            sample_count: 1,
        }
    }

    pub fn unknown() -> Self {
        Self::new(SchemaKind::Unknown)
    }

    /// Object node; a single sample treats every present key as required.
    pub fn object(properties: BTreeMap<String, SchemaNode>) -> Self {
        let required = properties.keys().cloned().collect();
        Self::new(SchemaKind::Object {
            properties,
            required,
        })
    }

    pub fn array(items: SchemaNode, homogeneous: bool) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
            homogeneous,
        })
    }

    pub fn union(variants: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Union { variants })
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_sample_count(mut self, sample_count: u64) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Short name of this node's kind discriminant.
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            SchemaKind::String { .. } => "string",
            SchemaKind::Number { .. } => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Object { .. } => "object",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Union { .. } => "union",
            SchemaKind::Unknown => "unknown",
        }
    }

    /// Whether both nodes share a kind discriminant, ignoring payload.
    pub fn same_kind(&self, other: &SchemaNode) -> bool {
        std::mem::discriminant(&self.kind) == std::mem::discriminant(&other.kind)
    }

    /// Format hint, if this kind carries one.
    pub fn format(&self) -> Option<FormatHint> {
        match self.kind {
            SchemaKind::String { format } | SchemaKind::Number { format } => format,
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, SchemaKind::Object { .. })
    }

    pub fn is_union(&self) -> bool {
        matches!(self.kind, SchemaKind::Union { .. })
    }

    /// Human-readable type label used in change messages.
    ///
    /// Format hints render in angle brackets (`string<email>`), arrays nest
    /// their item label (`array<number<integer>>`), and unions render as
    /// `oneOf(string, number)`.
    pub fn type_label(&self) -> String {
        match &self.kind {
            SchemaKind::String { format: Some(f) } => format!("string<{f}>"),
            SchemaKind::String { format: None } => "string".to_string(),
            SchemaKind::Number { format: Some(f) } => format!("number<{f}>"),
            SchemaKind::Number { format: None } => "number".to_string(),
            SchemaKind::Boolean => "boolean".to_string(),
            SchemaKind::Null => "null".to_string(),
            SchemaKind::Object { .. } => "object".to_string(),
            SchemaKind::Array { items, .. } => {
                format!("array<{}>", items.type_label())
            }
            SchemaKind::Union { variants } => {
                let labels: Vec<String> =
                    variants.iter().map(|v| v.type_label()).collect();
                format!("oneOf({})", labels.join(", "))
            }
            SchemaKind::Unknown => "unknown".to_string(),
        }
    }

    /// Check structural invariants of this node and its children.
    ///
    /// Inference and merge only ever build valid nodes; this guards against
    /// hand-built or deserialized nodes violating the model (required field
    /// without a property, degenerate or nested unions, a non-nullable null).
    pub fn validate(&self) -> Result<(), DriftError> {
        self.validate_at("")
    }

    fn validate_at(&self, path: &str) -> Result<(), DriftError> {
        match &self.kind {
            SchemaKind::Null if !self.nullable => Err(DriftError::invalid(
                path,
                "null-kind node must be nullable",
            )),
            SchemaKind::Object {
                properties,
                required,
            } => {
                for name in required {
                    if !properties.contains_key(name) {
                        return Err(DriftError::invalid(
                            path,
                            Cow::from(format!(
                                "required field `{name}` has no property entry"
                            )),
                        ));
                    }
                }
                for (name, child) in properties {
                    child.validate_at(&join_path(path, name))?;
                }
                Ok(())
            }
            SchemaKind::Array { items, .. } => {
                items.validate_at(&format!("{path}[]"))
            }
            SchemaKind::Union { variants } => {
                if variants.len() < 2 {
                    return Err(DriftError::invalid(
                        path,
                        "union must carry at least two alternatives",
                    ));
                }
                for variant in variants {
                    if matches!(
                        variant.kind,
                        SchemaKind::Null | SchemaKind::Union { .. }
                    ) {
                        return Err(DriftError::invalid(
                            path,
                            "union alternatives may not be null or nested unions",
                        ));
                    }
                    variant.validate_at(path)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Join a dotted field path with a child key. Root is the empty string.
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_of(entries: Vec<(&str, SchemaNode)>) -> SchemaNode {
        SchemaNode::object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn type_labels_render_hints_and_nesting() {
        assert_eq!(
            SchemaNode::string(Some(FormatHint::Email)).type_label(),
            "string<email>"
        );
        assert_eq!(
            SchemaNode::number(Some(FormatHint::Integer)).type_label(),
            "number<integer>"
        );
        assert_eq!(
            SchemaNode::array(SchemaNode::string(None), true).type_label(),
            "array<string>"
        );
        assert_eq!(
            SchemaNode::union(vec![
                SchemaNode::string(None),
                SchemaNode::number(Some(FormatHint::Integer)),
            ])
            .type_label(),
            "oneOf(string, number<integer>)"
        );
    }

    #[test]
    fn same_kind_ignores_payload() {
        let a = SchemaNode::string(Some(FormatHint::Uuid));
        let b = SchemaNode::string(None);
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&SchemaNode::number(None)));
    }

    #[test]
    fn object_constructor_requires_all_keys() {
        let node = object_of(vec![
            ("id", SchemaNode::number(Some(FormatHint::Integer))),
            ("name", SchemaNode::string(None)),
        ]);
        match &node.kind {
            SchemaKind::Object { required, .. } => {
                assert!(required.contains("id"));
                assert!(required.contains("name"));
            }
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn validate_rejects_orphan_required_field() {
        let mut node = object_of(vec![("id", SchemaNode::number(None))]);
        if let SchemaKind::Object { required, .. } = &mut node.kind {
            required.insert("ghost".to_string());
        }
        assert!(node.validate().is_err());
    }

    #[test]
    fn validate_rejects_degenerate_union() {
        let node = SchemaNode::union(vec![SchemaNode::string(None)]);
        assert!(node.validate().is_err());

        let nested = SchemaNode::union(vec![
            SchemaNode::string(None),
            SchemaNode::union(vec![
                SchemaNode::number(None),
                SchemaNode::boolean(),
            ]),
        ]);
        assert!(nested.validate().is_err());
    }

    #[test]
    fn validate_accepts_inferred_shapes() {
        let node = object_of(vec![
            ("id", SchemaNode::number(Some(FormatHint::Integer))),
            (
                "tags",
                SchemaNode::array(SchemaNode::string(None), true),
            ),
        ]);
        node.validate().unwrap();
    }

    #[test]
    fn serde_roundtrip_is_tagged_on_kind() {
        let node = object_of(vec![(
            "created_at",
            SchemaNode::string(Some(FormatHint::IsoDateTime)),
        )]);

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "object");
        assert_eq!(json["properties"]["created_at"]["kind"], "string");
        assert_eq!(json["properties"]["created_at"]["format"], "iso-datetime");

        let parsed: SchemaNode = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, node);
    }

    #[test]
    fn join_path_handles_root() {
        assert_eq!(join_path("", "id"), "id");
        assert_eq!(join_path("user", "id"), "user.id");
    }
}
