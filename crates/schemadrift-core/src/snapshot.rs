//! Persisted schema snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::SchemaNode;

/// One persisted schema version for a key.
///
/// The core only produces and consumes the `schema` field; everything else
/// is bookkeeping for the store and its consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Opaque identifier for the logical endpoint or value being tracked,
    /// e.g. `GET /api/v2/users/:id`.
    pub key: String,

    /// The learned schema.
    pub schema: SchemaNode,

    /// Structural fingerprint of `schema`; stable across value changes.
    pub fingerprint: String,

    /// Version number within the key, starting at 1. Assigned by the store.
    pub version: u32,

    /// Raw samples folded into `schema`.
    pub sample_count: u64,

    /// When this snapshot was taken.
    pub created_at: DateTime<Utc>,

    /// Free-form caller metadata carried alongside the schema.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl SchemaSnapshot {
    pub fn new(
        key: impl Into<String>,
        schema: SchemaNode,
        fingerprint: impl Into<String>,
    ) -> Self {
        let sample_count = schema.sample_count;
        Self {
            key: key.into(),
            schema,
            fingerprint: fingerprint.into(),
            version: 1,
            sample_count,
            created_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
