//! Versioned in-memory snapshot store.
//!
//! Keeps every schema version per key so drift reports can compare any two
//! points in a key's history, not just the latest pair. Deduplication is by
//! structural fingerprint: re-saving a schema identical to the current
//! version is a no-op that returns the existing version number.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use schemadrift_core::{SchemaSnapshot, SnapshotStore};

type MemStore = Arc<RwLock<HashMap<String, Vec<SchemaSnapshot>>>>;

/// Process-local [`SnapshotStore`].
///
/// Versions per key are contiguous and ascending; the vector index is
/// `version - 1`. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    inner: MemStore,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot for a key, synchronously.
    pub fn get_latest(&self, key: &str) -> Option<SchemaSnapshot> {
        let guard = self.inner.read().unwrap();
        guard.get(key).and_then(|versions| versions.last().cloned())
    }

    /// Snapshot that was current at a given timestamp.
    ///
    /// Returns the most recent version created at or before the timestamp,
    /// or `None` if the key had no snapshot yet.
    pub fn get_at_timestamp(
        &self,
        key: &str,
        timestamp: DateTime<Utc>,
    ) -> Option<SchemaSnapshot> {
        let guard = self.inner.read().unwrap();
        guard.get(key).and_then(|versions| {
            versions
                .iter()
                .filter(|s| s.created_at <= timestamp)
                .max_by_key(|s| s.created_at)
                .cloned()
        })
    }

    /// Total snapshots across all keys.
    pub fn len(&self) -> usize {
        let guard = self.inner.read().unwrap();
        guard.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        let guard = self.inner.read().unwrap();
        guard.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn save(&self, snapshot: SchemaSnapshot) -> Result<u32> {
        let mut guard = self.inner.write().unwrap();
        let entry = guard.entry(snapshot.key.clone()).or_default();

        // Idempotent against the current version only; an older fingerprint
        // reappearing is a real revert and gets a new version.
        if let Some(latest) = entry.last() {
            if latest.fingerprint == snapshot.fingerprint {
                return Ok(latest.version);
            }
        }

        let version = (entry.len() as u32) + 1;
        entry.push(SchemaSnapshot {
            version,
            ..snapshot
        });
        Ok(version)
    }

    async fn load(&self, key: &str) -> Result<Option<SchemaSnapshot>> {
        Ok(self.get_latest(key))
    }

    async fn load_version(
        &self,
        key: &str,
        version: u32,
    ) -> Result<Option<SchemaSnapshot>> {
        let guard = self.inner.read().unwrap();
        Ok(guard.get(key).and_then(|versions| {
            versions.iter().find(|s| s.version == version).cloned()
        }))
    }

    async fn list_versions(&self, key: &str) -> Result<Vec<u32>> {
        let guard = self.inner.read().unwrap();
        Ok(guard
            .get(key)
            .map(|versions| versions.iter().map(|s| s.version).collect())
            .unwrap_or_default())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let guard = self.inner.read().unwrap();
        let mut keys: Vec<String> = guard.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<usize> {
        let mut guard = self.inner.write().unwrap();
        Ok(guard.remove(key).map(|versions| versions.len()).unwrap_or(0))
    }
}
