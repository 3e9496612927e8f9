//! Multi-sample schema learning.
//!
//! Tracks one learned schema per endpoint key, folding each observed value
//! into it and bumping a version whenever the structural fingerprint moves.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, trace};

use schemadrift_config::SensingConfig;
use schemadrift_core::{SchemaNode, SchemaSnapshot};

use crate::fingerprint::{fingerprint, short_fingerprint};
use crate::infer::infer;
use crate::merge::merge;

/// Result of observing one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserveResult {
    /// Learning is disabled for this key.
    Disabled,

    /// First sample for this key - schema initialized.
    NewSchema { fingerprint: String, version: u32 },

    /// The schema's structure changed from folding in this sample.
    Evolved {
        old_fingerprint: String,
        new_fingerprint: String,
        old_version: u32,
        new_version: u32,
    },

    /// Sample folded in without structural change.
    Unchanged { fingerprint: String, version: u32 },

    /// Sampling limit reached - schema is considered stable.
    Stabilized { fingerprint: String, version: u32 },
}

/// Per-key learned schema state.
struct KeyState {
    schema: SchemaNode,
    fingerprint: String,
    version: u32,
    first_seen: DateTime<Utc>,
    last_seen: DateTime<Utc>,
    stabilized: bool,
}

impl KeyState {
    fn new(schema: SchemaNode) -> Self {
        let fingerprint = fingerprint(&schema);
        let now = Utc::now();
        Self {
            schema,
            fingerprint,
            version: 1,
            first_seen: now,
            last_seen: now,
            stabilized: false,
        }
    }
}

/// Keyed multi-sample schema learner.
///
/// Callers hand it already-parsed values; text parsing is a collaborator's
/// job. Observing is pure computation over in-memory trees, so a learner
/// behind a lock is safe to share across tasks.
pub struct SchemaLearner {
    config: SensingConfig,
    states: HashMap<String, KeyState>,
}

impl SchemaLearner {
    pub fn new(config: SensingConfig) -> Self {
        Self {
            config,
            states: HashMap::new(),
        }
    }

    /// Create a learner with sensing enabled (for testing).
    pub fn enabled() -> Self {
        Self::new(SensingConfig {
            enabled: true,
            ..Default::default()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Fold one observed value into the schema tracked for `key`.
    pub fn observe(&mut self, key: &str, value: &Value) -> ObserveResult {
        if !self.config.should_sense_key(key) {
            return ObserveResult::Disabled;
        }

        let Some(state) = self.states.get_mut(key) else {
            let state = KeyState::new(infer(value));
            let result = ObserveResult::NewSchema {
                fingerprint: state.fingerprint.clone(),
                version: state.version,
            };
            info!(
                key = %key,
                fingerprint = %short_fingerprint(&state.fingerprint),
                "new schema discovered"
            );
            self.states.insert(key.to_string(), state);
            return result;
        };

        if state.stabilized {
            return ObserveResult::Stabilized {
                fingerprint: state.fingerprint.clone(),
                version: state.version,
            };
        }

        if self.config.sampling_exhausted(state.schema.sample_count) {
            state.stabilized = true;
            info!(
                key = %key,
                samples = state.schema.sample_count,
                "schema stabilized after sampling limit"
            );
            return ObserveResult::Stabilized {
                fingerprint: state.fingerprint.clone(),
                version: state.version,
            };
        }

        let old_fingerprint = state.fingerprint.clone();
        let old_version = state.version;

        state.schema = merge(&state.schema, &infer(value));
        state.last_seen = Utc::now();

        let new_fingerprint = fingerprint(&state.schema);
        if new_fingerprint != old_fingerprint {
            state.fingerprint = new_fingerprint.clone();
            state.version += 1;
            debug!(
                key = %key,
                old_fp = %short_fingerprint(&old_fingerprint),
                new_fp = %short_fingerprint(&state.fingerprint),
                version = state.version,
                "schema evolved"
            );
            ObserveResult::Evolved {
                old_fingerprint,
                new_fingerprint,
                old_version,
                new_version: state.version,
            }
        } else {
            trace!(
                key = %key,
                samples = state.schema.sample_count,
                "schema unchanged"
            );
            ObserveResult::Unchanged {
                fingerprint: state.fingerprint.clone(),
                version: state.version,
            }
        }
    }

    /// The learned schema for a key.
    pub fn schema(&self, key: &str) -> Option<&SchemaNode> {
        self.states.get(key).map(|s| &s.schema)
    }

    /// Current structural fingerprint for a key.
    pub fn fingerprint(&self, key: &str) -> Option<&str> {
        self.states.get(key).map(|s| s.fingerprint.as_str())
    }

    /// Samples folded into a key's schema so far.
    pub fn sample_count(&self, key: &str) -> u64 {
        self.states
            .get(key)
            .map(|s| s.schema.sample_count)
            .unwrap_or(0)
    }

    /// When a key's schema was first and most recently observed.
    pub fn observed_range(
        &self,
        key: &str,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.states.get(key).map(|s| (s.first_seen, s.last_seen))
    }

    pub fn is_stabilized(&self, key: &str) -> bool {
        self.states.get(key).map(|s| s.stabilized).unwrap_or(false)
    }

    /// All keys being tracked.
    pub fn keys(&self) -> Vec<&str> {
        self.states.keys().map(|k| k.as_str()).collect()
    }

    /// Export a key's learned schema as a persistable snapshot.
    pub fn snapshot(&self, key: &str) -> Option<SchemaSnapshot> {
        self.states.get(key).map(|state| SchemaSnapshot {
            key: key.to_string(),
            schema: state.schema.clone(),
            fingerprint: state.fingerprint.clone(),
            version: state.version,
            sample_count: state.schema.sample_count,
            created_at: state.first_seen,
            metadata: Default::default(),
        })
    }

    /// Snapshots for every tracked key.
    pub fn all_snapshots(&self) -> Vec<SchemaSnapshot> {
        let mut keys: Vec<&String> = self.states.keys().collect();
        keys.sort();
        keys.iter()
            .filter_map(|k| self.snapshot(k))
            .collect()
    }

    /// Drop tracking for a key.
    pub fn reset_key(&mut self, key: &str) {
        self.states.remove(key);
    }

    /// Drop all tracking.
    pub fn reset_all(&mut self) {
        self.states.clear();
    }

    pub fn config(&self) -> &SensingConfig {
        &self.config
    }
}
