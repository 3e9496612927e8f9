//! Schema learning configuration.
//!
//! Controls which keys the multi-sample learner tracks and how many samples
//! it folds into a schema before considering it stable. The inference, merge,
//! and diff operations themselves take no configuration; the severity table
//! and rename rules are fixed.

use serde::{Deserialize, Serialize};

/// Configuration for the multi-sample schema learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensingConfig {
    /// Master switch - disabled by default to avoid overhead.
    #[serde(default)]
    pub enabled: bool,

    /// Key filtering - which endpoint keys to learn schemas for.
    #[serde(default)]
    pub keys: KeyFilter,

    /// Stop folding new samples into a key's schema after this many
    /// observations. Set to 0 for unlimited sampling.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            keys: KeyFilter::default(),
            max_samples: default_max_samples(),
        }
    }
}

impl SensingConfig {
    /// Check if learning is enabled for a given key.
    pub fn should_sense_key(&self, key: &str) -> bool {
        if !self.enabled {
            return false;
        }
        self.keys.matches(key)
    }

    /// Whether a key has exhausted its sampling budget.
    pub fn sampling_exhausted(&self, sample_count: u64) -> bool {
        self.max_samples > 0 && sample_count >= self.max_samples as u64
    }
}

/// Filter which keys the learner tracks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeyFilter {
    /// Keys to include (if empty, all keys are included).
    /// Supports patterns: `GET /users`, `GET /admin/%`, `*`
    #[serde(default)]
    pub include: Vec<String>,

    /// Keys to exclude (evaluated after include).
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl KeyFilter {
    /// Check if a key matches the filter.
    pub fn matches(&self, key: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| matches_pattern(p, key));
        let excluded = self.exclude.iter().any(|p| matches_pattern(p, key));
        included && !excluded
    }
}

/// Simple pattern matching supporting `*` (any) and `%`/`*` suffix (prefix).
fn matches_pattern(pattern: &str, value: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('%') {
        return value.starts_with(prefix);
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return value.starts_with(prefix);
    }
    pattern == value
}

fn default_max_samples() -> usize {
    1000
}
