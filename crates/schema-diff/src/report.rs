//! Drift report assembly.

use serde::{Deserialize, Serialize};

use schemadrift_core::{Change, DriftError, DriftSummary, SchemaNode, Severity};

use crate::diff::diff;

/// The result of comparing two schema versions: the ordered change list
/// plus severity totals and the compatibility score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftReport {
    pub changes: Vec<Change>,
    pub summary: DriftSummary,
    /// Convenience flag mirroring `summary.breaking > 0` for consumers that
    /// only gate on it.
    pub has_breaking_changes: bool,
}

impl DriftReport {
    pub fn new(changes: Vec<Change>) -> Self {
        let summary = DriftSummary::from_changes(&changes);
        let has_breaking_changes = summary.breaking > 0;
        Self {
            changes,
            summary,
            has_breaking_changes,
        }
    }

    /// Diff two schemas and wrap the result.
    pub fn compare(
        before: &SchemaNode,
        after: &SchemaNode,
    ) -> Result<Self, DriftError> {
        Ok(Self::new(diff(before, after)?))
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether the report should fail a gate configured at `threshold`.
    ///
    /// A report blocks when any change is at or above the threshold, so a
    /// gate at [`Severity::Info`] blocks on any drift at all.
    pub fn is_blocking(&self, threshold: Severity) -> bool {
        self.changes.iter().any(|c| c.severity >= threshold)
    }

    pub fn compatibility_score(&self) -> u8 {
        self.summary.compatibility_score
    }

    /// Changes at exactly the given severity, in emission order.
    pub fn changes_at(&self, severity: Severity) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(move |c| c.severity == severity)
    }
}
