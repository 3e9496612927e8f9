//! Classified drift changes and their severity model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display form of the empty (root) path.
pub const ROOT_PATH: &str = "(root)";

/// How much a change is likely to hurt a consumer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Safe or additive.
    Info,
    /// Worth investigating.
    Warning,
    /// Likely to break a consumer.
    Breaking,
}

impl Severity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Breaking => "breaking",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of detectable structural changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    FieldAdded,
    FieldRemoved,
    FieldRenamed,
    TypeChanged,
    NestingChanged,
    NullableChanged,
    FormatChanged,
    RequiredChanged,
    ArrayItemsChanged,
    HomogeneityChanged,
}

impl ChangeKind {
    /// Fixed severity mapping; not configurable per call.
    pub const fn severity(&self) -> Severity {
        match self {
            ChangeKind::FieldAdded | ChangeKind::FormatChanged => Severity::Info,
            ChangeKind::FieldRemoved
            | ChangeKind::TypeChanged
            | ChangeKind::NestingChanged => Severity::Breaking,
            ChangeKind::NullableChanged
            | ChangeKind::FieldRenamed
            | ChangeKind::RequiredChanged
            | ChangeKind::ArrayItemsChanged
            | ChangeKind::HomogeneityChanged => Severity::Warning,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::FieldAdded => "field_added",
            ChangeKind::FieldRemoved => "field_removed",
            ChangeKind::FieldRenamed => "field_renamed",
            ChangeKind::TypeChanged => "type_changed",
            ChangeKind::NestingChanged => "nesting_changed",
            ChangeKind::NullableChanged => "nullable_changed",
            ChangeKind::FormatChanged => "format_changed",
            ChangeKind::RequiredChanged => "required_changed",
            ChangeKind::ArrayItemsChanged => "array_items_changed",
            ChangeKind::HomogeneityChanged => "homogeneity_changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected difference between two schema versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub severity: Severity,
    /// Dotted field path; `(root)` for the top level, `[]` denotes array
    /// items generically (never an index).
    pub path: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl Change {
    pub fn new(
        kind: ChangeKind,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let path: String = path.into();
        Self {
            kind,
            severity: kind.severity(),
            path: if path.is_empty() {
                ROOT_PATH.to_string()
            } else {
                path
            },
            message: message.into(),
            before: None,
            after: None,
        }
    }

    pub fn with_before(mut self, label: impl Into<String>) -> Self {
        self.before = Some(label.into());
        self
    }

    pub fn with_after(mut self, label: impl Into<String>) -> Self {
        self.after = Some(label.into());
        self
    }
}

/// Change counts by severity plus the aggregate compatibility score.
///
/// Derived from a change list, never stored independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftSummary {
    pub breaking: usize,
    pub warning: usize,
    pub info: usize,
    pub total: usize,
    pub compatibility_score: u8,
}

impl DriftSummary {
    pub fn from_changes(changes: &[Change]) -> Self {
        let mut breaking = 0;
        let mut warning = 0;
        let mut info = 0;
        for change in changes {
            match change.severity {
                Severity::Breaking => breaking += 1,
                Severity::Warning => warning += 1,
                Severity::Info => info += 1,
            }
        }
        Self {
            breaking,
            warning,
            info,
            total: changes.len(),
            compatibility_score: compatibility_score(changes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// 0-100 heuristic summarizing aggregate severity: start at 100, subtract
/// 15 per breaking change, 5 per warning, 1 per info, floored at 0.
pub fn compatibility_score(changes: &[Change]) -> u8 {
    let penalty: u32 = changes
        .iter()
        .map(|c| match c.severity {
            Severity::Breaking => 15,
            Severity::Warning => 5,
            Severity::Info => 1,
        })
        .sum();
    100u32.saturating_sub(penalty) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_table_is_fixed() {
        assert_eq!(ChangeKind::FieldAdded.severity(), Severity::Info);
        assert_eq!(ChangeKind::FormatChanged.severity(), Severity::Info);
        assert_eq!(ChangeKind::FieldRemoved.severity(), Severity::Breaking);
        assert_eq!(ChangeKind::TypeChanged.severity(), Severity::Breaking);
        assert_eq!(ChangeKind::NestingChanged.severity(), Severity::Breaking);
        assert_eq!(ChangeKind::NullableChanged.severity(), Severity::Warning);
        assert_eq!(ChangeKind::ArrayItemsChanged.severity(), Severity::Warning);
        assert_eq!(ChangeKind::FieldRenamed.severity(), Severity::Warning);
        assert_eq!(ChangeKind::RequiredChanged.severity(), Severity::Warning);
        assert_eq!(
            ChangeKind::HomogeneityChanged.severity(),
            Severity::Warning
        );
    }

    #[test]
    fn empty_path_displays_as_root() {
        let change = Change::new(ChangeKind::TypeChanged, "", "type changed");
        assert_eq!(change.path, ROOT_PATH);
    }

    #[test]
    fn score_subtracts_per_severity() {
        let changes = vec![
            Change::new(ChangeKind::FieldRemoved, "a", "removed"),
            Change::new(ChangeKind::FieldRenamed, "b", "renamed"),
            Change::new(ChangeKind::FieldAdded, "c", "added"),
        ];
        assert_eq!(compatibility_score(&changes), 79);
    }

    #[test]
    fn score_floors_at_zero() {
        let changes: Vec<Change> = (0..10)
            .map(|i| {
                Change::new(
                    ChangeKind::TypeChanged,
                    format!("f{i}"),
                    "type changed",
                )
            })
            .collect();
        assert_eq!(compatibility_score(&changes), 0);
    }

    #[test]
    fn summary_counts_by_severity() {
        let changes = vec![
            Change::new(ChangeKind::FieldRemoved, "a", "removed"),
            Change::new(ChangeKind::NullableChanged, "b", "nullable"),
            Change::new(ChangeKind::FieldAdded, "c", "added"),
            Change::new(ChangeKind::FieldAdded, "d", "added"),
        ];
        let summary = DriftSummary::from_changes(&changes);
        assert_eq!(summary.breaking, 1);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.info, 2);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.compatibility_score, 100 - 15 - 5 - 2);
    }

    #[test]
    fn severity_ordering_supports_thresholds() {
        assert!(Severity::Breaking > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
