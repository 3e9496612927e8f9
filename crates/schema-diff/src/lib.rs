//! Schema drift detection.
//!
//! Compares two [`SchemaNode`](schemadrift_core::SchemaNode) trees and
//! reports every difference as a classified change: what kind of change,
//! where in the tree, how severe. Severity is a fixed mapping from change
//! kind (a removed field is always breaking, a new optional field is always
//! informational), and the summary folds severities into a 0-100
//! compatibility score.
//!
//! Renamed fields are recognized heuristically so `role` becoming `roles`
//! shows up as one rename instead of a removal plus an addition.
//!
//! ```
//! use schema_diff::DriftReport;
//! use schema_inference::infer;
//! use serde_json::json;
//!
//! let v1 = infer(&json!({"id": 1, "role": "admin"}));
//! let v2 = infer(&json!({"id": "a1", "roles": "admin"}));
//!
//! let report = DriftReport::compare(&v1, &v2).unwrap();
//! assert!(report.has_breaking_changes); // id: number -> string
//! assert!(report.compatibility_score() < 100);
//! ```

mod diff;
mod rename;
mod report;

pub use diff::diff;
pub use rename::detect_renames;
pub use report::DriftReport;
