//! Schema inference - structural schema learning from JSON-like values.
//!
//! This crate turns concrete values into [`SchemaNode`] descriptors and
//! folds schemas from successive samples into one another, which is how
//! always-present and sometimes-present fields are told apart.
//!
//! # Example
//!
//! ```
//! use schema_inference::{infer, merge};
//! use serde_json::json;
//!
//! let a = infer(&json!({"id": 1, "name": "Alice", "email": "a@example.com"}));
//! let b = infer(&json!({"id": 2, "name": "Bob"}));
//!
//! let learned = merge(&a, &b);
//! assert_eq!(learned.sample_count, 2);
//! ```
//!
//! For continuous learning across many endpoint keys, use
//! [`SchemaLearner`], which tracks a fingerprinted, versioned schema per
//! key and reports whether each new sample evolved it.

mod fingerprint;
mod formats;
mod infer;
mod learner;
mod merge;

pub use fingerprint::{fingerprint, short_fingerprint};
pub use formats::detect_string_format;
pub use infer::{infer, infer_optional};
pub use learner::{ObserveResult, SchemaLearner};
pub use merge::{build_union, merge};

pub use schemadrift_config::SensingConfig;
pub use schemadrift_core::{SchemaNode, SchemaSnapshot};
