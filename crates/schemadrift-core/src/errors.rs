//! Error types for schemadrift.

use std::borrow::Cow;

use thiserror::Error;

/// Errors surfaced by the drift core.
///
/// Inference and merge are total over well-formed input; the only failure
/// the core itself raises is a precondition violation on a structurally
/// invalid node. Callers must not confuse this with an empty change list.
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("invalid schema node at `{path}`: {details}")]
    InvalidNode {
        path: String,
        details: Cow<'static, str>,
    },
}

impl DriftError {
    pub fn invalid(path: &str, details: impl Into<Cow<'static, str>>) -> Self {
        DriftError::InvalidNode {
            path: if path.is_empty() {
                "(root)".to_string()
            } else {
                path.to_string()
            },
            details: details.into(),
        }
    }
}

pub type DriftResult<T> = Result<T, DriftError>;
