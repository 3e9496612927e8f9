//! schemadrift core types
//!
//! This crate defines the canonical [`SchemaNode`] model shared by the
//! inference and diff engines, the classified [`Change`] / [`DriftSummary`]
//! types a drift comparison produces, the [`SchemaSnapshot`] form the
//! persistence layer stores, and the [`SnapshotStore`] trait that layer
//! implements.
//!
//! The model is deliberately closed: the `kind` discriminant is a tagged
//! enum, so a string node cannot carry array fields and a union cannot carry
//! object properties. Engines treat nodes as immutable and produce new nodes
//! rather than mutating in place, which keeps `infer`, `merge`, and `diff`
//! safe to call concurrently from multiple tasks.

use anyhow::Result;
use async_trait::async_trait;

pub mod change;
pub mod errors;
pub mod schema;
pub mod snapshot;

pub use change::{
    compatibility_score, Change, ChangeKind, DriftSummary, Severity, ROOT_PATH,
};
pub use errors::{DriftError, DriftResult};
pub use schema::{join_path, FormatHint, SchemaKind, SchemaNode};
pub use snapshot::SchemaSnapshot;

/// Persistence collaborator for learned schemas.
///
/// Keys are opaque strings (typically `METHOD /path` identifiers); versions
/// are per-key and start at 1. Implementations decide retention; the core
/// never deletes on its own.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist a snapshot, assigning the next version for its key.
    ///
    /// Saving a schema whose fingerprint matches the latest stored version
    /// is idempotent and returns the existing version number.
    async fn save(&self, snapshot: SchemaSnapshot) -> Result<u32>;

    /// Latest snapshot for a key.
    async fn load(&self, key: &str) -> Result<Option<SchemaSnapshot>>;

    /// Specific version for a key.
    async fn load_version(
        &self,
        key: &str,
        version: u32,
    ) -> Result<Option<SchemaSnapshot>>;

    /// All version numbers stored for a key, ascending.
    async fn list_versions(&self, key: &str) -> Result<Vec<u32>>;

    /// All keys with at least one stored snapshot.
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Remove every version for a key, returning how many were removed.
    async fn delete(&self, key: &str) -> Result<usize>;
}
