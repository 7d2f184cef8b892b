//! Port for example record storage.
//!
//! Implementations own the record collection and the identifier counter.
//! Every method runs to completion as a single critical section; callers never
//! observe a half-applied create, update, or remove.

use chrono::{DateTime, Utc};

use crate::domain::{DeletionConfirmation, Example, ExampleDraft, ExamplePatch, ExampleQuery};

/// Errors raised by example repositories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExampleRepositoryError {
    /// No record carries the requested identifier.
    #[error("example {id} not found")]
    NotFound {
        /// Identifier that was looked up.
        id: String,
    },
}

impl ExampleRepositoryError {
    /// Shorthand for [`ExampleRepositoryError::NotFound`].
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

/// Storage contract for example records.
///
/// # Identifier semantics
///
/// - `create` allocates `example-<n>` from a counter that starts at 1 and
///   increases by exactly one per call.
/// - Identifiers are never reused, even after `remove`.
///
/// # Ordering
///
/// Records are kept in insertion order. `find_all` returns a snapshot, so
/// later mutations never leak into a result already handed out.
#[cfg_attr(test, mockall::automock)]
pub trait ExampleRepository: Send + Sync {
    /// Append a new record stamped with `now`.
    fn create(&self, draft: ExampleDraft, now: DateTime<Utc>) -> Example;

    /// Snapshot, filter, and order the collection.
    fn find_all(&self, query: &ExampleQuery) -> Vec<Example>;

    /// Look up a record by identifier.
    fn find_one(&self, id: &str) -> Result<Example, ExampleRepositoryError>;

    /// Merge `patch` into the record and refresh its `updated_at`.
    fn update(
        &self,
        id: &str,
        patch: ExamplePatch,
        now: DateTime<Utc>,
    ) -> Result<Example, ExampleRepositoryError>;

    /// Permanently delete the record.
    fn remove(&self, id: &str) -> Result<DeletionConfirmation, ExampleRepositoryError>;
}
