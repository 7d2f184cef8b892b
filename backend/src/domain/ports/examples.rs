//! Driving ports for example use-cases.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use crate::domain::{
    DeletionConfirmation, Error, Example, ExampleDraft, ExamplePatch, ExampleQuery,
};

/// Mutating example use-cases.
#[async_trait]
pub trait ExamplesCommand: Send + Sync {
    /// Create a record from a validated draft.
    async fn create(&self, draft: ExampleDraft) -> Result<Example, Error>;

    /// Apply a partial update.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] for unknown ids.
    async fn update(&self, id: &str, patch: ExamplePatch) -> Result<Example, Error>;

    /// Delete a record.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] for unknown ids.
    async fn delete(&self, id: &str) -> Result<DeletionConfirmation, Error>;
}

/// Read-only example use-cases.
#[async_trait]
pub trait ExamplesQuery: Send + Sync {
    /// Search, order, then paginate the collection.
    async fn list(
        &self,
        query: ExampleQuery,
        page: PageRequest,
    ) -> Result<Paginated<Example>, Error>;

    /// Fetch a single record.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] for unknown ids.
    async fn fetch(&self, id: &str) -> Result<Example, Error>;
}
