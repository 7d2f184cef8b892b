//! Example use-cases.
//!
//! [`ExampleService`] implements the driving ports on top of any
//! [`ExampleRepository`]. It stamps timestamps from an injected clock, turns
//! repository failures into domain [`Error`]s, and paginates listings.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, Paginated};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    ExampleRepository, ExampleRepositoryError, ExamplesCommand, ExamplesQuery,
};
use crate::domain::{
    DeletionConfirmation, Error, Example, ExampleDraft, ExamplePatch, ExampleQuery,
};

/// Example service implementing [`ExamplesCommand`] and [`ExamplesQuery`].
pub struct ExampleService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ExampleService<R> {
    /// Create a service over `repository`, reading time from `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn map_repository_error(error: ExampleRepositoryError) -> Error {
    match error {
        ExampleRepositoryError::NotFound { id } => {
            Error::not_found(format!("Example with ID {id} not found"))
                .with_details(json!({ "id": id }))
        }
    }
}

#[async_trait]
impl<R> ExamplesCommand for ExampleService<R>
where
    R: ExampleRepository,
{
    async fn create(&self, draft: ExampleDraft) -> Result<Example, Error> {
        let example = self.repository.create(draft, self.clock.utc());
        info!(example_id = %example.id(), "example created");
        Ok(example)
    }

    async fn update(&self, id: &str, patch: ExamplePatch) -> Result<Example, Error> {
        let empty_patch = patch.is_empty();
        let example = self
            .repository
            .update(id, patch, self.clock.utc())
            .map_err(map_repository_error)?;
        info!(example_id = %example.id(), empty_patch, "example updated");
        Ok(example)
    }

    async fn delete(&self, id: &str) -> Result<DeletionConfirmation, Error> {
        let confirmation = self.repository.remove(id).map_err(map_repository_error)?;
        info!(example_id = id, "example deleted");
        Ok(confirmation)
    }
}

#[async_trait]
impl<R> ExamplesQuery for ExampleService<R>
where
    R: ExampleRepository,
{
    async fn list(
        &self,
        query: ExampleQuery,
        page: PageRequest,
    ) -> Result<Paginated<Example>, Error> {
        let results = self.repository.find_all(&query);
        let paginated = page.paginate(results);
        debug!(
            search = query.search.as_deref(),
            total = paginated.pagination.total,
            page = paginated.pagination.page,
            returned = paginated.items.len(),
            "examples listed"
        );
        Ok(paginated)
    }

    async fn fetch(&self, id: &str) -> Result<Example, Error> {
        self.repository.find_one(id).map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "example_service_tests.rs"]
mod tests;
