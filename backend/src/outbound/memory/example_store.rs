//! Process-local [`ExampleRepository`] backed by a vector.
//!
//! Records are kept in insertion order. Identifiers come from a counter that
//! only ever increases, so a deleted identifier is never handed out again.
//! The vector and the counter share one lock, which keeps every operation
//! atomic with respect to the others.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::ports::{ExampleRepository, ExampleRepositoryError};
use crate::domain::{
    DeletionConfirmation, Example, ExampleDraft, ExampleId, ExamplePatch, ExampleQuery,
};

#[derive(Debug)]
struct StoreState {
    examples: Vec<Example>,
    next_sequence: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            examples: Vec::new(),
            next_sequence: 1,
        }
    }
}

impl StoreState {
    fn position(&self, id: &str) -> Result<usize, ExampleRepositoryError> {
        self.examples
            .iter()
            .position(|example| example.id() == id)
            .ok_or_else(|| ExampleRepositoryError::not_found(id))
    }
}

/// Thread-safe in-memory example store.
#[derive(Debug, Default)]
pub struct ExampleStore {
    state: Mutex<StoreState>,
}

impl ExampleStore {
    /// Create an empty store whose first identifier is `example-1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().examples.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every mutation completes before the guard drops, so a poisoned lock
    // still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExampleRepository for ExampleStore {
    fn create(&self, draft: ExampleDraft, now: DateTime<Utc>) -> Example {
        let mut state = self.lock();
        let id = ExampleId::from_sequence(state.next_sequence);
        state.next_sequence = state.next_sequence.saturating_add(1);
        let example = Example::new(id, draft, now);
        state.examples.push(example.clone());
        debug!(example_id = %example.id(), stored = state.examples.len(), "stored example");
        example
    }

    fn find_all(&self, query: &ExampleQuery) -> Vec<Example> {
        let snapshot = self.lock().examples.clone();
        query.apply(snapshot)
    }

    fn find_one(&self, id: &str) -> Result<Example, ExampleRepositoryError> {
        self.lock()
            .examples
            .iter()
            .find(|example| example.id() == id)
            .cloned()
            .ok_or_else(|| ExampleRepositoryError::not_found(id))
    }

    fn update(
        &self,
        id: &str,
        patch: ExamplePatch,
        now: DateTime<Utc>,
    ) -> Result<Example, ExampleRepositoryError> {
        let mut state = self.lock();
        let position = state.position(id)?;
        let example = state
            .examples
            .get_mut(position)
            .ok_or_else(|| ExampleRepositoryError::not_found(id))?;
        example.apply(patch, now);
        Ok(example.clone())
    }

    fn remove(&self, id: &str) -> Result<DeletionConfirmation, ExampleRepositoryError> {
        let mut state = self.lock();
        let position = state.position(id)?;
        state.examples.remove(position);
        debug!(example_id = id, stored = state.examples.len(), "removed example");
        Ok(DeletionConfirmation::for_id(id))
    }
}

#[cfg(test)]
#[path = "example_store_tests.rs"]
mod tests;
