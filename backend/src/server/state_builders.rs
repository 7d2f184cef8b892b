//! Builders wiring storage adapters to the HTTP state ports.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ExampleService;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::ExampleStore;

/// Build handler state backed by a fresh in-memory store.
///
/// Every call yields an independent store; share the returned state between
/// workers to serve one collection.
pub fn build_http_state(clock: Arc<dyn Clock>) -> HttpState {
    let store = Arc::new(ExampleStore::new());
    HttpState::from_service(Arc::new(ExampleService::new(store, clock)))
}
