//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExamplesCommand, ExamplesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Mutating example use-cases.
    pub examples: Arc<dyn ExamplesCommand>,
    /// Read-only example use-cases.
    pub examples_query: Arc<dyn ExamplesQuery>,
}

impl HttpState {
    /// Bundle the example ports.
    pub fn new(examples: Arc<dyn ExamplesCommand>, examples_query: Arc<dyn ExamplesQuery>) -> Self {
        Self {
            examples,
            examples_query,
        }
    }

    /// Serve both ports from one service instance.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ExamplesCommand + ExamplesQuery + 'static,
    {
        Self {
            examples: service.clone(),
            examples_query: service,
        }
    }
}
