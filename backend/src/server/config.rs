//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) api_prefix: String,
    pub(crate) docs: Option<utoipa::openapi::OpenApi>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl ServerConfig {
    /// Serve the API under `api_prefix` (for example `/api/v1`) on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, api_prefix: impl Into<String>) -> Self {
        Self {
            bind_addr,
            api_prefix: api_prefix.into(),
            docs: None,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Serve Swagger UI at `/docs` and the document at `/api-docs/openapi.json`.
    #[must_use]
    pub fn with_docs(mut self, docs: utoipa::openapi::OpenApi) -> Self {
        self.docs = Some(docs);
        self
    }

    /// Replace the wall clock used to stamp record timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the API path prefix.
    #[must_use]
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }
}
