//! Starter API library: an in-memory example record service exposed over a
//! versioned JSON HTTP API.
//!
//! - [`domain`]: records, listing rules, errors, ports and the use-case
//!   service.
//! - [`outbound`]: the in-memory store implementing the repository port.
//! - [`inbound`]: actix-web handlers, DTOs, validation and error mapping.
//! - [`server`]: application and server assembly.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
