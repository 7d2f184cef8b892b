//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local storage backing the example repository.
//!
//! Adapters translate between domain types and their storage representation.
//! They contain no business logic.

pub mod memory;
