//! Domain model, ports, and services.
//!
//! Purpose: keep the example records, their query rules, and the use-case
//! services free of transport and storage concerns.
//!
//! Public surface:
//! - [`Example`] and its inputs ([`ExampleDraft`], [`ExamplePatch`]).
//! - [`ExampleQuery`]: search and ordering rules for listings.
//! - [`ExampleService`]: use-cases over any [`ports::ExampleRepository`].
//! - [`Error`] / [`ErrorCode`]: failures shared by every adapter.
//! - [`TraceId`]: request correlation identifier.

pub mod error;
pub mod example;
pub mod example_query;
pub mod example_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::example::{
    DeletionConfirmation, EXAMPLE_ID_PREFIX, Example, ExampleDraft, ExampleId, ExampleName,
    ExamplePatch, ExampleValidationError, Price,
};
pub use self::example_query::{
    ExampleQuery, ExampleSort, ExampleSortKey, SortOrder, UnknownSortValue,
};
pub use self::example_service::ExampleService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
