//! Domain ports.
//!
//! Driven ports ([`ExampleRepository`]) describe what the domain needs from
//! storage adapters. Driving ports ([`ExamplesCommand`], [`ExamplesQuery`])
//! are the use-cases inbound adapters call.

mod example_repository;
mod examples;

pub use example_repository::{ExampleRepository, ExampleRepositoryError};
#[cfg(test)]
pub use example_repository::MockExampleRepository;
pub use examples::{ExamplesCommand, ExamplesQuery};
