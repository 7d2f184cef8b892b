//! In-memory adapters.
//!
//! Contents live for the lifetime of the process and are lost on restart.

mod example_store;

pub use example_store::ExampleStore;
