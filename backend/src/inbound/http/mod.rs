//! HTTP inbound adapter exposing REST endpoints.

pub mod app;
pub mod error;
pub mod examples;
pub mod health;
pub mod response;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
