//! Success envelope shared by every API endpoint.
//!
//! ```json
//! { "data": { ... }, "message": "Example created successfully", "statusCode": 201 }
//! ```

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform success payload wrapping handler data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Endpoint-specific payload.
    pub data: T,
    /// Human-readable outcome.
    #[schema(example = "Example retrieved successfully")]
    pub message: String,
    /// HTTP status code repeated in the body.
    #[schema(example = 200)]
    pub status_code: u16,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data` for a response with `status`.
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status_code: status.as_u16(),
        }
    }

    /// Serialise into an HTTP response carrying the same status.
    pub fn respond(status: StatusCode, data: T, message: impl Into<String>) -> HttpResponse {
        HttpResponse::build(status).json(Self::new(status, data, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn envelope_serialises_status_code_in_camel_case() {
        let envelope = ApiResponse::new(StatusCode::CREATED, "x", "done");
        let value = serde_json::to_value(envelope).expect("serialise envelope");
        assert_eq!(
            value,
            json!({ "data": "x", "message": "done", "statusCode": 201 })
        );
    }
}
