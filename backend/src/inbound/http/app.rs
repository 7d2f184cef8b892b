//! Root greeting endpoint.
//!
//! ```text
//! GET /api/v1
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get};

use crate::inbound::http::response::ApiResponse;

/// Greeting returned by the root endpoint.
pub const HELLO_MESSAGE: &str = "Hello World!";

/// Return the greeting.
#[utoipa::path(
    get,
    path = "/api/v1",
    responses(
        (status = 200, description = "Hello message retrieved successfully", body = ApiResponse<String>)
    ),
    tags = ["app"],
    operation_id = "getHello"
)]
#[get("")]
pub async fn get_hello() -> HttpResponse {
    ApiResponse::respond(
        StatusCode::OK,
        HELLO_MESSAGE,
        "Hello message retrieved successfully",
    )
}
