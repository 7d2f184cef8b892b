//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Extractor failures (malformed JSON bodies or query strings) and
//! unmatched routes are funnelled through the same [`Error`] payload.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned for requests that match no route.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "The resource you are looking for does not exist";

/// Message that replaces every internal error before it reaches a client.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong on our end";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(INTERNAL_ERROR_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    }
}

fn json_payload_error(err: &JsonPayloadError) -> Error {
    let message = match err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        other => format!("invalid request body: {other}"),
    };
    Error::invalid_request(message).with_details(json!({
        "field": "body",
        "code": "invalid_value",
    }))
}

/// Extractor configuration turning JSON body failures into `400` responses.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!(error = %err, "rejected JSON body");
        json_payload_error(&err).into()
    })
}

/// Extractor configuration turning query string failures into `400` responses.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request(format!("invalid query string: {err}"))
            .with_details(json!({ "field": "query", "code": "invalid_value" }))
            .into()
    })
}

/// Fallback handler for requests that match no route.
pub async fn route_not_found(request: HttpRequest) -> ApiResult<HttpResponse> {
    debug!(method = %request.method(), path = request.path(), "no route matched");
    Err(Error::not_found(ROUTE_NOT_FOUND_MESSAGE).with_details(json!({ "path": request.path() })))
}
