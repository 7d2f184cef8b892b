//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    assert_eq!(
        Error::try_new(ErrorCode::NotFound, message),
        Err(ErrorValidationError::EmptyMessage)
    );
}

#[rstest]
fn constructors_set_expected_codes() {
    assert_eq!(Error::invalid_request("bad").code(), ErrorCode::InvalidRequest);
    assert_eq!(Error::not_found("missing").code(), ErrorCode::NotFound);
    assert_eq!(Error::internal("boom").code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn constructors_capture_the_scoped_trace_id() {
    let trace_id = TraceId::generate();
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
}

#[rstest]
fn serialises_camel_case_and_omits_empty_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise error");
    assert_eq!(value, json!({ "code": "not_found", "message": "missing" }));

    let value = serde_json::to_value(
        Error::invalid_request("bad")
            .with_trace_id("abc")
            .with_details(json!({ "field": "name" })),
    )
    .expect("serialise error");
    assert_eq!(value["traceId"], "abc");
    assert_eq!(value["details"]["field"], "name");
}

#[rstest]
fn deserialisation_rejects_blank_trace_ids() {
    let payload = json!({ "code": "not_found", "message": "missing", "traceId": " " });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}

#[rstest]
fn deserialisation_rejects_unknown_fields() {
    let payload = json!({ "code": "not_found", "message": "missing", "extra": true });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}

#[rstest]
fn with_message_ignores_blank_replacements() {
    let error = Error::not_found("first message").with_message("  ");
    assert_eq!(error.message(), "first message");
    let error = error.with_message("replaced");
    assert_eq!(error.message(), "replaced");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
