//! End-to-end HTTP tests against the fully assembled application.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use starter_api::ApiDoc;
use starter_api::domain::TRACE_ID_HEADER;
use starter_api::inbound::http::health::HealthState;
use starter_api::server::{AppDependencies, build_app, build_http_state};
use starter_api::settings::AppSettings;
use starter_api::test_support::MutableClock;

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::at_epoch())
}

fn dependencies(clock: Arc<MutableClock>, with_docs: bool) -> AppDependencies {
    let settings = AppSettings::default();
    let health = HealthState::new();
    health.mark_ready();
    AppDependencies {
        health_state: web::Data::new(health),
        http_state: web::Data::new(build_http_state(clock)),
        api_prefix: settings.api_prefix(),
        docs: with_docs.then(|| ApiDoc::document(&settings)),
    }
}

async fn send<S>(app: &S, request: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    assert!(
        response.headers().contains_key(TRACE_ID_HEADER),
        "every response carries a trace id"
    );
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn create(name: &str, extra: Value) -> actix_http::Request {
    let mut body = json!({ "name": name });
    if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), extra) {
        target.extend(fields);
    }
    test::TestRequest::post()
        .uri("/api/v1/examples")
        .set_json(body)
        .to_request()
}

fn get(uri: &str) -> actix_http::Request {
    test::TestRequest::get().uri(uri).to_request()
}

#[rstest]
#[actix_web::test]
async fn hello_endpoint_greets(clock: Arc<MutableClock>) {
    let app = test::init_service(build_app(dependencies(clock, false))).await;
    let (status, body) = send(&app, get("/api/v1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "data": "Hello World!",
            "message": "Hello message retrieved successfully",
            "statusCode": 200,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn create_two_then_delete_first(clock: Arc<MutableClock>) {
    let app = test::init_service(build_app(dependencies(clock, false))).await;

    let (status, first) = send(&app, create("A", json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["data"]["id"], "example-1");
    let (_, second) = send(&app, create("B", json!({}))).await;
    assert_eq!(second["data"]["id"], "example-2");

    let (status, deleted) = send(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/examples/example-1")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        deleted["data"]["message"],
        "Example with ID example-1 has been deleted"
    );

    let (status, listed) = send(&app, get("/api/v1/examples")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["message"], "Examples retrieved successfully");
    let ids: Vec<&str> = listed["data"]["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["example-2"]);

    let (_, third) = send(&app, create("C", json!({}))).await;
    assert_eq!(third["data"]["id"], "example-3");
}

#[rstest]
#[actix_web::test]
async fn search_sort_and_paginate(clock: Arc<MutableClock>) {
    let app = test::init_service(build_app(dependencies(clock.clone(), false))).await;
    for (name, price) in [("Gamma tool", 30.0), ("alpha", 10.0), ("Beta TOOL", 20.0)] {
        send(&app, create(name, json!({ "price": price }))).await;
        clock.advance_seconds(1);
    }

    let (status, body) = send(
        &app,
        get("/api/v1/examples?search=tool&sortBy=price&sortOrder=desc"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Gamma tool", "Beta TOOL"]);
    assert_eq!(
        body["data"]["pagination"],
        json!({ "limit": 10, "page": 1, "total": 2, "totalPages": 1 })
    );

    // Default ordering is by name, compared as raw text.
    let (_, body) = send(&app, get("/api/v1/examples?limit=1&page=2")).await;
    let items = body["data"]["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items.first().map(|item| &item["name"]), Some(&json!("Gamma tool")));
    assert_eq!(body["data"]["pagination"]["totalPages"], 3);
}

#[rstest]
#[case("/api/v1/examples?limit=0", "limit", "out_of_range")]
#[case("/api/v1/examples?limit=abc", "limit", "invalid_value")]
#[case("/api/v1/examples?page=0", "page", "out_of_range")]
#[case("/api/v1/examples?sortBy=colour", "sortBy", "invalid_value")]
#[actix_web::test]
async fn invalid_list_queries_are_rejected(
    clock: Arc<MutableClock>,
    #[case] uri: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test::init_service(build_app(dependencies(clock, false))).await;
    let (status, body) = send(&app, get(uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn unknown_ids_and_routes_are_not_found(clock: Arc<MutableClock>) {
    let app = test::init_service(build_app(dependencies(clock, false))).await;

    let (status, body) = send(
        &app,
        test::TestRequest::patch()
            .uri("/api/v1/examples/example-42")
            .set_json(json!({ "name": "x" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Example with ID example-42 not found");

    let (status, body) = send(&app, get("/api/v1/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "The resource you are looking for does not exist"
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(clock: Arc<MutableClock>) {
    let app = test::init_service(build_app(dependencies(clock, false))).await;
    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/examples")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn health_probes_report_ready(clock: Arc<MutableClock>) {
    let app = test::init_service(build_app(dependencies(clock, false))).await;
    let (status, _) = send(&app, get("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get("/health/live")).await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[case(true, StatusCode::OK)]
#[case(false, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn openapi_document_is_served_only_when_enabled(
    clock: Arc<MutableClock>,
    #[case] with_docs: bool,
    #[case] expected: StatusCode,
) {
    let app = test::init_service(build_app(dependencies(clock, with_docs))).await;
    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, expected);
    if with_docs {
        assert_eq!(body["info"]["title"], "Starter API");
        assert!(body["paths"]["/api/v1/examples/{id}"].is_object());
    }
}
