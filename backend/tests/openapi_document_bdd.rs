//! Behaviour tests for the configured OpenAPI document.
//!
//! These scenarios check that error responses point at the schema wrappers in
//! `inbound::http::schemas` and that runtime settings reshape the document.
use std::sync::Mutex;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use starter_api::ApiDoc;
use starter_api::settings::AppSettings;
use starter_api::test_support::openapi::{property_names, unwrap_object_schema};

#[derive(Default)]
struct OpenApiWorld {
    document: Option<utoipa::openapi::OpenApi>,
    json: Option<String>,
}

impl std::fmt::Debug for OpenApiWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiWorld")
            .field("document", &self.document.as_ref().map(|_| "<OpenApi>"))
            .field("json", &self.json)
            .finish()
    }
}

// utoipa replaces :: with . in schema names
const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
const ERROR_CODE_SCHEMA_NAME: &str = "crate.domain.ErrorCode";

#[fixture]
fn world() -> Mutex<OpenApiWorld> {
    Mutex::new(OpenApiWorld::default())
}

fn generate(world: &Mutex<OpenApiWorld>, settings: &AppSettings) {
    let mut world = world.lock().expect("world lock");
    let doc = ApiDoc::document(settings);
    world.json = Some(doc.to_json().expect("valid JSON"));
    world.document = Some(doc);
}

fn documented_paths(world: &Mutex<OpenApiWorld>) -> Vec<String> {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    doc.paths.paths.keys().cloned().collect()
}

fn assert_schema_registered(world: &Mutex<OpenApiWorld>, schema_name: &str, label: &str) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let components = doc.components.as_ref().expect("components present");
    assert!(
        components.schemas.contains_key(schema_name),
        "{label} schema wrapper should be registered"
    );

    let json = world.json.as_ref().expect("JSON generated");
    assert!(
        json.contains(&format!("#/components/schemas/{schema_name}")),
        "{label} should be referenced from the document"
    );
}

#[given("the OpenAPI document is generated with default settings")]
fn generate_default_document(world: &Mutex<OpenApiWorld>) {
    generate(world, &AppSettings::default());
}

#[given("the OpenAPI document is generated for API version {version}")]
fn generate_versioned_document(world: &Mutex<OpenApiWorld>, version: String) {
    let settings = AppSettings {
        api_version: Some(version),
        ..AppSettings::default()
    };
    generate(world, &settings);
}

#[when("the document is inspected")]
fn inspect_document(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.document.is_some(), "document should be generated");
}

#[then("the error schema wrapper is registered")]
fn error_schema_registered(world: &Mutex<OpenApiWorld>) {
    assert_schema_registered(world, ERROR_SCHEMA_NAME, "Error");
}

#[then("the error code schema wrapper is registered")]
fn error_code_schema_registered(world: &Mutex<OpenApiWorld>) {
    assert_schema_registered(world, ERROR_CODE_SCHEMA_NAME, "ErrorCode");
}

#[then("the error schema lists the code, message, traceId and details properties")]
fn error_schema_properties(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let components = doc.components.as_ref().expect("components present");
    let schema = components
        .schemas
        .get(ERROR_SCHEMA_NAME)
        .expect("Error schema");
    let object = unwrap_object_schema(schema, ERROR_SCHEMA_NAME);
    let names = property_names(object);
    for expected in ["code", "message", "traceId", "details"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
}

#[then("the path {path} is documented")]
fn path_documented(world: &Mutex<OpenApiWorld>, path: String) {
    let paths = documented_paths(world);
    assert!(paths.contains(&path), "{path} missing from {paths:?}");
}

#[then("no path starts with {prefix}")]
fn no_path_with_prefix(world: &Mutex<OpenApiWorld>, prefix: String) {
    let paths = documented_paths(world);
    assert!(
        paths.iter().all(|path| !path.starts_with(&prefix)),
        "unexpected {prefix} paths in {paths:?}"
    );
}

#[scenario(
    path = "tests/features/openapi_document.feature",
    name = "Error responses reference the schema wrappers"
)]
fn error_wrappers(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi_document.feature",
    name = "A configured API version rewrites every route prefix"
)]
fn versioned_prefix(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi_document.feature",
    name = "Health probes stay outside the API prefix"
)]
fn health_outside_prefix(world: Mutex<OpenApiWorld>) {
    drop(world);
}
