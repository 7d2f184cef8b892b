//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request/response schemas, the external schema wrappers for domain errors,
//! and the security schemes clients may present. [`ApiDoc::document`] applies
//! the runtime configuration (title, version, API prefix, local server URL).
//!
//! The document is served by Swagger UI outside production and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::server::ServerBuilder;
use utoipa::{Modify, OpenApi};

use crate::inbound::http::examples::{
    CreateExampleRequest, DeleteExampleResponse, ExampleListResponse, ExampleResponse,
    PaginationResponse, UpdateExampleRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::settings::AppSettings;

/// Prefix the route annotations are written against.
const DOCUMENTED_PREFIX: &str = "/api/v1";

/// Enrich the generated document with the supported security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "api-key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-API-Key",
                "API key for external access",
            ))),
        );
        for (name, description) in [
            ("access-token", "JWT access token"),
            ("refresh-token", "JWT refresh token"),
        ] {
            components.add_security_scheme(
                name,
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(description))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Starter API",
        description = "REST API Documentation",
        version = "1.0.0"
    ),
    paths(
        crate::inbound::http::app::get_hello,
        crate::inbound::http::examples::create_example,
        crate::inbound::http::examples::list_examples,
        crate::inbound::http::examples::get_example,
        crate::inbound::http::examples::update_example,
        crate::inbound::http::examples::delete_example,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateExampleRequest,
        UpdateExampleRequest,
        ExampleResponse,
        ExampleListResponse,
        PaginationResponse,
        DeleteExampleResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "examples", description = "Example record management"),
        (name = "app", description = "Application information"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Build the document with configuration-driven metadata.
    ///
    /// Overrides the title, description and version, rewrites route paths to
    /// the configured API prefix, and advertises the local development server.
    pub fn document(settings: &AppSettings) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        doc.info.title = settings.swagger_title().to_owned();
        doc.info.description = Some(settings.swagger_description().to_owned());
        doc.info.version = settings.swagger_version().to_owned();
        doc.servers = Some(vec![
            ServerBuilder::new()
                .url(format!("http://localhost:{}", settings.port()))
                .description(Some("Local Development"))
                .build(),
        ]);

        let prefix = settings.api_prefix();
        if prefix != DOCUMENTED_PREFIX {
            let paths = std::mem::take(&mut doc.paths.paths);
            doc.paths.paths = paths
                .into_iter()
                .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
                    Some(rest) => (format!("{prefix}{rest}"), item),
                    None => (path, item),
                })
                .collect();
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use crate::test_support::openapi::{property_names, unwrap_object_schema};
    use rstest::rstest;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn schema_properties(doc: &utoipa::openapi::OpenApi, name: &str) -> Vec<String> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        property_names(unwrap_object_schema(schema, name))
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let properties = schema_properties(&ApiDoc::openapi(), ERROR_SCHEMA_NAME);
        for field in ["code", "message", "traceId", "details"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[rstest]
    fn example_schema_is_camel_case() {
        let properties = schema_properties(&ApiDoc::openapi(), "ExampleResponse");
        for field in ["id", "name", "tags", "createdAt", "updatedAt"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[rstest]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/api/v1",
            "/api/v1/examples",
            "/api/v1/examples/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[rstest]
    fn security_schemes_are_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        for name in ["api-key", "access-token", "refresh-token"] {
            assert!(
                components.security_schemes.contains_key(name),
                "missing {name}"
            );
        }
    }

    #[rstest]
    fn document_applies_settings() {
        let settings = AppSettings {
            port: 4000,
            api_version: Some("v2".to_owned()),
            swagger_title: Some("Inventory".to_owned()),
            ..AppSettings::default()
        };
        let doc = ApiDoc::document(&settings);

        assert_eq!(doc.info.title, "Inventory");
        assert_eq!(doc.info.version, "1.0.0");
        let server = doc
            .servers
            .as_ref()
            .and_then(|servers| servers.first())
            .expect("server entry");
        assert_eq!(server.url, "http://localhost:4000");
        assert_eq!(server.description.as_deref(), Some("Local Development"));
        assert!(doc.paths.paths.contains_key("/api/v2/examples/{id}"));
        assert!(doc.paths.paths.contains_key("/health/live"));
        assert!(!doc.paths.paths.contains_key("/api/v1/examples"));
    }
}
