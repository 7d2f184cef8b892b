//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::inbound::http::app::get_hello;
use crate::inbound::http::error::{json_config, query_config, route_not_found};
use crate::inbound::http::examples::{
    create_example, delete_example, get_example, list_examples, update_example,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;

/// Path serving Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/docs";
/// Path serving the OpenAPI document as JSON.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Everything one worker's [`App`] needs.
#[derive(Clone)]
pub struct AppDependencies {
    /// Shared probe state.
    pub health_state: web::Data<HealthState>,
    /// Shared handler ports.
    pub http_state: web::Data<HttpState>,
    /// Path prefix for API routes, e.g. `/api/v1`.
    pub api_prefix: String,
    /// OpenAPI document to serve, if any.
    pub docs: Option<utoipa::openapi::OpenApi>,
}

/// Assemble the application: routes, extractor configuration, tracing, docs,
/// and the not-found fallback.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        api_prefix,
        docs,
    } = deps;

    let api = web::scope(&api_prefix)
        .service(get_hello)
        .service(create_example)
        .service(list_examples)
        .service(get_example)
        .service(update_example)
        .service(delete_example);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    let app = match docs {
        Some(doc) => app.service(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, doc)),
        None => app,
    };

    app.default_service(web::route().to(route_not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        api_prefix,
        docs,
        clock,
    } = config;
    let http_state = web::Data::new(build_http_state(clock));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            api_prefix: api_prefix.clone(),
            docs: docs.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "server ready");
    Ok(server)
}
