//! Service entry-point: loads settings, wires the in-memory store into the
//! HTTP server, and serves the API plus optional Swagger UI.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use starter_api::ApiDoc;
use starter_api::inbound::http::health::HealthState;
use starter_api::server::{SWAGGER_UI_PATH, ServerConfig, create_server};
use starter_api::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    settings
        .validate()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let environment = settings
        .environment()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let serves_docs = settings
        .serves_docs()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let mut config = ServerConfig::new(bind_addr, settings.api_prefix());
    if serves_docs {
        config = config.with_docs(ApiDoc::document(&settings));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;

    info!(
        %environment,
        "Application is running on: http://localhost:{}",
        settings.port()
    );
    if serves_docs {
        info!(
            "Swagger documentation available at: http://localhost:{}{}",
            settings.port(),
            SWAGGER_UI_PATH
        );
    }

    server.await
}
