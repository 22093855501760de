mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    controllers::{
        convert_controller::ConvertController, health_controller::HealthController,
        page_controller::PageController,
    },
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use domain::config::service::{ServiceConfig, SourceFormat};
use tower_http::cors::{Any, CorsLayer};

const DEFAULT_MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    let source_format = std::env::var("SOURCE_FORMAT")
        .map(|value| {
            SourceFormat::parse(&value)
                .expect("ERROR: SOURCE_FORMAT must be a supported statement format")
        })
        .unwrap_or(SourceFormat::Revolut);

    let max_upload_size = std::env::var("MAX_UPLOAD_SIZE")
        .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE.to_string())
        .parse::<u64>()
        .expect("MAX_UPLOAD_SIZE must be a valid u64");

    let default_iban = std::env::var("ACCOUNT_IBAN")
        .ok()
        .filter(|value| !value.trim().is_empty());

    tracing::info!(
        "Starting mt940-service with source format {:?}",
        source_format
    );

    // Configure CORS
    let cors = if let Ok(allowed_origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
        // Parse comma-separated origins
        let origins: Vec<_> = allowed_origins
            .split(',')
            .map(|s| s.trim().parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow all origins if not specified (only for development)
        CorsLayer::permissive()
    };

    let config = Arc::new(ServiceConfig {
        source_format,
        max_upload_size,
        default_iban,
    });

    let app_state = AppState {
        converter: services::create_converter(&config.source_format),
        config,
    };

    let router = Router::new()
        .route("/", get(PageController::index))
        .route("/convert", post(ConvertController::convert))
        .route("/api/v1/health", get(HealthController::health_check))
        // Body limit leaves headroom for the multipart framing around the file
        .layer(DefaultBodyLimit::max(max_upload_size as usize + 16 * 1024))
        .layer(cors)
        .with_state(app_state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
