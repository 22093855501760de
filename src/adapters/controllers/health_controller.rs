use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::System;
use tracing::info;

use crate::{adapters::state::AppState, domain::config::service::SourceFormat};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    #[serde(rename = "sourceFormat")]
    pub source_format: SourceFormat,
    pub config: HealthConfigInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

#[derive(Debug, Serialize)]
pub struct HealthConfigInfo {
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: u64,
    #[serde(rename = "defaultIbanConfigured")]
    pub default_iban_configured: bool,
}

pub struct HealthController;

impl HealthController {
    /// Health check endpoint
    /// GET /api/v1/health
    pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
        info!("Health check requested");

        let config_info = HealthConfigInfo {
            max_upload_size: app_state.config.max_upload_size,
            default_iban_configured: app_state.config.default_iban.is_some(),
        };

        // Collect system metrics (optimized - only refresh what's needed)
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let cpu_usage = sys.global_cpu_usage();
        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        let metrics = SystemMetrics {
            cpu_usage_percent: cpu_usage,
            memory_used_bytes: memory_used,
            memory_total_bytes: memory_total,
            memory_usage_percent,
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            source_format: app_state.config.source_format,
            config: config_info,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::config::service::ServiceConfig,
        services,
    };
    use axum::{routing::get, Router};
    use axum_test::TestServer;
    use std::sync::Arc;

    #[tokio::test]
    async fn reports_healthy_status_and_config() {
        let config = ServiceConfig {
            source_format: SourceFormat::Revolut,
            max_upload_size: 2048,
            default_iban: None,
        };
        let state = AppState {
            converter: services::create_converter(&config.source_format),
            config: Arc::new(config),
        };
        let app = Router::new()
            .route("/api/v1/health", get(HealthController::health_check))
            .with_state(state);
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sourceFormat"], "revolut");
        assert_eq!(body["config"]["maxUploadSize"], 2048);
        assert_eq!(body["config"]["defaultIbanConfigured"], false);
    }
}
