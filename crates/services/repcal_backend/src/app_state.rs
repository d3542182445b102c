// --- File: crates/services/repcal_backend/src/app_state.rs ---
use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use repcal_config::AppConfig;
use repcal_db::DbClient;
use serde::Serialize;
use std::sync::Arc;

/// State shared by the service-level routes.
///
/// The scheduling routes carry their own state; this only backs the
/// welcome and health endpoints.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbClient,
    pub calendar_enabled: bool,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: DbClient, calendar_enabled: bool) -> Self {
        Self {
            config,
            db,
            calendar_enabled,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub calendar_enabled: bool,
    pub time_zone: String,
}

/// Reports whether the appointment store answers.
///
/// The external calendar is never probed; it is optional for every operation.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.is_healthy().await;
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if database { "ok" } else { "degraded" },
            database,
            calendar_enabled: state.calendar_enabled,
            time_zone: state.config.scheduling.time_zone.clone(),
        }),
    )
}

pub fn service_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Welcome to the repcal scheduling API!" }))
        .route("/health", get(health_handler))
        .with_state(state)
}
