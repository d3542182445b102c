// File: services/repcal_backend/src/main.rs
mod app_state;

use axum::Router;
use repcal_common::{config_error, database_error, internal_error, logging, RepcalError};
use repcal_config::{load_config, AppConfig};
use repcal_db::DbClientFactory;
use repcal_gcal::GoogleCalendarSource;
use repcal_scheduling::routes as scheduling_routes;
use repcal_scheduling::AvailabilityEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app_state::{service_routes, AppState};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        logging::log_error(e, "repcal backend stopped");
        std::process::exit(1);
    }
}

/// The Google Calendar mirror, when enabled and configured.
fn calendar_source(config: &AppConfig) -> Option<Arc<GoogleCalendarSource>> {
    if !config.use_gcal {
        info!("Google Calendar disabled; bookings are stored locally only");
        return None;
    }
    let gcal = config.gcal.as_ref()?;
    match GoogleCalendarSource::new(gcal) {
        Ok(source) => {
            info!("Google Calendar enabled for calendar '{}'", source.calendar_id());
            Some(Arc::new(source))
        }
        Err(e) => {
            warn!("Google Calendar client could not be built, continuing without it: {}", e);
            None
        }
    }
}

async fn run() -> Result<(), RepcalError> {
    let config = Arc::new(load_config().map_err(config_error)?);

    let repository = logging::log_result(
        DbClientFactory::new().appointment_repository(&config).await,
        "Appointment store ready",
        "Opening the appointment store failed",
    )
    .map_err(database_error)?;
    let calendar = calendar_source(&config);
    let calendar_enabled = calendar.is_some();
    let state = AppState::new(config.clone(), repository.client().clone(), calendar_enabled);

    let engine = AvailabilityEngine::from_config(&config.scheduling, Arc::new(repository), calendar)?;
    info!("Working time zone: {}", config.scheduling.time_zone);

    let api_router = Router::new().nest(
        "/api",
        service_routes(state).merge(scheduling_routes::routes(engine)),
    );

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use repcal_scheduling::doc::SchedulingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Repcal API",
                version = "0.1.0",
                description = "Availability and booking for field sales reps",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SchedulingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| config_error(format!("cannot bind {}: {}", addr, e)))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(internal_error)
}
