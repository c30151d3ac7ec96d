pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use axum::{
    http::Request,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware, tracing::REQUEST_ID_HEADER,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CompetitionConfig;
use crate::services::{EntryDb, EntryGateway};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root::read_root,
        handlers::root::hello,
        handlers::diagnostics::test_database,
        handlers::entry::submit_entry,
        handlers::entry::entries_count,
        handlers::health::health_check,
    ),
    components(
        schemas(
            dtos::MessageResponse,
            dtos::ErrorResponse,
            dtos::entry::EntryResponse,
            dtos::entry::CountResponse,
            models::CompetitionEntryForm,
            models::FieldError,
            services::DiagnosticReport,
        )
    ),
    tags(
        (name = "General", description = "Service banner endpoints"),
        (name = "Competition", description = "Competition entry intake"),
        (name = "Observability", description = "Service health and diagnostics"),
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: CompetitionConfig,
    pub entries: EntryGateway,
}

/// Connects the entry store when the database is configured.
pub async fn build_state(config: CompetitionConfig) -> Result<AppState, AppError> {
    let entries = match &config.database {
        Some(database) => {
            let db = EntryDb::connect(&database.url, &database.name).await?;
            EntryGateway::new(Arc::new(db))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL or DATABASE_NAME not set; entries cannot be stored until configured"
            );
            EntryGateway::unconfigured()
        }
    };

    Ok(AppState { config, entries })
}

pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::read_root))
        .route("/api/hello", get(handlers::hello))
        .route("/test", get(handlers::test_database))
        .route("/api/competition/entry", post(handlers::submit_entry))
        .route(
            "/api/competition/entries/count",
            get(handlers::entries_count),
        )
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics::metrics));

    if state.config.swagger_enabled() {
        app = app.merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()));
    } else {
        app = app.route(
            "/.well-known/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    app.with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
