use axum::{extract::State, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::AppState;

/// Service health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Configured database is unreachable")
    ),
    tag = "Observability"
)]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let mongodb = match state.entries.health_check().await {
        Ok(true) => "up",
        Ok(false) => "not_configured",
        Err(e) => {
            tracing::error!(error = %e, "MongoDB health check failed");
            return Err(AppError::ServiceUnavailable);
        }
    };

    Ok(Json(json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "checks": {
            "mongodb": mongodb
        }
    })))
}
