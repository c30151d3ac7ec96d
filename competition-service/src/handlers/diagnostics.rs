use axum::{extract::State, Json};
use std::env;

use crate::services::DiagnosticReport;
use crate::AppState;

fn env_is_set(key: &str) -> bool {
    env::var(key).map(|v| !v.is_empty()).unwrap_or(false)
}

/// Reports store reachability and whether its configuration is present.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Diagnostic report", body = DiagnosticReport)),
    tag = "Observability"
)]
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticReport> {
    let report = state
        .entries
        .diagnostics()
        .await
        .with_environment(env_is_set("DATABASE_URL"), env_is_set("DATABASE_NAME"));

    Json(report)
}
