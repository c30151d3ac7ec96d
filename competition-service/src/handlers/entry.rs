use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::dtos::entry::{CountResponse, EntryResponse};
use crate::models::{CompetitionEntry, CompetitionEntryForm, TERMS_REQUIRED_MESSAGE};
use crate::utils::truncate_chars;
use crate::AppState;

const COUNT_ERROR_CHARS: usize = 200;

/// Submit a competition entry
#[utoipa::path(
    post,
    path = "/api/competition/entry",
    request_body = CompetitionEntryForm,
    responses(
        (status = 200, description = "Entry stored", body = EntryResponse),
        (status = 400, description = "Invalid entry or terms not accepted", body = EntryResponse),
        (status = 500, description = "Entry could not be stored", body = EntryResponse)
    ),
    tag = "Competition"
)]
#[tracing::instrument(skip(state, payload))]
pub async fn submit_entry(
    State(state): State<AppState>,
    payload: Result<Json<CompetitionEntryForm>, JsonRejection>,
) -> (StatusCode, Json<EntryResponse>) {
    match accept_entry(&state, payload).await {
        Ok(id) => (StatusCode::OK, Json(EntryResponse::accepted(id))),
        Err(err) => {
            if err.is_client_error() {
                tracing::info!(error = %err, "Competition entry rejected");
            } else {
                tracing::error!(error = %err, "Failed to submit competition entry");
            }
            (err.status_code(), Json(EntryResponse::rejected(&err)))
        }
    }
}

async fn accept_entry(
    state: &AppState,
    payload: Result<Json<CompetitionEntryForm>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(form) = payload.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e.body_text()))
    })?;
    // Field rules run once, inside the conversion.
    let entry = CompetitionEntry::try_from(form)?;

    if !entry.consent_terms {
        return Err(AppError::BadRequest(anyhow::anyhow!(TERMS_REQUIRED_MESSAGE)));
    }

    state.entries.submit(entry).await
}

/// Number of entries received so far
#[utoipa::path(
    get,
    path = "/api/competition/entries/count",
    responses(
        (status = 200, description = "Entry count", body = CountResponse),
        (status = 500, description = "Count unavailable", body = crate::dtos::ErrorResponse)
    ),
    tag = "Competition"
)]
pub async fn entries_count(State(state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let count = state.entries.count().await.map_err(|e| {
        let detail = match e {
            AppError::DatabaseError(inner) => inner.to_string(),
            other => other.to_string(),
        };
        AppError::DatabaseError(anyhow::anyhow!(
            "Failed to fetch count: {}",
            truncate_chars(&detail, COUNT_ERROR_CHARS)
        ))
    })?;

    Ok(Json(CountResponse { count }))
}
