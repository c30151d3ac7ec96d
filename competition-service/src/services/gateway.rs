use metrics::counter;
use serde::Serialize;
use service_core::error::AppError;
use std::sync::Arc;
use utoipa::ToSchema;

use super::store::EntryStore;
use crate::models::{CompetitionEntry, EntryRecord, TERMS_REQUIRED_MESSAGE};
use crate::utils::truncate_chars;

const MAX_LISTED_COLLECTIONS: usize = 10;
const DIAGNOSTIC_ERROR_CHARS: usize = 50;

/// Narrow write/count interface over the entry store.
///
/// An unconfigured gateway has no store at all: counting reports zero, but
/// submitting is a storage failure so that an entry never silently vanishes.
#[derive(Clone, Default)]
pub struct EntryGateway {
    store: Option<Arc<dyn EntryStore>>,
}

impl EntryGateway {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    pub async fn submit(&self, entry: CompetitionEntry) -> Result<String, AppError> {
        if !entry.consent_terms {
            return Err(AppError::BadRequest(anyhow::anyhow!(TERMS_REQUIRED_MESSAGE)));
        }

        let store = self.store.as_ref().ok_or_else(|| {
            tracing::error!("Rejecting competition entry: database not configured");
            AppError::DatabaseError(anyhow::anyhow!("Database not configured"))
        })?;

        let id = store.insert_entry(&EntryRecord::new(entry)).await?;

        counter!("competition_entries_submitted_total").increment(1);
        tracing::info!(entry_id = %id, "Competition entry stored");

        Ok(id)
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        match &self.store {
            Some(store) => store.count_entries().await,
            None => Ok(0),
        }
    }

    /// `Ok(false)` when no store is configured.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        match &self.store {
            Some(store) => store.health_check().await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Best-effort introspection of the store. Never fails.
    pub async fn diagnostics(&self) -> DiagnosticReport {
        let mut report = DiagnosticReport::default();

        let Some(store) = &self.store else {
            report.database = "⚠️  Available but not initialized".to_string();
            return report;
        };

        report.database = "✅ Available".to_string();
        report.connection_status = "Connected".to_string();
        tracing::debug!(database = %store.database_name(), "Running store diagnostics");

        match store.list_collection_names().await {
            Ok(mut collections) => {
                collections.truncate(MAX_LISTED_COLLECTIONS);
                report.collections = collections;
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                let detail = match &e {
                    AppError::DatabaseError(inner) => inner.to_string(),
                    other => other.to_string(),
                };
                report.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate_chars(&detail, DIAGNOSTIC_ERROR_CHARS)
                );
            }
        }

        report
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: "❌ Not Set".to_string(),
            database_name: "❌ Not Set".to_string(),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

impl DiagnosticReport {
    /// Records whether the store's configuration variables are present.
    pub fn with_environment(mut self, database_url_set: bool, database_name_set: bool) -> Self {
        self.database_url = set_marker(database_url_set);
        self.database_name = set_marker(database_name_set);
        self
    }
}

fn set_marker(set: bool) -> String {
    let marker = if set { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}
