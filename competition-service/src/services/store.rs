use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::models::{EntryRecord, ENTRY_COLLECTION};

/// Storage backend for competition entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    fn database_name(&self) -> &str;

    async fn health_check(&self) -> Result<(), AppError>;

    /// Persists one record and returns the store-generated identifier.
    async fn insert_entry(&self, record: &EntryRecord) -> Result<String, AppError>;

    async fn count_entries(&self) -> Result<u64, AppError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError>;
}

/// Process-local store. Can be switched offline to simulate an unreachable database.
pub struct MemoryEntryStore {
    database: String,
    records: Mutex<Vec<(String, EntryRecord)>>,
    available: AtomicBool,
}

impl Default for MemoryEntryStore {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl MemoryEntryStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            records: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Snapshot of stored records with their identifiers, in insertion order.
    pub fn records(&self) -> Vec<(String, EntryRecord)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::DatabaseError(anyhow::anyhow!(
                "server selection timeout: no available servers"
            )))
        }
    }

    fn lock_records(&self) -> Result<std::sync::MutexGuard<'_, Vec<(String, EntryRecord)>>, AppError> {
        self.records.lock().map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Memory store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ensure_available()
    }

    async fn insert_entry(&self, record: &EntryRecord) -> Result<String, AppError> {
        self.ensure_available()?;
        let id = ObjectId::new().to_hex();
        self.lock_records()?.push((id.clone(), record.clone()));
        Ok(id)
    }

    async fn count_entries(&self) -> Result<u64, AppError> {
        self.ensure_available()?;
        Ok(self.lock_records()?.len() as u64)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.ensure_available()?;
        if self.lock_records()?.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![ENTRY_COLLECTION.to_string()])
        }
    }
}
