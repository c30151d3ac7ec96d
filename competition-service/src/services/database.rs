use async_trait::async_trait;
use mongodb::{bson::doc, Client as MongoClient, Collection, Database};
use service_core::error::AppError;

use super::store::EntryStore;
use crate::models::{EntryRecord, ENTRY_COLLECTION};

#[derive(Clone)]
pub struct EntryDb {
    client: MongoClient,
    db: Database,
}

impl EntryDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub fn entries(&self) -> Collection<EntryRecord> {
        self.db.collection(ENTRY_COLLECTION)
    }
}

#[async_trait]
impl EntryStore for EntryDb {
    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    async fn insert_entry(&self, record: &EntryRecord) -> Result<String, AppError> {
        let result = self.entries().insert_one(record, None).await.map_err(|e| {
            tracing::error!("Failed to insert competition entry: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        Ok(result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| result.inserted_id.to_string()))
    }

    async fn count_entries(&self) -> Result<u64, AppError> {
        self.entries()
            .count_documents(doc! {}, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count competition entries: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.db.list_collection_names(None).await.map_err(|e| {
            tracing::warn!("Failed to list collections: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })
    }
}
