use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{AdditionRecord, BatchRecord, BatchSummaryRaw};

pub mod batch_repository;

pub use batch_repository::SeaOrmBatchStore;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Read access to a batch and everything recorded against it.
///
/// Soft-deleted rows are never returned.
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Batch core record, `None` when no live batch has this uuid.
    async fn get_batch(&self, batch_uuid: Uuid) -> Result<Option<BatchRecord>, ServiceError>;

    async fn get_batch_summary_raw(
        &self,
        batch_uuid: Uuid,
    ) -> Result<Option<BatchSummaryRaw>, ServiceError>;

    /// Additions made to the batch, its occupancies or its volumes, oldest first.
    async fn list_additions_by_batch(
        &self,
        batch_uuid: Uuid,
    ) -> Result<Vec<AdditionRecord>, ServiceError>;

    /// Same rows as [`BatchStore::list_additions_by_batch`], reusing the
    /// volumes and occupancies already loaded into `raw`.
    async fn list_additions_for_summary(
        &self,
        raw: &BatchSummaryRaw,
    ) -> Result<Vec<AdditionRecord>, ServiceError> {
        self.list_additions_by_batch(raw.batch.uuid).await
    }
}
