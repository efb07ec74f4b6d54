use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{
    PROGRESS_KEY, ProgressRepository, StorageError, decode_progress, encode_progress,
};
use memo_core::model::ProgressRecord;

use super::SqliteRepository;

impl SqliteRepository {
    /// Reads a raw `local_storage` entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        row.try_get::<String, _>("value")
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Writes a raw `local_storage` entry, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db) if db.message().contains("full") => {
                StorageError::QuotaExceeded
            }
            other => StorageError::Connection(other.to_string()),
        })?;

        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        self.get_item(PROGRESS_KEY)
            .await?
            .map(|raw| decode_progress(&raw))
            .transpose()
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let raw = encode_progress(record)?;
        self.set_item(PROGRESS_KEY, &raw).await
    }
}
