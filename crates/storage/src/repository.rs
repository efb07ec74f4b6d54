use async_trait::async_trait;
use memo_core::model::ProgressRecord;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Name of the local storage entry holding the progress record.
pub const PROGRESS_KEY: &str = "memo_progress";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage quota exceeded")]
    QuotaExceeded,
}

/// Encodes a record into the JSON form kept in local storage.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_progress(record: &ProgressRecord) -> Result<String, StorageError> {
    serde_json::to_string(record).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Decodes a stored entry.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON. Out-of-range ids
/// inside an otherwise valid record are dropped.
pub fn decode_progress(raw: &str) -> Result<ProgressRecord, StorageError> {
    serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Repository contract for the persisted progress record.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the stored record, or `None` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be read or decoded.
    async fn get_progress(&self) -> Result<Option<ProgressRecord>, StorageError>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be written.
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Simple in-memory key/value store for testing and prototyping.
///
/// Entries are kept as raw strings so tests can seed malformed data.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Stores a raw value under `key`, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn set_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Reads the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        self.get_raw(PROGRESS_KEY)?
            .map(|raw| decode_progress(&raw))
            .transpose()
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let raw = encode_progress(record)?;
        self.set_raw(PROGRESS_KEY, raw)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use memo_core::model::PromptId;

    fn record_with(ids: &[u32]) -> ProgressRecord {
        let mut record = ProgressRecord::default();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        for raw in ids {
            record.mark(PromptId::new(*raw).unwrap(), day);
        }
        record
    }

    #[tokio::test]
    async fn missing_entry_reads_as_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_progress().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn round_trips_record_as_json_entry() {
        let repo = InMemoryRepository::new();
        let record = record_with(&[4, 9]);
        repo.save_progress(&record).await.unwrap();

        let raw = repo.get_raw(PROGRESS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"completedIds\":[4,9]"), "{raw}");

        let fetched = repo.get_progress().await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn malformed_entry_is_a_serialization_error() {
        let repo = InMemoryRepository::new();
        repo.set_raw(PROGRESS_KEY, "{not json").unwrap();
        let err = repo.get_progress().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
