use std::sync::Arc;

use memo_core::Clock;
use memo_core::model::{PROMPT_COUNT, ProgressRecord, PromptId};
use storage::repository::ProgressRepository;

use crate::error::ProgressServiceError;

/// Counts shown in the progress panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: u32,
    pub total: u32,
    pub percent: u32,
}

impl From<&ProgressRecord> for ProgressSummary {
    fn from(record: &ProgressRecord) -> Self {
        Self {
            completed: record.total_completed(),
            total: PROMPT_COUNT,
            percent: record.completion_percent(),
        }
    }
}

/// Reads and updates the visited-prompt record.
///
/// The `try_*` methods report storage failures; `load` and `mark_completed`
/// log them and degrade to in-memory behaviour.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, repo }
    }

    /// Load the stored record, or an empty one if nothing was stored yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Read` if the entry cannot be read or is malformed.
    pub async fn try_load(&self) -> Result<ProgressRecord, ProgressServiceError> {
        let stored = self
            .repo
            .get_progress()
            .await
            .map_err(ProgressServiceError::Read)?;
        Ok(stored.unwrap_or_default())
    }

    /// Load the stored record, falling back to an empty one on any failure.
    pub async fn load(&self) -> ProgressRecord {
        match self.try_load().await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = %err, "progress unreadable, using empty record");
                ProgressRecord::default()
            }
        }
    }

    /// Record a visit to `id` and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Write` carrying the updated record if it
    /// could not be saved.
    pub async fn try_mark_completed(
        &self,
        id: PromptId,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let mut record = self.load().await;
        let first_visit = record.mark(id, self.clock.today());
        tracing::debug!(prompt = %id, first_visit, "marking prompt completed");

        match self.repo.save_progress(&record).await {
            Ok(()) => Ok(record),
            Err(source) => Err(ProgressServiceError::Write {
                record: Box::new(record),
                source,
            }),
        }
    }

    /// Record a visit to `id`. Save failures are logged; the updated record
    /// is returned either way.
    pub async fn mark_completed(&self, id: PromptId) -> ProgressRecord {
        match self.try_mark_completed(id).await {
            Ok(record) => record,
            Err(ProgressServiceError::Write { record, source }) => {
                tracing::warn!(error = %source, prompt = %id, "progress not saved");
                *record
            }
            Err(err) => {
                tracing::warn!(error = %err, prompt = %id, "progress not saved");
                ProgressRecord::default()
            }
        }
    }

    pub async fn completion_percent(&self) -> u32 {
        self.load().await.completion_percent()
    }

    pub async fn summary(&self) -> ProgressSummary {
        ProgressSummary::from(&self.load().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use memo_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, PROGRESS_KEY, StorageError};

    fn id(raw: u32) -> PromptId {
        PromptId::new(raw).unwrap()
    }

    fn service(repo: &InMemoryRepository) -> ProgressService {
        ProgressService::new(fixed_clock(), Arc::new(repo.clone()))
    }

    struct FullRepo;

    #[async_trait]
    impl ProgressRepository for FullRepo {
        async fn get_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
            Ok(None)
        }

        async fn save_progress(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded)
        }
    }

    #[tokio::test]
    async fn fresh_store_loads_empty_default() {
        let repo = InMemoryRepository::new();
        let record = service(&repo).load().await;
        assert_eq!(record, ProgressRecord::default());
    }

    #[tokio::test]
    async fn mark_then_load_round_trips() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        svc.mark_completed(id(7)).await;

        let record = svc.load().await;
        assert!(record.is_completed(id(7)));
        let expected = fixed_now()
            .with_timezone(&chrono::Local)
            .date_naive()
            .format("%Y-%m-%d")
            .to_string();
        assert_eq!(record.last_access_date(), expected);
    }

    #[tokio::test]
    async fn marking_same_id_twice_counts_once() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        svc.mark_completed(id(5)).await;
        let record = svc.mark_completed(id(5)).await;
        assert_eq!(record.completed_ids().collect::<Vec<_>>(), vec![id(5)]);
        assert_eq!(record.total_completed(), 1);
        assert_eq!(svc.load().await.total_completed(), 1);
    }

    #[tokio::test]
    async fn malformed_entry_falls_back_and_is_overwritten() {
        let repo = InMemoryRepository::new();
        repo.set_raw(PROGRESS_KEY, "definitely not json").unwrap();
        let svc = service(&repo);

        assert!(matches!(
            svc.try_load().await,
            Err(ProgressServiceError::Read(StorageError::Serialization(_)))
        ));
        assert_eq!(svc.load().await.total_completed(), 0);

        svc.mark_completed(id(2)).await;
        assert_eq!(svc.try_load().await.unwrap().total_completed(), 1);
    }

    #[tokio::test]
    async fn stray_id_in_stored_record_keeps_history() {
        let repo = InMemoryRepository::new();
        repo.set_raw(
            PROGRESS_KEY,
            r#"{"completedIds":[3,500,8],"lastAccessDate":"2024-01-05","totalCompleted":3}"#,
        )
        .unwrap();
        let svc = service(&repo);

        let record = svc.mark_completed(id(11)).await;
        assert_eq!(
            record.completed_ids().collect::<Vec<_>>(),
            vec![id(3), id(8), id(11)]
        );
        assert_eq!(svc.try_load().await.unwrap().total_completed(), 3);
    }

    #[tokio::test]
    async fn write_failure_is_reported_by_try_and_swallowed_otherwise() {
        let svc = ProgressService::new(fixed_clock(), Arc::new(FullRepo));

        let err = svc.try_mark_completed(id(9)).await.unwrap_err();
        match err {
            ProgressServiceError::Write { record, source } => {
                assert!(record.is_completed(id(9)));
                assert!(matches!(source, StorageError::QuotaExceeded));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let record = svc.mark_completed(id(9)).await;
        assert_eq!(record.total_completed(), 1);
        // Nothing was persisted.
        assert_eq!(svc.load().await.total_completed(), 0);
    }

    #[tokio::test]
    async fn percent_and_summary_follow_record() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        for raw in 1..=27 {
            svc.mark_completed(id(raw)).await;
        }
        assert_eq!(svc.completion_percent().await, 25);
        let summary = svc.summary().await;
        assert_eq!(
            summary,
            ProgressSummary {
                completed: 27,
                total: 108,
                percent: 25
            }
        );
    }
}
