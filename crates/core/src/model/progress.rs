use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ids::{PROMPT_COUNT, PromptId};

/// Persisted record of which prompts have been visited.
///
/// `total_completed` always equals the size of `completed_ids` once the
/// record has been read back or marked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProgressRecord")]
pub struct ProgressRecord {
    completed_ids: BTreeSet<PromptId>,
    last_access_date: String,
    total_completed: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProgressRecord {
    #[serde(default, alias = "completedQuestions")]
    completed_ids: Vec<i64>,
    #[serde(default)]
    last_access_date: String,
}

impl From<RawProgressRecord> for ProgressRecord {
    /// Ids outside the catalog range are dropped; the rest are kept.
    fn from(raw: RawProgressRecord) -> Self {
        let completed_ids = raw
            .completed_ids
            .into_iter()
            .filter_map(|raw| u32::try_from(raw).ok())
            .filter_map(|raw| PromptId::new(raw).ok())
            .collect();
        let mut record = Self {
            completed_ids,
            last_access_date: raw.last_access_date,
            total_completed: 0,
        };
        record.recount();
        record
    }
}

impl ProgressRecord {
    /// Records a visit. Repeat visits leave the set unchanged but still
    /// refresh the access date.
    ///
    /// Returns `true` if the id was not completed before.
    pub fn mark(&mut self, id: PromptId, today: NaiveDate) -> bool {
        let inserted = self.completed_ids.insert(id);
        self.recount();
        self.last_access_date = today.format("%Y-%m-%d").to_string();
        inserted
    }

    #[must_use]
    pub fn is_completed(&self, id: PromptId) -> bool {
        self.completed_ids.contains(&id)
    }

    pub fn completed_ids(&self) -> impl Iterator<Item = PromptId> + '_ {
        self.completed_ids.iter().copied()
    }

    #[must_use]
    pub fn last_access_date(&self) -> &str {
        &self.last_access_date
    }

    #[must_use]
    pub fn total_completed(&self) -> u32 {
        self.total_completed
    }

    /// `round(total / 108 * 100)`, half rounding up.
    #[must_use]
    pub fn completion_percent(&self) -> u32 {
        (self.total_completed * 100 + PROMPT_COUNT / 2) / PROMPT_COUNT
    }

    fn recount(&mut self) {
        self.total_completed = u32::try_from(self.completed_ids.len()).unwrap_or(u32::MAX);
    }
}
