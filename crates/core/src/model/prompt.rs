use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{PROMPT_COUNT, PromptId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain exactly 108 prompts, found {0}")]
    WrongSize(usize),

    #[error("prompt {0} appears more than once")]
    DuplicateId(PromptId),

    #[error("prompt {0} has empty text")]
    EmptyText(PromptId),
}

//
// ─── PROMPT ────────────────────────────────────────────────────────────────────
//

/// A single numbered writing prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    id: PromptId,
    category: String,
    #[serde(alias = "question")]
    text: String,
}

impl Prompt {
    #[must_use]
    pub fn new(id: PromptId, category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            category: category.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PromptId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only, ordered collection of all prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCatalog {
    prompts: Vec<Prompt>,
}

impl PromptCatalog {
    /// Builds a catalog, checking it holds every id exactly once.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the size is wrong, an id repeats, or a prompt has no text.
    pub fn new(mut prompts: Vec<Prompt>) -> Result<Self, CatalogError> {
        if prompts.len() != PROMPT_COUNT as usize {
            return Err(CatalogError::WrongSize(prompts.len()));
        }
        prompts.sort_by_key(Prompt::id);
        for pair in prompts.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(CatalogError::DuplicateId(pair[0].id));
            }
        }
        if let Some(empty) = prompts.iter().find(|p| p.text.trim().is_empty()) {
            return Err(CatalogError::EmptyText(empty.id));
        }
        Ok(Self { prompts })
    }

    /// Looks up a prompt by exact id.
    #[must_use]
    pub fn get(&self, id: PromptId) -> Option<&Prompt> {
        self.prompts.iter().find(|prompt| prompt.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prompt> {
        self.prompts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompts() -> Vec<Prompt> {
        (1..=PROMPT_COUNT)
            .map(|raw| {
                Prompt::new(
                    PromptId::new(raw).unwrap(),
                    format!("Category {}", raw % 6),
                    format!("Prompt {raw}"),
                )
            })
            .collect()
    }

    #[test]
    fn builds_full_catalog_in_id_order() {
        let mut shuffled = prompts();
        shuffled.reverse();
        let catalog = PromptCatalog::new(shuffled).unwrap();
        assert_eq!(catalog.len(), 108);
        let first = catalog.iter().next().unwrap();
        assert_eq!(first.id(), PromptId::FIRST);
        let found = catalog.get(PromptId::new(42).unwrap()).unwrap();
        assert_eq!(found.text(), "Prompt 42");
    }

    #[test]
    fn rejects_wrong_size() {
        let mut short = prompts();
        short.pop();
        assert_eq!(PromptCatalog::new(short), Err(CatalogError::WrongSize(107)));
    }

    #[test]
    fn rejects_duplicates() {
        let mut dup = prompts();
        dup[107] = Prompt::new(PromptId::new(3).unwrap(), "x", "dup");
        assert_eq!(
            PromptCatalog::new(dup),
            Err(CatalogError::DuplicateId(PromptId::new(3).unwrap()))
        );
    }

    #[test]
    fn rejects_empty_text() {
        let mut items = prompts();
        items[9] = Prompt::new(PromptId::new(10).unwrap(), "x", "  ");
        assert_eq!(
            PromptCatalog::new(items),
            Err(CatalogError::EmptyText(PromptId::new(10).unwrap()))
        );
    }
}
