//! Shared error types for the services crate.

use thiserror::Error;

use memo_core::model::{ProgressRecord, PromptId, PromptIdError};
use storage::catalog::CatalogLoadError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `NavigationController`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error(transparent)]
    Validation(#[from] PromptIdError),
    #[error("prompt {0} was not found")]
    NotFound(PromptId),
    #[error("no preview is open")]
    NotInPreview,
    #[error("no prompt is open")]
    NoPrompt,
}

impl NavigationError {
    /// Inline message shown under the prompt number field.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation(PromptIdError::Empty) => "Enter a prompt number",
            Self::Validation(_) => "Enter a prompt number from 1 to 108",
            Self::NotFound(_) => "Prompt not found",
            Self::NotInPreview | Self::NoPrompt => "Something went wrong. Please try again.",
        }
    }
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("failed to read progress: {0}")]
    Read(#[source] StorageError),
    /// The record was updated in memory but could not be persisted.
    #[error("failed to save progress: {source}")]
    Write {
        record: Box<ProgressRecord>,
        #[source]
        source: StorageError,
    },
}

/// Errors from a clipboard writer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClipboardError {
    #[error("clipboard is not available")]
    Unavailable,
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Errors from an audio backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AudioError {
    #[error("audio output is not available: {0}")]
    Unavailable(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}
