//! Loads the prompt catalog from a JSON file.

use std::path::Path;

use memo_core::model::{CatalogError, Prompt, PromptCatalog};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Parses a JSON array of `{ "id", "category", "text" }` objects.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the JSON is malformed or the catalog is incomplete.
pub fn parse_catalog(json: &str) -> Result<PromptCatalog, CatalogLoadError> {
    let prompts: Vec<Prompt> = serde_json::from_str(json)?;
    Ok(PromptCatalog::new(prompts)?)
}

/// Reads and parses a catalog file.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<PromptCatalog, CatalogLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog(&json)?;
    tracing::debug!(path = %path.display(), prompts = catalog.len(), "catalog loaded");
    Ok(catalog)
}
