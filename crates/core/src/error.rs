use thiserror::Error;

use crate::model::{CatalogError, PromptIdError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    PromptId(#[from] PromptIdError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
