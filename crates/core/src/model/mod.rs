mod ids;
mod progress;
mod prompt;

pub use ids::{PROMPT_COUNT, PromptId, PromptIdError};
pub use progress::ProgressRecord;
pub use prompt::{CatalogError, Prompt, PromptCatalog};
