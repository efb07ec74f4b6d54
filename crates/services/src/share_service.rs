use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::ClipboardError;

/// How long the "copied" status stays visible.
pub const COPIED_FLASH: Duration = Duration::from_millis(2000);

/// Something that can put text on the user's clipboard.
#[async_trait(?Send)]
pub trait ClipboardWriter {
    /// Feature detection; unavailable writers are skipped.
    fn is_available(&self) -> bool {
        true
    }

    /// # Errors
    ///
    /// Returns `ClipboardError` if the text could not be copied.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyMethod {
    Clipboard,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(CopyMethod),
    /// Neither path worked; the link has to be shown to the user.
    Failed { url: Url },
}

/// Copies deep links, trying the clipboard first and a selection-based
/// fallback second.
#[derive(Clone)]
pub struct ShareLink {
    clipboard: Arc<dyn ClipboardWriter>,
    fallback: Arc<dyn ClipboardWriter>,
}

impl ShareLink {
    #[must_use]
    pub fn new(clipboard: Arc<dyn ClipboardWriter>, fallback: Arc<dyn ClipboardWriter>) -> Self {
        Self {
            clipboard,
            fallback,
        }
    }

    pub async fn copy(&self, url: &Url) -> CopyOutcome {
        if self.clipboard.is_available() {
            match self.clipboard.write_text(url.as_str()).await {
                Ok(()) => return CopyOutcome::Copied(CopyMethod::Clipboard),
                Err(err) => tracing::debug!(error = %err, "clipboard write failed, trying fallback"),
            }
        }

        match self.fallback.write_text(url.as_str()).await {
            Ok(()) => CopyOutcome::Copied(CopyMethod::Fallback),
            Err(err) => {
                tracing::warn!(error = %err, %url, "could not copy share link");
                CopyOutcome::Failed { url: url.clone() }
            }
        }
    }
}
