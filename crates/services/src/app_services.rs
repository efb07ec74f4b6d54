use std::path::Path;
use std::sync::Arc;

use memo_core::model::PromptCatalog;
use storage::catalog::load_catalog;
use storage::repository::Storage;
use url::Url;

use crate::Clock;
use crate::audio_cue::{AudioBackend, AudioCue};
use crate::error::AppServicesError;
use crate::navigation::NavigationController;
use crate::progress_service::ProgressService;
use crate::session_loop::SessionLoop;
use crate::share_service::ShareLink;
use crate::ticker::Ticker;

/// Assembles app-facing services around one catalog and progress store.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<PromptCatalog>,
    progress: ProgressService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// catalog cannot be loaded.
    pub async fn new_sqlite(
        db_url: &str,
        catalog_path: &Path,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let catalog = load_catalog(catalog_path)?;
        let storage = Storage::sqlite(db_url).await?;
        tracing::info!(db_url, catalog = %catalog_path.display(), "services ready");
        Ok(Self::from_parts(catalog, storage, clock))
    }

    /// Build services with a volatile progress store.
    #[must_use]
    pub fn in_memory(catalog: PromptCatalog, clock: Clock) -> Self {
        Self::from_parts(catalog, Storage::in_memory(), clock)
    }

    fn from_parts(catalog: PromptCatalog, storage: Storage, clock: Clock) -> Self {
        Self {
            catalog: Arc::new(catalog),
            progress: ProgressService::new(clock, Arc::clone(&storage.progress)),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<PromptCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> ProgressService {
        self.progress.clone()
    }

    /// Wires a controller and its ticker into a loop for one window.
    #[must_use]
    pub fn session_loop(
        &self,
        audio: Arc<dyn AudioBackend>,
        share: ShareLink,
        location: Url,
    ) -> SessionLoop {
        let (ticker, ticks) = Ticker::new(memo_core::timer::TICK_PERIOD);
        let controller = NavigationController::new(
            self.catalog(),
            self.progress(),
            AudioCue::new(audio),
            ticker,
            location,
        );
        SessionLoop::new(controller, ticks, share)
    }
}
