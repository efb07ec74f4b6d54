use std::sync::Arc;

use services::{AppServices, AudioBackend, SessionLoop, ShareLink};
use url::Url;

use crate::platform::ClipboardRef;

pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;

    /// Address the window opens at; a `q` parameter opens a preview.
    fn start_location(&self) -> Url;

    fn audio(&self) -> Arc<dyn AudioBackend>;
    fn clipboard(&self) -> ClipboardRef;
    fn fallback_clipboard(&self) -> ClipboardRef;
}

#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
    start_location: Url,
    audio: Arc<dyn AudioBackend>,
    clipboard: ClipboardRef,
    fallback_clipboard: ClipboardRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
            start_location: app.start_location(),
            audio: app.audio(),
            clipboard: app.clipboard(),
            fallback_clipboard: app.fallback_clipboard(),
        }
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }

    #[must_use]
    pub fn start_location(&self) -> &Url {
        &self.start_location
    }

    /// Builds the loop that drives one window.
    #[must_use]
    pub fn session_loop(&self) -> SessionLoop {
        let share = ShareLink::new(self.clipboard.clone(), self.fallback_clipboard.clone());
        self.services.session_loop(
            Arc::clone(&self.audio),
            share,
            self.start_location.clone(),
        )
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
