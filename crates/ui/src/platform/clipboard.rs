use std::sync::Mutex;

use async_trait::async_trait;
use dioxus::document::eval;
use services::{ClipboardError, ClipboardWriter};

use super::scripts::selection_copy_script;

/// Writes to the OS clipboard.
///
/// The handle is opened on first use and kept for the life of the process:
/// on X11 and Wayland the copied text is only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        write_retained(
            &self.handle,
            || arboard::Clipboard::new().map_err(|err| err.to_string()),
            |clipboard| {
                clipboard
                    .set_text(text.to_string())
                    .map_err(|err| err.to_string())
            },
        )
    }
}

/// Writes through the handle in `slot`, opening one if needed. A handle that
/// fails to write is dropped so the next copy starts fresh.
fn write_retained<C>(
    slot: &Mutex<Option<C>>,
    open: impl FnOnce() -> Result<C, String>,
    write: impl FnOnce(&mut C) -> Result<(), String>,
) -> Result<(), ClipboardError> {
    let mut slot = slot
        .lock()
        .map_err(|_| ClipboardError::WriteFailed("clipboard lock poisoned".to_string()))?;
    let mut handle = match slot.take() {
        Some(handle) => handle,
        None => open().map_err(ClipboardError::WriteFailed)?,
    };
    write(&mut handle).map_err(ClipboardError::WriteFailed)?;
    *slot = Some(handle);
    Ok(())
}

/// Copies by selecting a hidden textarea in the webview.
pub struct SelectionCopy;

#[async_trait(?Send)]
impl ClipboardWriter for SelectionCopy {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let copied = eval(&selection_copy_script(text))
            .join::<bool>()
            .await
            .map_err(|err| ClipboardError::WriteFailed(format!("{err:?}")))?;
        if copied {
            Ok(())
        } else {
            Err(ClipboardError::WriteFailed("copy command was rejected".to_string()))
        }
    }
}
