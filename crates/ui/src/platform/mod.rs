use std::sync::Arc;

use services::ClipboardWriter;

mod audio;
mod clipboard;
mod scripts;

pub type ClipboardRef = Arc<dyn ClipboardWriter + Send + Sync>;

pub use audio::WebAudio;
pub use clipboard::{SelectionCopy, SystemClipboard};
pub(crate) use scripts::FOCUS_ID_INPUT_SCRIPT;
