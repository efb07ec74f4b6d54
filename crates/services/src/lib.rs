#![forbid(unsafe_code)]

pub mod app_services;
pub mod audio_cue;
pub mod error;
pub mod navigation;
pub mod progress_service;
pub mod session_loop;
pub mod share_service;
pub mod ticker;

pub use memo_core::Clock;

pub use app_services::AppServices;
pub use audio_cue::{AudioBackend, AudioCue, SilentAudio, SoundContext};
pub use error::{
    AppServicesError, AudioError, ClipboardError, NavigationError, ProgressServiceError,
};
pub use navigation::{Mode, NavigationController, NavigationSnapshot, Screen, Status};
pub use progress_service::{ProgressService, ProgressSummary};
pub use session_loop::{Intent, IntentReceiver, IntentSender, SessionLoop, intent_channel};
pub use share_service::{COPIED_FLASH, ClipboardWriter, CopyMethod, CopyOutcome, ShareLink};
pub use ticker::{RunId, TickReceiver, Ticker};
