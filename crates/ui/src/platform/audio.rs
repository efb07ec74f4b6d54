use dioxus::document::eval;
use memo_core::tone::Tone;
use services::{AudioBackend, AudioError, SoundContext};

use super::scripts::{AUDIO_CREATE_SCRIPT, AUDIO_RESUME_SCRIPT, play_tones_script};

/// Plays cues through the webview's Web Audio API.
pub struct WebAudio;

impl AudioBackend for WebAudio {
    fn create_context(&self) -> Result<Box<dyn SoundContext>, AudioError> {
        let _ = eval(AUDIO_CREATE_SCRIPT);
        Ok(Box::new(WebAudioContext { suspended: true }))
    }
}

/// Webviews start audio suspended until a user gesture; the first resume
/// happens inside the click that starts a countdown.
struct WebAudioContext {
    suspended: bool,
}

impl SoundContext for WebAudioContext {
    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn resume(&mut self) {
        let _ = eval(AUDIO_RESUME_SCRIPT);
        self.suspended = false;
    }

    fn play(&mut self, tones: &[Tone]) {
        let _ = eval(&play_tones_script(tones));
    }
}
