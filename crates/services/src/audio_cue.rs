use std::sync::Arc;

use memo_core::tone::{self, Tone};

use crate::error::AudioError;

/// A live sound output, e.g. a Web Audio context.
pub trait SoundContext {
    /// Whether the host is holding the output until a user gesture.
    fn is_suspended(&self) -> bool;

    fn resume(&mut self);

    /// Schedule the tones relative to the current output time.
    fn play(&mut self, tones: &[Tone]);
}

/// Creates sound contexts on demand.
pub trait AudioBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `AudioError` if the host cannot provide sound output.
    fn create_context(&self) -> Result<Box<dyn SoundContext>, AudioError>;
}

/// Plays the countdown cues. The sound context is created lazily on the
/// first [`ensure_ready`](Self::ensure_ready); before that every cue is a
/// no-op.
pub struct AudioCue {
    backend: Arc<dyn AudioBackend>,
    context: Option<Box<dyn SoundContext>>,
}

impl AudioCue {
    #[must_use]
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            context: None,
        }
    }

    /// Creates the context on first use and resumes it if suspended.
    pub fn ensure_ready(&mut self) {
        if self.context.is_none() {
            match self.backend.create_context() {
                Ok(context) => self.context = Some(context),
                Err(err) => {
                    tracing::warn!(error = %err, "audio cues disabled");
                    return;
                }
            }
        }
        if let Some(context) = self.context.as_mut() {
            if context.is_suspended() {
                context.resume();
            }
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.context.is_some()
    }

    pub fn beep(&mut self) {
        if let Some(context) = self.context.as_mut() {
            context.play(&[tone::beep()]);
        }
    }

    pub fn completion_chord(&mut self) {
        if let Some(context) = self.context.as_mut() {
            context.play(&tone::completion_chord());
        }
    }
}

/// Backend that never produces sound, for headless runs.
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn create_context(&self) -> Result<Box<dyn SoundContext>, AudioError> {
        Err(AudioError::Unavailable("silent backend".to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingAudio;
    use super::*;

    #[test]
    fn cues_are_silent_before_ready() {
        let backend = Arc::new(RecordingAudio::default());
        let mut cue = AudioCue::new(backend.clone());
        cue.beep();
        cue.completion_chord();
        assert!(!cue.is_ready());
        assert_eq!(*backend.created.lock().unwrap(), 0);
        assert!(backend.played.lock().unwrap().is_empty());
    }

    #[test]
    fn context_is_created_once_and_resumed() {
        let backend = Arc::new(RecordingAudio::default());
        let mut cue = AudioCue::new(backend.clone());
        cue.ensure_ready();
        cue.ensure_ready();
        assert_eq!(*backend.created.lock().unwrap(), 1);
        assert_eq!(*backend.resumed.lock().unwrap(), 1);
    }

    #[test]
    fn plays_beep_and_chord_shapes() {
        let backend = Arc::new(RecordingAudio::default());
        let mut cue = AudioCue::new(backend.clone());
        cue.ensure_ready();
        cue.beep();
        cue.completion_chord();
        let played = backend.played.lock().unwrap();
        assert_eq!(played.len(), 2);
        assert_eq!(played[0], vec![tone::beep()]);
        assert_eq!(played[1].len(), 3);
    }

    #[test]
    fn unavailable_backend_leaves_cue_silent() {
        let mut cue = AudioCue::new(Arc::new(SilentAudio));
        cue.ensure_ready();
        cue.beep();
        assert!(!cue.is_ready());
    }
}
