//! Shapes of the audible cues. Output devices only need to render a list of
//! sine tones with a linear attack/release envelope.

use std::time::Duration;

/// One sine tone relative to the moment the cue is played.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f64,
    /// Delay from the cue start until this tone begins.
    pub offset: Duration,
    pub duration: Duration,
    pub peak_gain: f64,
    /// Time to ramp from silence to `peak_gain`; the gain then ramps back to
    /// silence at the end of `duration`.
    pub attack: Duration,
}

pub const BEEP_FREQUENCY_HZ: f64 = 800.0;
pub const CHORD_FREQUENCIES_HZ: [f64; 3] = [261.63, 329.63, 392.0];

const CHORD_STAGGER: Duration = Duration::from_millis(50);

/// Short warning beep for the last seconds.
#[must_use]
pub fn beep() -> Tone {
    Tone {
        frequency_hz: BEEP_FREQUENCY_HZ,
        offset: Duration::ZERO,
        duration: Duration::from_millis(200),
        peak_gain: 0.3,
        attack: Duration::from_millis(10),
    }
}

/// C major triad played when the countdown finishes, each note slightly
/// after the previous one.
#[must_use]
pub fn completion_chord() -> [Tone; 3] {
    let mut offset = Duration::ZERO;
    CHORD_FREQUENCIES_HZ.map(|frequency_hz| {
        let tone = Tone {
            frequency_hz,
            offset,
            duration: Duration::from_millis(600),
            peak_gain: 0.2,
            attack: Duration::from_millis(50),
        };
        offset += CHORD_STAGGER;
        tone
    })
}
