use std::fmt::Write as _;

use memo_core::tone::Tone;

pub(super) const AUDIO_CREATE_SCRIPT: &str = r"(function() {
    if (window.__memoAudio) return;
    const Ctx = window.AudioContext || window.webkitAudioContext;
    if (!Ctx) return;
    window.__memoAudio = new Ctx();
})();";

pub(super) const AUDIO_RESUME_SCRIPT: &str = r#"(function() {
    const ctx = window.__memoAudio;
    if (ctx && ctx.state === "suspended") ctx.resume();
})();"#;

pub(crate) const FOCUS_ID_INPUT_SCRIPT: &str =
    "document.getElementById('question-number')?.focus();";

/// Schedules every tone on the shared context, relative to its current time.
pub(super) fn play_tones_script(tones: &[Tone]) -> String {
    let mut rows = String::new();
    for tone in tones {
        let _ = write!(
            rows,
            "[{}, {}, {}, {}, {}],",
            tone.frequency_hz,
            tone.offset.as_secs_f64(),
            tone.duration.as_secs_f64(),
            tone.peak_gain,
            tone.attack.as_secs_f64(),
        );
    }
    format!(
        r#"(function() {{
            const ctx = window.__memoAudio;
            if (!ctx) return;
            const now = ctx.currentTime;
            [{rows}].forEach(([freq, offset, duration, gain, attack]) => {{
                const osc = ctx.createOscillator();
                const amp = ctx.createGain();
                osc.connect(amp);
                amp.connect(ctx.destination);
                osc.type = "sine";
                osc.frequency.value = freq;
                const start = now + offset;
                amp.gain.setValueAtTime(0, start);
                amp.gain.linearRampToValueAtTime(gain, start + attack);
                amp.gain.linearRampToValueAtTime(0, start + duration);
                osc.start(start);
                osc.stop(start + duration);
            }});
        }})();"#
    )
}

/// Copies through a hidden, selected textarea. Returns whether the browser
/// reported success.
pub(super) fn selection_copy_script(text: &str) -> String {
    format!(
        r#"
        const area = document.createElement("textarea");
        area.value = {text:?};
        area.setAttribute("readonly", "");
        area.style.position = "fixed";
        area.style.left = "-9999px";
        document.body.appendChild(area);
        area.select();
        let ok = false;
        try {{
            ok = document.execCommand("copy");
        }} catch (err) {{
            ok = false;
        }}
        document.body.removeChild(area);
        return ok;
        "#
    )
}
