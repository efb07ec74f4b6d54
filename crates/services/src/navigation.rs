use std::sync::Arc;

use memo_core::model::{Prompt, PromptCatalog, PromptId};
use memo_core::share::{deep_link_id, share_url, without_query};
use memo_core::timer::{CountdownTimer, RingSeverity, TickOutcome, TimerPhase};
use rand::SeedableRng;
use rand::rngs::StdRng;
use url::Url;

use crate::audio_cue::AudioCue;
use crate::error::NavigationError;
use crate::progress_service::{ProgressService, ProgressSummary};
use crate::ticker::{RunId, Ticker};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Top,
    Question,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Opened from a deep link; nothing runs or is recorded until confirmed.
    Preview,
}

/// Line shown under the timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Empty,
    PressStart,
    TimeUp,
    LinkCopied,
}

/// Identifies one "copied" flash so a late expiry cannot clear a newer one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashToken(u64);

/// Everything the display needs, detached from the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationSnapshot {
    pub screen: Screen,
    pub mode: Mode,
    pub prompt: Option<Prompt>,
    pub timer_phase: TimerPhase,
    pub timer_seconds: u32,
    pub ring_fraction: f64,
    pub severity: RingSeverity,
    pub status: Status,
    pub input: String,
    pub error: Option<NavigationError>,
    pub progress: ProgressSummary,
    pub location: Url,
    pub share_failure: Option<Url>,
}

/// Owns which screen is shown and drives the timer, audio cues and
/// progress store for the open prompt.
pub struct NavigationController {
    catalog: Arc<PromptCatalog>,
    progress: ProgressService,
    audio: AudioCue,
    timer: CountdownTimer,
    ticker: Ticker,
    rng: StdRng,
    location: Url,
    screen: Screen,
    mode: Mode,
    current: Option<PromptId>,
    input: String,
    error: Option<NavigationError>,
    summary: ProgressSummary,
    flash: Option<FlashToken>,
    next_flash: u64,
    share_failure: Option<Url>,
}

impl NavigationController {
    #[must_use]
    pub fn new(
        catalog: Arc<PromptCatalog>,
        progress: ProgressService,
        audio: AudioCue,
        ticker: Ticker,
        location: Url,
    ) -> Self {
        Self {
            catalog,
            progress,
            audio,
            timer: CountdownTimer::with_tick(ticker.period()),
            ticker,
            rng: StdRng::from_os_rng(),
            location,
            screen: Screen::Top,
            mode: Mode::Normal,
            current: None,
            input: String::new(),
            error: None,
            summary: ProgressSummary::default(),
            flash: None,
            next_flash: 0,
            share_failure: None,
        }
    }

    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Reads stored progress and honours a `q` deep link in the address.
    pub async fn load(&mut self) {
        self.summary = self.progress.summary().await;
        if let Some(id) = deep_link_id(&self.location) {
            if let Err(err) = self.enter_preview(id) {
                tracing::debug!(error = %err, "deep link ignored");
            }
        }
    }

    // ─── Top screen ────────────────────────────────────────────────────────

    /// Replaces the id field contents; any error message is cleared.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.error = None;
    }

    /// Parses the id field and starts that prompt.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::Validation` for empty, non-numeric or
    /// out-of-range input, `NavigationError::NotFound` for ids missing from the
    /// catalog. The error is also kept for display.
    pub async fn submit_input(&mut self) -> Result<PromptId, NavigationError> {
        let id = match PromptId::parse_input(&self.input) {
            Ok(id) => id,
            Err(err) => return Err(self.fail(err.into())),
        };
        self.start(id).await?;
        Ok(id)
    }

    /// Opens `id` in normal mode, starts the countdown and records the visit.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NotFound` if the catalog has no such prompt;
    /// the controller stays where it was.
    pub async fn start(&mut self, id: PromptId) -> Result<(), NavigationError> {
        if self.catalog.get(id).is_none() {
            return Err(self.fail(NavigationError::NotFound(id)));
        }
        self.show_question(id, Mode::Normal);
        self.begin_countdown();
        self.record_visit(id).await;
        Ok(())
    }

    /// Starts a uniformly chosen prompt.
    ///
    /// # Errors
    ///
    /// See [`start`](Self::start).
    pub async fn start_random(&mut self) -> Result<PromptId, NavigationError> {
        let id = PromptId::random(&mut self.rng);
        self.start(id).await?;
        Ok(id)
    }

    // ─── Question screen ───────────────────────────────────────────────────

    /// Advances to the following prompt (108 wraps to 1), or confirms the
    /// preview when one is open.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NoPrompt` on the top screen.
    pub async fn next(&mut self) -> Result<PromptId, NavigationError> {
        let current = match (self.screen, self.current) {
            (Screen::Question, Some(id)) => id,
            _ => return Err(NavigationError::NoPrompt),
        };
        if self.mode == Mode::Preview {
            self.confirm_preview().await?;
            return Ok(current);
        }
        let next = current.next_wrapping();
        self.start(next).await?;
        Ok(next)
    }

    /// Shows `id` without starting the timer or recording progress.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NotFound` if the catalog has no such prompt.
    pub fn enter_preview(&mut self, id: PromptId) -> Result<(), NavigationError> {
        if self.catalog.get(id).is_none() {
            return Err(NavigationError::NotFound(id));
        }
        self.ticker.cancel();
        self.timer.reset();
        self.show_question(id, Mode::Preview);
        Ok(())
    }

    /// Leaves preview: starts the countdown, records the visit and drops the
    /// deep-link query from the address.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::NotInPreview` unless a preview is open.
    pub async fn confirm_preview(&mut self) -> Result<(), NavigationError> {
        let id = match (self.screen, self.mode, self.current) {
            (Screen::Question, Mode::Preview, Some(id)) => id,
            _ => return Err(NavigationError::NotInPreview),
        };
        self.mode = Mode::Normal;
        self.flash = None;
        self.begin_countdown();
        self.record_visit(id).await;
        self.location = without_query(&self.location);
        Ok(())
    }

    /// Stops everything and returns to the top screen with a cleared form.
    pub fn go_to_top(&mut self) {
        self.stop_countdown();
        self.mode = Mode::Normal;
        self.screen = Screen::Top;
        self.current = None;
        self.input.clear();
        self.error = None;
        self.flash = None;
        self.share_failure = None;
        tracing::debug!("returned to top");
    }

    // ─── Timer ─────────────────────────────────────────────────────────────

    /// Applies one tick of the active run. Ticks from older runs are ignored.
    pub fn on_tick(&mut self, run: RunId) -> TickOutcome {
        if !self.ticker.accepts(run) {
            return TickOutcome::Ignored;
        }
        let outcome = self.timer.tick();
        match outcome {
            TickOutcome::Beep(_) => self.audio.beep(),
            TickOutcome::Completed => {
                self.ticker.cancel();
                self.audio.completion_chord();
                tracing::debug!(prompt = ?self.current, "countdown complete");
            }
            TickOutcome::Counting | TickOutcome::Ignored => {}
        }
        outcome
    }

    /// Run id of the active countdown, if any.
    #[must_use]
    pub fn active_run(&self) -> Option<RunId> {
        self.ticker.current_run()
    }

    // ─── Sharing ───────────────────────────────────────────────────────────

    /// Deep link for the open prompt.
    #[must_use]
    pub fn share_url(&self) -> Option<Url> {
        match self.screen {
            Screen::Question => self.current.map(|id| share_url(&self.location, id)),
            Screen::Top => None,
        }
    }

    /// Shows the "copied" status until the returned token expires.
    pub fn show_link_copied(&mut self) -> FlashToken {
        self.next_flash += 1;
        let token = FlashToken(self.next_flash);
        self.flash = Some(token);
        self.share_failure = None;
        token
    }

    /// Ends a flash; the status falls back to whatever the current state says.
    pub fn expire_flash(&mut self, token: FlashToken) {
        if self.flash == Some(token) {
            self.flash = None;
        }
    }

    pub fn show_share_failure(&mut self, url: Url) {
        self.share_failure = Some(url);
    }

    // ─── Accessors ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn current_id(&self) -> Option<PromptId> {
        self.current
    }

    #[must_use]
    pub fn current_prompt(&self) -> Option<&Prompt> {
        self.current.and_then(|id| self.catalog.get(id))
    }

    #[must_use]
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    #[must_use]
    pub fn error(&self) -> Option<&NavigationError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn progress(&self) -> ProgressSummary {
        self.summary
    }

    #[must_use]
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Recomputed from the current state on every call.
    #[must_use]
    pub fn status(&self) -> Status {
        if self.flash.is_some() {
            Status::LinkCopied
        } else if self.screen == Screen::Question && self.mode == Mode::Preview {
            Status::PressStart
        } else if self.timer.phase() == TimerPhase::Complete {
            Status::TimeUp
        } else {
            Status::Empty
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            screen: self.screen,
            mode: self.mode,
            prompt: self.current_prompt().cloned(),
            timer_phase: self.timer.phase(),
            timer_seconds: self.timer.display_seconds(),
            ring_fraction: self.timer.ring_fraction(),
            severity: self.timer.severity(),
            status: self.status(),
            input: self.input.clone(),
            error: self.error.clone(),
            progress: self.summary,
            location: self.location.clone(),
            share_failure: self.share_failure.clone(),
        }
    }

    // ─── Internals ─────────────────────────────────────────────────────────

    fn fail(&mut self, err: NavigationError) -> NavigationError {
        tracing::debug!(error = %err, "prompt not opened");
        self.error = Some(err.clone());
        err
    }

    fn show_question(&mut self, id: PromptId, mode: Mode) {
        self.screen = Screen::Question;
        self.mode = mode;
        self.current = Some(id);
        self.error = None;
        self.flash = None;
        self.share_failure = None;
        tracing::debug!(prompt = %id, ?mode, "showing prompt");
    }

    fn begin_countdown(&mut self) {
        self.audio.ensure_ready();
        self.ticker.start();
        self.timer.start();
    }

    fn stop_countdown(&mut self) {
        self.ticker.cancel();
        self.timer.stop();
    }

    async fn record_visit(&mut self, id: PromptId) {
        let record = self.progress.mark_completed(id).await;
        self.summary = ProgressSummary::from(&record);
    }
}
