//! Countdown state machine for a single prompt.
//!
//! The timer does not schedule anything by itself: a driver calls
//! [`CountdownTimer::tick`] once per period and reacts to the returned
//! [`TickOutcome`]. Remaining time is tracked in tenths of a second.

use std::time::Duration;

/// Length of one countdown.
pub const TIMER_DURATION: Duration = Duration::from_secs(60);

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

const FULL_TENTHS: u32 = 600;
const DANGER_TENTHS: u32 = 100;
const WARNING_TENTHS: u32 = 300;
const BEEP_FROM_SECOND: u32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Complete,
}

/// Colour class of the progress ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RingSeverity {
    #[default]
    Neutral,
    Warning,
    Danger,
}

impl RingSeverity {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Neutral => "",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// What a single tick produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    Counting,
    /// Crossed into one of the last seconds; emit one beep.
    Beep(u32),
    /// Reached zero on this tick; emit the completion chord.
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownTimer {
    phase: TimerPhase,
    remaining_tenths: u32,
    last_beep: Option<u32>,
    step_tenths: u32,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_tick(TICK_PERIOD)
    }

    /// A timer that loses `tick` of remaining time per [`tick`](Self::tick).
    ///
    /// Sub-100 ms periods are rounded up to one tenth.
    #[must_use]
    pub fn with_tick(tick: Duration) -> Self {
        let step_tenths = u32::try_from(tick.as_millis().div_ceil(100))
            .unwrap_or(FULL_TENTHS)
            .max(1);
        Self {
            phase: TimerPhase::Idle,
            remaining_tenths: FULL_TENTHS,
            last_beep: None,
            step_tenths,
        }
    }

    /// Resets to a full minute and starts running.
    pub fn start(&mut self) {
        self.remaining_tenths = FULL_TENTHS;
        self.last_beep = None;
        self.phase = TimerPhase::Running;
    }

    /// Returns to idle. The remaining time stays as displayed.
    pub fn stop(&mut self) {
        self.phase = TimerPhase::Idle;
    }

    /// Puts the timer back to a full, idle minute (preview display).
    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining_tenths = FULL_TENTHS;
        self.last_beep = None;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != TimerPhase::Running {
            return TickOutcome::Ignored;
        }

        self.remaining_tenths = self.remaining_tenths.saturating_sub(self.step_tenths);
        if self.remaining_tenths == 0 {
            self.phase = TimerPhase::Complete;
            return TickOutcome::Completed;
        }

        let second = self.display_seconds();
        if second <= BEEP_FROM_SECOND && self.last_beep != Some(second) {
            self.last_beep = Some(second);
            return TickOutcome::Beep(second);
        }
        TickOutcome::Counting
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> f64 {
        f64::from(self.remaining_tenths) / 10.0
    }

    /// Whole seconds shown on the dial (`ceil` of the remaining time).
    #[must_use]
    pub fn display_seconds(&self) -> u32 {
        self.remaining_tenths.div_ceil(10)
    }

    /// Fraction of the ring still filled, `1.0` at start and `0.0` at the end.
    #[must_use]
    pub fn ring_fraction(&self) -> f64 {
        f64::from(self.remaining_tenths) / f64::from(FULL_TENTHS)
    }

    #[must_use]
    pub fn severity(&self) -> RingSeverity {
        if self.remaining_tenths <= DANGER_TENTHS {
            RingSeverity::Danger
        } else if self.remaining_tenths <= WARNING_TENTHS {
            RingSeverity::Warning
        } else {
            RingSeverity::Neutral
        }
    }

    /// The last boundary that produced a beep during this run.
    #[must_use]
    pub fn last_beep(&self) -> Option<u32> {
        self.last_beep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(timer: &mut CountdownTimer) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        while timer.is_running() {
            outcomes.push(timer.tick());
        }
        outcomes
    }

    #[test]
    fn starts_full_and_idle() {
        let timer = CountdownTimer::new();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.display_seconds(), 60);
        assert!((timer.ring_fraction() - 1.0).abs() < f64::EPSILON);
        assert_eq!(timer.severity(), RingSeverity::Neutral);
    }

    #[test]
    fn idle_timer_ignores_ticks() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.display_seconds(), 60);
    }

    #[test]
    fn remaining_strictly_decreases_until_complete() {
        let mut timer = CountdownTimer::new();
        timer.start();
        let mut previous = timer.remaining_seconds();
        let mut ticks = 0;
        while timer.is_running() {
            timer.tick();
            ticks += 1;
            assert!(timer.remaining_seconds() < previous);
            previous = timer.remaining_seconds();
        }
        assert_eq!(ticks, 600);
        assert_eq!(timer.phase(), TimerPhase::Complete);
        assert_eq!(timer.remaining_seconds(), 0.0);
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining_seconds(), 0.0);
    }

    #[test]
    fn beeps_once_per_final_second_then_completes_once() {
        let mut timer = CountdownTimer::new();
        timer.start();
        let outcomes = run_to_end(&mut timer);
        let beeps: Vec<_> = outcomes
            .iter()
            .filter_map(|o| match o {
                TickOutcome::Beep(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(beeps, vec![3, 2, 1]);
        let completions = outcomes
            .iter()
            .filter(|o| **o == TickOutcome::Completed)
            .count();
        assert_eq!(completions, 1);
        assert_eq!(outcomes.last(), Some(&TickOutcome::Completed));
    }

    #[test]
    fn beep_law_holds_for_coarser_ticks() {
        for millis in [200, 300, 500, 700] {
            let mut timer = CountdownTimer::with_tick(Duration::from_millis(millis));
            timer.start();
            let outcomes = run_to_end(&mut timer);
            let beeps: Vec<_> = outcomes
                .iter()
                .filter_map(|o| match o {
                    TickOutcome::Beep(s) => Some(*s),
                    _ => None,
                })
                .collect();
            assert_eq!(beeps, vec![3, 2, 1], "tick {millis}ms");
        }
    }

    #[test]
    fn severity_follows_thresholds_each_tick() {
        let mut timer = CountdownTimer::new();
        timer.start();
        // 60.0 -> 30.1
        for _ in 0..299 {
            timer.tick();
        }
        assert_eq!(timer.severity(), RingSeverity::Neutral);
        timer.tick(); // 30.0
        assert_eq!(timer.severity(), RingSeverity::Warning);
        for _ in 0..199 {
            timer.tick();
        }
        // 10.1
        assert_eq!(timer.severity(), RingSeverity::Warning);
        timer.tick(); // 10.0
        assert_eq!(timer.severity(), RingSeverity::Danger);
        timer.start();
        assert_eq!(timer.severity(), RingSeverity::Neutral);
    }

    #[test]
    fn display_uses_ceiling() {
        let mut timer = CountdownTimer::new();
        timer.start();
        timer.tick();
        assert_eq!(timer.display_seconds(), 60);
        for _ in 0..9 {
            timer.tick();
        }
        assert_eq!(timer.display_seconds(), 59);
        assert!((timer.ring_fraction() - 59.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn restart_resets_beep_boundary() {
        let mut timer = CountdownTimer::new();
        timer.start();
        run_to_end(&mut timer);
        assert_eq!(timer.last_beep(), Some(1));
        timer.start();
        assert_eq!(timer.last_beep(), None);
        assert_eq!(timer.display_seconds(), 60);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = CountdownTimer::new();
        timer.stop();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        timer.start();
        timer.tick();
        timer.stop();
        timer.stop();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.tick(), TickOutcome::Ignored);
    }
}
