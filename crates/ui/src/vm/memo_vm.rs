use std::f64::consts::PI;

use services::{Mode, NavigationSnapshot, ProgressSummary, Status};

/// Radius of the countdown ring in SVG user units.
pub const RING_RADIUS: f64 = 54.0;

#[must_use]
pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

#[must_use]
pub fn status_text(status: Status) -> &'static str {
    match status {
        Status::Empty => "",
        Status::PressStart => "Press Start to begin",
        Status::TimeUp => "Time's up! Nice work.",
        Status::LinkCopied => "Link copied!",
    }
}

#[must_use]
pub fn status_class(status: Status) -> &'static str {
    match status {
        Status::Empty | Status::PressStart => "timer-status",
        Status::TimeUp => "timer-status completed",
        Status::LinkCopied => "timer-status share-success",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub completed: u32,
    pub total: u32,
    pub percent: u32,
}

impl From<ProgressSummary> for ProgressVm {
    fn from(summary: ProgressSummary) -> Self {
        Self {
            completed: summary.completed,
            total: summary.total,
            percent: summary.percent,
        }
    }
}

impl ProgressVm {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {}", self.completed, self.total)
    }

    #[must_use]
    pub fn fill_style(&self) -> String {
        format!("width: {}%;", self.percent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopVm {
    pub input: String,
    pub error: Option<&'static str>,
    pub progress: ProgressVm,
}

impl TopVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &NavigationSnapshot) -> Self {
        Self {
            input: snapshot.input.clone(),
            error: snapshot.error.as_ref().map(services::NavigationError::message),
            progress: snapshot.progress.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub number: String,
    pub category: String,
    pub text: String,
    pub seconds: u32,
    pub ring_class: String,
    pub ring_offset: f64,
    pub status: &'static str,
    pub status_class: &'static str,
    pub next_label: &'static str,
    pub share_failure: Option<String>,
}

impl QuestionVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &NavigationSnapshot) -> Option<Self> {
        let prompt = snapshot.prompt.as_ref()?;
        let severity = snapshot.severity.class();
        let ring_class = if severity.is_empty() {
            "timer-progress".to_string()
        } else {
            format!("timer-progress {severity}")
        };
        Some(Self {
            number: prompt.id().to_string(),
            category: prompt.category().to_string(),
            text: prompt.text().to_string(),
            seconds: snapshot.timer_seconds,
            ring_class,
            ring_offset: ring_circumference() * (1.0 - snapshot.ring_fraction),
            status: status_text(snapshot.status),
            status_class: status_class(snapshot.status),
            next_label: match snapshot.mode {
                Mode::Preview => "Start",
                Mode::Normal => "Next prompt",
            },
            share_failure: snapshot.share_failure.as_ref().map(ToString::to_string),
        })
    }

    #[must_use]
    pub fn ring_style(&self) -> String {
        format!(
            "stroke-dasharray: {:.3}; stroke-dashoffset: {:.3};",
            ring_circumference(),
            self.ring_offset
        )
    }
}
