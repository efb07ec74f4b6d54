//! Cancellable repeating task that paces the countdown.
//!
//! Each run is tagged with a [`RunId`]; the driver compares it with the
//! ticker's current run so ticks queued by a cancelled run are dropped.
//! Time comes from tokio's clock, which tests pause and advance.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunId(u64);

pub type TickReceiver = mpsc::UnboundedReceiver<RunId>;

pub struct Ticker {
    period: Duration,
    sender: mpsc::UnboundedSender<RunId>,
    task: Option<JoinHandle<()>>,
    current: Option<RunId>,
    next_run: u64,
}

impl Ticker {
    /// Creates an idle ticker and the receiver its ticks arrive on.
    #[must_use]
    pub fn new(period: Duration) -> (Self, TickReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let ticker = Self {
            period,
            sender,
            task: None,
            current: None,
            next_run: 0,
        };
        (ticker, receiver)
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Cancels any active run and starts a new one. The first tick arrives
    /// one period from now.
    ///
    /// Without a tokio runtime no task is spawned; the run is still current
    /// so ticks can be delivered by hand.
    pub fn start(&mut self) -> RunId {
        self.cancel();
        self.next_run += 1;
        let run = RunId(self.next_run);
        self.current = Some(run);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let sender = self.sender.clone();
                let period = self.period;
                self.task = Some(handle.spawn(async move {
                    let mut interval = interval_at(Instant::now() + period, period);
                    loop {
                        interval.tick().await;
                        if sender.send(run).is_err() {
                            break;
                        }
                    }
                }));
            }
            Err(_) => tracing::debug!("no runtime, ticks must be delivered manually"),
        }
        run
    }

    /// Stops the current run. Safe to call when idle.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.current = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Whether a tick belongs to the active run.
    #[must_use]
    pub fn accepts(&self, run: RunId) -> bool {
        self.current == Some(run)
    }

    #[must_use]
    pub fn current_run(&self) -> Option<RunId> {
        self.current
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (mut ticker, mut ticks) = Ticker::new(Duration::from_millis(100));
        let run = ticker.start();

        tokio::time::sleep(Duration::from_millis(350)).await;
        let mut received = Vec::new();
        while let Ok(tick) = ticks.try_recv() {
            received.push(tick);
        }
        assert_eq!(received, vec![run, run, run]);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_supersedes_previous_run() {
        let (mut ticker, mut ticks) = Ticker::new(Duration::from_millis(100));
        let first = ticker.start();
        tokio::time::sleep(Duration::from_millis(150)).await;
        let second = ticker.start();
        assert_ne!(first, second);
        assert!(!ticker.accepts(first));
        assert!(ticker.accepts(second));

        tokio::time::sleep(Duration::from_millis(250)).await;
        let mut received = Vec::new();
        while let Ok(tick) = ticks.try_recv() {
            received.push(tick);
        }
        assert_eq!(received, vec![first, second, second]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let (mut ticker, mut ticks) = Ticker::new(Duration::from_millis(100));
        ticker.start();
        ticker.cancel();
        ticker.cancel();
        assert!(!ticker.is_active());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(ticks.try_recv().is_err());
    }

    #[test]
    fn runs_without_runtime() {
        let (mut ticker, _ticks) = Ticker::new(Duration::from_millis(100));
        let run = ticker.start();
        assert!(ticker.accepts(run));
    }
}
