use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Error)]
pub enum TickError {
    #[error("no tokio runtime available for background ticking")]
    RuntimeUnavailable,
}

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    generation: Arc<AtomicU64>,
}

#[derive(Debug)]
pub struct TickHandle {
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    // Starting again replaces the previous interval: the old task goes quiet
    // as soon as it sees a newer generation, so ticks never stack.
    pub fn start(&self, events: UnboundedSender<()>) -> Result<TickHandle, TickError> {
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(TickError::RuntimeUnavailable);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // A stalled loop gets single ticks again, not a burst of
            // catch-ups: every tick is exactly one logical second.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately, the countdown
            // starts one period later.
            interval.tick().await;
            loop {
                interval.tick().await;
                if current.load(Ordering::SeqCst) != generation {
                    break;
                }
                if events.send(()).is_err() {
                    break;
                }
            }
        });

        Ok(TickHandle { task: Some(task) })
    }
}

impl TickHandle {
    // A handle with no task behind it, for callers without a runtime.
    pub fn noop() -> Self {
        Self { task: None }
    }

    pub fn stop(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
