//! Elapsed recording duration
//!
//! A periodic task adds one tick to a shared counter. The task is aborted
//! when the timer is cancelled or dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Shortest tick the timer runs with
const MIN_TICK: Duration = Duration::from_millis(1);

/// Counts elapsed recording time in whole ticks
pub struct DurationTimer {
    elapsed_ms: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

impl DurationTimer {
    /// Spawn the ticking task. Must be called inside a tokio runtime.
    ///
    /// A tick shorter than a millisecond is raised to one millisecond.
    pub fn start(tick: Duration) -> Self {
        let tick = tick.max(MIN_TICK);
        let elapsed_ms = Arc::new(AtomicU64::new(0));
        let counter = elapsed_ms.clone();
        let step = tick.as_millis() as u64;

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + tick, tick);
            loop {
                interval.tick().await;
                counter.fetch_add(step, Ordering::Relaxed);
            }
        });

        Self { elapsed_ms, handle }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub(crate) fn counter(&self) -> Arc<AtomicU64> {
        self.elapsed_ms.clone()
    }

    /// Stop ticking
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for DurationTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
