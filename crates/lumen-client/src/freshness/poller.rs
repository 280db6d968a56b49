//! Background interval fetches for a [`FileStateQuery`].

use std::sync::Arc;
use std::time::Duration;

use lumen_core::traits::PredictionApi;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::query::{FetchTrigger, FileStateQuery};

/// Running poll loop. Dropping the handle stops polling.
#[derive(Debug)]
pub struct PollingHandle {
    task: JoinHandle<()>,
    interval: Duration,
}

impl PollingHandle {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop polling now. An in-flight check is cancelled.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetch immediately, then every `interval`, until the handle is dropped.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_polling<A>(query: Arc<FileStateQuery<A>>, interval: Duration) -> PollingHandle
where
    A: PredictionApi + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut trigger = FetchTrigger::Mount;
        loop {
            ticker.tick().await;
            // Errors are logged by the query; the previous value stays.
            let _ = query.fetch(trigger).await;
            trigger = FetchTrigger::Interval;
        }
    });
    PollingHandle { task, interval }
}
