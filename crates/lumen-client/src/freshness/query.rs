use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lumen_core::config::CacheConfig;
use lumen_core::constants::CHECK_FILE_KEY;
use lumen_core::errors::ApiError;
use lumen_core::models::FileState;
use lumen_core::traits::PredictionApi;
use lumen_observability::poll_span;
use lumen_observability::tracing_setup::events;
use moka::sync::Cache;
use tokio::sync::watch;
use tracing::Instrument;

/// Retries attempted when `retry_on_failure` is enabled.
const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// What caused a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    Mount,
    Interval,
    Manual,
    StaleRead,
}

impl fmt::Display for FetchTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mount => "mount",
            Self::Interval => "interval",
            Self::Manual => "manual",
            Self::StaleRead => "stale_read",
        };
        f.write_str(name)
    }
}

/// The cached value plus the fetch it came from.
#[derive(Debug, Clone)]
pub struct CachedFileState {
    pub state: FileState,
    pub seq: u64,
    pub fetched_at: Instant,
}

/// Counters for the query's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    pub hits: u64,
    pub misses: u64,
    pub fetches: u64,
    pub failures: u64,
    pub discarded: u64,
}

/// Shared file-state query.
pub struct FileStateQuery<A> {
    api: A,
    store: Cache<String, CachedFileState>,
    stale_after: Duration,
    retry_on_failure: bool,
    issued: AtomicU64,
    applied: Mutex<u64>,
    in_flight: AtomicUsize,
    tx: watch::Sender<Option<FileState>>,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
    discarded: AtomicU64,
}

impl<A: PredictionApi> FileStateQuery<A> {
    pub fn new(api: A, config: &CacheConfig) -> Self {
        let store = Cache::builder()
            .max_capacity(1)
            .time_to_idle(config.retention())
            .build();
        let (tx, _rx) = watch::channel(None);
        Self {
            api,
            store,
            stale_after: config.stale_after(),
            retry_on_failure: config.retry_on_failure,
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
            in_flight: AtomicUsize::new(0),
            tx,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Last applied value, if one is retained.
    pub fn current(&self) -> Option<FileState> {
        self.entry().map(|cached| cached.state)
    }

    /// Last applied value with its fetch metadata.
    pub fn entry(&self) -> Option<CachedFileState> {
        match self.store.get(CHECK_FILE_KEY) {
            Some(cached) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(cached)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Whether the next read should trigger a fetch.
    pub fn is_stale(&self) -> bool {
        match self.store.get(CHECK_FILE_KEY) {
            Some(cached) => cached.fetched_at.elapsed() >= self.stale_after,
            None => true,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Observe every applied value.
    pub fn subscribe(&self) -> watch::Receiver<Option<FileState>> {
        self.tx.subscribe()
    }

    pub fn stats(&self) -> QueryStats {
        QueryStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            fetches: self.issued.load(Ordering::SeqCst),
            failures: self.failures.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }

    /// Fetch now, bypassing staleness.
    pub async fn force_refresh(&self) -> Result<FileState, ApiError> {
        self.fetch(FetchTrigger::Manual).await
    }

    /// Issue one fetch and apply its result if it is still the newest.
    ///
    /// Returns the value visible after the fetch. On failure the previous
    /// value stays cached and the error is returned.
    pub async fn fetch(&self, trigger: FetchTrigger) -> Result<FileState, ApiError> {
        // In flight before issued, and until applied: an observer that sees a
        // fetch counted and none in flight also sees its result.
        let _in_flight = InFlight::enter(&self.in_flight);
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self
            .fetch_with_retry(seq)
            .instrument(poll_span!(seq, trigger))
            .await;

        match result {
            Ok(state) => {
                self.apply(seq, state.clone());
                Ok(self
                    .store
                    .get(CHECK_FILE_KEY)
                    .map_or(state, |cached| cached.state))
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                events::poll_failed(seq, &e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_with_retry(&self, seq: u64) -> Result<FileState, ApiError> {
        let retries = if self.retry_on_failure { MAX_RETRIES } else { 0 };
        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 0;
        loop {
            match self.api.check_file().await {
                Ok(state) => return Ok(state),
                Err(e) if attempt < retries => {
                    attempt += 1;
                    tracing::debug!(
                        seq,
                        "file check: retry attempt {}/{} after {:?}: {}",
                        attempt,
                        retries,
                        backoff,
                        e
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Apply `state` from fetch `seq` unless a later fetch already landed.
    fn apply(&self, seq: u64, state: FileState) -> bool {
        let mut applied = match self.applied.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if seq <= *applied {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            events::stale_response_discarded(seq, *applied);
            return false;
        }
        *applied = seq;
        self.store.insert(
            CHECK_FILE_KEY.to_string(),
            CachedFileState {
                state: state.clone(),
                seq,
                fetched_at: Instant::now(),
            },
        );
        self.tx.send_replace(Some(state));
        true
    }
}

/// Counts one fetch as in flight until dropped, including on cancellation.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<A: PredictionApi + 'static> FileStateQuery<A> {
    /// Last known value; schedules a background fetch when it is stale.
    ///
    /// Outside a Tokio runtime no fetch is scheduled.
    pub fn read(self: &Arc<Self>) -> Option<FileState> {
        let current = self.current();
        if self.is_stale() && !self.is_fetching() {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let query = Arc::clone(self);
                handle.spawn(async move {
                    let _ = query.fetch(FetchTrigger::StaleRead).await;
                });
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_names_are_snake_case() {
        assert_eq!(FetchTrigger::StaleRead.to_string(), "stale_read");
        assert_eq!(FetchTrigger::Mount.to_string(), "mount");
    }
}
