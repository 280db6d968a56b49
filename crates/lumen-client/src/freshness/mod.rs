//! Polled, cached view of the server-side file state.
//!
//! One [`FileStateQuery`] owns the `check-file` cache entry. Fetches are
//! numbered when issued; a response only replaces the cached value if no
//! later-issued response has been applied already. Failed fetches keep the
//! previous value.

pub mod poller;
pub mod query;

pub use poller::{spawn_polling, PollingHandle};
pub use query::{CachedFileState, FetchTrigger, FileStateQuery, QueryStats};
