//! # lumen-client
//!
//! Talks to the occupancy prediction backend. One configured [`HttpClient`]
//! underlies typed resource functions (file check/upload/delete/download and
//! predictions), exposed together as [`ApiClient`]. [`FileStateQuery`] keeps a
//! polled, cached view of whether a data file exists server-side.

pub mod freshness;
pub mod resources;
pub mod transport;

pub use freshness::{spawn_polling, FetchTrigger, FileStateQuery, PollingHandle};
pub use resources::ApiClient;
pub use transport::{HttpClient, HttpClientConfig};
