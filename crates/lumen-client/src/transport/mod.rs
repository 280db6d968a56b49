//! Transport layer: the configured HTTP client and wire helpers.

pub mod http_client;
pub mod protocol;

pub use http_client::{HttpClient, HttpClientConfig};
pub use protocol::ErrorBody;
