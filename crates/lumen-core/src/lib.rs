//! # lumen-core
//!
//! Foundation crate for the Lumen occupancy prediction client.
//! Defines the data model, the `PredictionApi` seam, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LumenConfig;
pub use errors::{ApiError, LumenError, LumenResult};
pub use models::{Ack, DailyPrediction, DateRange, FileState, RoomId, RoomPrediction};
pub use traits::PredictionApi;
