//! Error handling for Lumen.
//! One error enum per subsystem, `thiserror` only.

pub mod api_error;
pub mod config_error;
pub mod download_error;
pub mod error_code;
pub mod lumen_error;

pub use api_error::ApiError;
pub use config_error::ConfigError;
pub use download_error::DownloadError;
pub use error_code::LumenErrorCode;
pub use lumen_error::{LumenError, LumenResult};
