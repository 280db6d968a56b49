//! Umbrella error for the client.

use super::error_code::{self, LumenErrorCode};
use super::{ApiError, ConfigError, DownloadError};

/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum LumenError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    #[error("{action} is unavailable: {reason}")]
    ActionUnavailable { action: &'static str, reason: String },
}

pub type LumenResult<T> = Result<T, LumenError>;

impl LumenErrorCode for LumenError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Api(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Download(e) => e.error_code(),
            Self::ActionUnavailable { .. } => error_code::ACTION_UNAVAILABLE,
        }
    }
}
