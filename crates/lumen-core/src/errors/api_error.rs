//! Errors raised by the backend API binding.

use super::error_code::{self, LumenErrorCode};

/// Failures of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {reason}")]
    Transport { reason: String },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {reason}")]
    Decode { reason: String },

    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("failed to build request: {reason}")]
    Request { reason: String },
}

impl ApiError {
    /// HTTP status code, when the backend answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl LumenErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => error_code::API_TRANSPORT,
            Self::Status { .. } => error_code::API_STATUS,
            Self::Decode { .. } => error_code::API_DECODE,
            Self::InvalidResponse { .. } => error_code::API_INVALID_RESPONSE,
            Self::Request { .. } => error_code::API_REQUEST,
        }
    }
}
