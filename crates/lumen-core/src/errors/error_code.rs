//! LumenErrorCode trait for log and notification correlation.

/// Every error enum provides a stable code string for structured logs.
pub trait LumenErrorCode {
    /// Returns the error code string (e.g., "API_TRANSPORT").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const API_TRANSPORT: &str = "API_TRANSPORT";
pub const API_STATUS: &str = "API_STATUS";
pub const API_DECODE: &str = "API_DECODE";
pub const API_INVALID_RESPONSE: &str = "API_INVALID_RESPONSE";
pub const API_REQUEST: &str = "API_REQUEST";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DOWNLOAD_ERROR: &str = "DOWNLOAD_ERROR";
pub const ACTION_UNAVAILABLE: &str = "ACTION_UNAVAILABLE";
