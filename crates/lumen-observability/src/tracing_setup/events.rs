//! Structured log events for key client operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// A backend request completed (any status).
pub fn request_completed(method: &str, path: &str, status: u16, elapsed_ms: u128) {
    tracing::debug!(
        event = "request_completed",
        method = %method,
        path = %path,
        status = status,
        elapsed_ms = elapsed_ms as u64,
        "request completed"
    );
}

/// A backend request failed before a response arrived.
pub fn request_failed(method: &str, path: &str, reason: &str) {
    tracing::warn!(
        event = "request_failed",
        method = %method,
        path = %path,
        reason = %reason,
        "request failed"
    );
}

/// A file was uploaded.
pub fn file_uploaded(filename: &str, bytes: usize) {
    tracing::info!(
        event = "file_uploaded",
        filename = %filename,
        bytes = bytes,
        "file uploaded"
    );
}

/// The server-side file was deleted.
pub fn file_deleted(deleted: &[String]) {
    tracing::info!(
        event = "file_deleted",
        deleted = ?deleted,
        "file deleted"
    );
}

/// A file was saved locally.
pub fn file_downloaded(path: &str, bytes: usize) {
    tracing::info!(
        event = "file_downloaded",
        path = %path,
        bytes = bytes,
        "file downloaded"
    );
}

/// Predictions were received.
pub fn predictions_received(start: &str, end: &str, days: usize) {
    tracing::info!(
        event = "predictions_received",
        start = %start,
        end = %end,
        days = days,
        "predictions received"
    );
}

/// A user action failed and was turned into a notification.
pub fn action_failed(action: &str, code: &str, reason: &str) {
    tracing::warn!(
        event = "action_failed",
        action = %action,
        code = %code,
        reason = %reason,
        "action failed"
    );
}

/// A file-state fetch failed; the previous value stays visible.
pub fn poll_failed(seq: u64, reason: &str) {
    tracing::warn!(
        event = "poll_failed",
        seq = seq,
        reason = %reason,
        "file check failed, keeping previous state"
    );
}

/// A file-state response arrived after a newer one had been applied.
pub fn stale_response_discarded(seq: u64, applied: u64) {
    tracing::debug!(
        event = "stale_response_discarded",
        seq = seq,
        applied = applied,
        "discarded out-of-order file check response"
    );
}
