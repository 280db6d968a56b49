//! Span definitions per operation: request, poll, action.

/// Span around a single backend request.
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr, $request_id:expr) => {
        tracing::debug_span!("lumen.request", method = %$method, path = %$path, request_id = %$request_id)
    };
}

/// Span around one file-state fetch.
#[macro_export]
macro_rules! poll_span {
    ($seq:expr, $trigger:expr) => {
        tracing::debug_span!("lumen.poll", seq = $seq, trigger = %$trigger)
    };
}

/// Span around a user action on the page.
#[macro_export]
macro_rules! action_span {
    ($action:expr) => {
        tracing::info_span!("lumen.action", action = %$action)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REQUEST: &str = "lumen.request";
    pub const POLL: &str = "lumen.poll";
    pub const ACTION: &str = "lumen.action";
}
