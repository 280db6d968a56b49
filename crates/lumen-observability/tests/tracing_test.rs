//! Tests for the Lumen tracing setup.

use std::sync::Mutex;

use lumen_core::config::ObservabilityConfig;
use lumen_observability::init_tracing;
use lumen_observability::tracing_setup::{events, LOG_ENV};

/// Global mutex to serialize tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn init_with_debug_filter_does_not_panic() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV, "lumen_client=debug");
    init_tracing(&ObservabilityConfig::default());
    std::env::remove_var(LOG_ENV);
}

#[test]
fn init_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    let config = ObservabilityConfig {
        json: true,
        ..Default::default()
    };
    init_tracing(&config);
    init_tracing(&config);
    init_tracing(&config);
}

#[test]
fn invalid_filter_falls_back_to_config_level() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV, "this=is=not=a=filter");
    init_tracing(&ObservabilityConfig::default());
    std::env::remove_var(LOG_ENV);
}

#[test]
fn events_and_spans_emit_without_subscriber_state() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    let _span = lumen_observability::action_span!("predict").entered();
    events::predictions_received("01.06.2024", "03.06.2024", 3);
    events::poll_failed(4, "connection refused");
    events::stale_response_discarded(3, 5);
}
