//! Tracing setup: subscriber installation, span macros, and structured events.

pub mod events;
pub mod spans;

use std::sync::Once;

use lumen_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LUMEN_LOG";

/// Initialize the tracing subscriber.
///
/// `LUMEN_LOG` wins when set and valid (e.g. `LUMEN_LOG=lumen_client=debug`);
/// otherwise `lumen=<config.log_level>` is used. Idempotent.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));
    install(filter, config.json);
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter), false);
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        // Logs go to stderr so they never interleave with the rendered page.
        let registry = tracing_subscriber::registry().with(filter);
        let result = if json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_line_number(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = result;
    });
}

/// Directive covering every `lumen_*` crate at the given level.
fn default_directive(level: &str) -> String {
    ["lumen", "lumen_core", "lumen_client", "lumen_app"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_covers_all_crates() {
        let directive = default_directive("debug");
        assert!(directive.contains("lumen_client=debug"));
        assert!(directive.contains("lumen_app=debug"));
        assert!(EnvFilter::try_new(&directive).is_ok());
    }
}
