//! Configuration system for Lumen.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod api_config;
pub mod cache_config;
pub mod defaults;
pub mod lumen_config;
pub mod notification_config;
pub mod observability_config;
pub mod polling_config;
pub mod shell_config;

pub use api_config::ApiConfig;
pub use cache_config::CacheConfig;
pub use lumen_config::{CliOverrides, LumenConfig};
pub use notification_config::{HorizontalAnchor, NotificationConfig, VerticalAnchor};
pub use observability_config::ObservabilityConfig;
pub use polling_config::PollingConfig;
pub use shell_config::ShellConfig;
