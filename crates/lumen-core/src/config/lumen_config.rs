//! Top-level Lumen configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    defaults, ApiConfig, CacheConfig, NotificationConfig, ObservabilityConfig, PollingConfig,
    ShellConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`LUMEN_*`)
/// 3. Project config (`lumen.toml` in the working directory)
/// 4. User config (`~/.lumen/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LumenConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub cache: CacheConfig,
    pub notifications: NotificationConfig,
    pub shell: ShellConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub splash_delay_ms: Option<u64>,
    pub download_dir: Option<PathBuf>,
}

impl LumenConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(defaults::PROJECT_CONFIG_FILE);
        let project = project_config_path
            .exists()
            .then_some(project_config_path.as_path());
        Self::load_layers(project, &root.display().to_string(), cli_overrides)
    }

    /// Load configuration with an explicit file in place of the project
    /// config. The file must exist.
    pub fn load_file(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_layers(Some(path), &path.display().to_string(), cli_overrides)
    }

    fn load_layers(
        file: Option<&Path>,
        label: &str,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut merged = toml::Value::Table(toml::map::Map::new());

        // Lowest file layer: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                merge_values(&mut merged, read_toml_file(&user_config_path)?);
            }
        }

        // Project (or explicit) config
        if let Some(path) = file {
            merge_values(&mut merged, read_toml_file(path)?);
        }

        let mut config = merged
            .try_into::<LumenConfig>()
            .map_err(|e| ConfigError::ParseError {
                path: label.to_string(),
                message: e.to_string(),
            })?;

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (no layering, no env).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: LumenConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &LumenConfig) -> Result<(), ConfigError> {
        let base_url = config.api.base_url.trim();
        let host = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"));
        match host {
            Some(rest) if !rest.trim_matches('/').is_empty() => {}
            _ => {
                return Err(ConfigError::ValidationFailed {
                    field: "api.base_url".to_string(),
                    message: format!("must be an http(s) URL, got '{base_url}'"),
                });
            }
        }
        if config.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "api.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.polling.interval_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "polling.interval_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.cache.retention_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "cache.retention_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.cache.retention_secs > defaults::MAX_CACHE_RETENTION_SECS {
            return Err(ConfigError::ValidationFailed {
                field: "cache.retention_secs".to_string(),
                message: format!(
                    "must be at most {}, got {}",
                    defaults::MAX_CACHE_RETENTION_SECS,
                    config.cache.retention_secs
                ),
            });
        }
        if config.notifications.max_visible == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "notifications.max_visible".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.lumen/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| {
            h.join(defaults::USER_CONFIG_DIR)
                .join(defaults::USER_CONFIG_FILE)
        })
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored and the lower layer wins.
    fn apply_env_overrides(config: &mut LumenConfig) {
        if let Ok(val) = std::env::var("LUMEN_API_BASE_URL") {
            config.api.base_url = val;
        }
        if let Ok(val) = std::env::var("LUMEN_API_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.api.timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("LUMEN_POLL_INTERVAL_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.polling.interval_ms = v;
            }
        }
        if let Ok(val) = std::env::var("LUMEN_SPLASH_DELAY_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.shell.splash_delay_ms = v;
            }
        }
        if let Ok(val) = std::env::var("LUMEN_DOWNLOAD_DIR") {
            config.shell.download_dir = PathBuf::from(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut LumenConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.base_url {
            config.api.base_url = v.clone();
        }
        if let Some(v) = cli.poll_interval_ms {
            config.polling.interval_ms = v;
        }
        if let Some(v) = cli.splash_delay_ms {
            config.shell.splash_delay_ms = v;
        }
        if let Some(ref v) = cli.download_dir {
            config.shell.download_dir = v.clone();
        }
    }
}

fn read_toml_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Deep-merge `overlay` into `base`; tables merge key by key, everything else
/// is replaced.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
