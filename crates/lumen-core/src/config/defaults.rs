// Single source of truth for all default values.

// --- API ---
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// --- Polling ---
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

// --- Cache ---
pub const DEFAULT_CACHE_RETENTION_SECS: u64 = 15 * 60;
/// Longest idle retention the cache accepts (1000 years).
pub const MAX_CACHE_RETENTION_SECS: u64 = 1000 * 365 * 24 * 60 * 60;
pub const DEFAULT_STALE_AFTER_SECS: u64 = 0;
pub const DEFAULT_RETRY_ON_FAILURE: bool = false;

// --- Notifications ---
pub const DEFAULT_MAX_VISIBLE_NOTIFICATIONS: usize = 3;
pub const DEFAULT_NOTIFICATION_AUTO_HIDE_MS: u64 = 5_000;

// --- Shell ---
pub const DEFAULT_SPLASH_DELAY_MS: u64 = 2_000;
pub const DEFAULT_DOWNLOAD_DIR: &str = ".";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";

// --- Files ---
pub const PROJECT_CONFIG_FILE: &str = "lumen.toml";
pub const USER_CONFIG_DIR: &str = ".lumen";
pub const USER_CONFIG_FILE: &str = "config.toml";
