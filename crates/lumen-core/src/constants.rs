/// Lumen client version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Date format the backend expects in prediction requests (`dd.MM.yyyy`).
pub const WIRE_DATE_FORMAT: &str = "%d.%m.%Y";

/// ISO calendar date (`yyyy-MM-dd`), accepted from users and from the backend.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// ISO date-time without offset, as emitted by the backend's `isoformat()`.
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Extension of the only data file type the picker offers.
pub const UPLOAD_EXTENSION: &str = "parquet";

/// Multipart form field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Fixed key of the file-state cache entry.
pub const CHECK_FILE_KEY: &str = "check-file";

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// API paths, relative to the configured base URL.
pub mod paths {
    pub const FILE: &str = "/file/";
    pub const FILE_DOWNLOAD: &str = "/file/download/";
    pub const PREDICT: &str = "/predict/";
}
