//! Errors while saving a downloaded file locally.

use super::error_code::{self, LumenErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("no file is available to download")]
    NoFile,

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LumenErrorCode for DownloadError {
    fn error_code(&self) -> &'static str {
        error_code::DOWNLOAD_ERROR
    }
}
