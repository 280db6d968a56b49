use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::errors::ApiError;
use crate::models::{Ack, DailyPrediction, FileState};

/// The five backend operations the client consumes.
///
/// Implementations are thin pass-throughs: no retries, no backoff, errors
/// propagate unchanged to the caller.
pub trait PredictionApi: Send + Sync {
    /// `GET /file/`. A missing file is `exists: false`, never an error.
    fn check_file(&self) -> impl Future<Output = Result<FileState, ApiError>> + Send;

    /// `POST /file/` as multipart field `file`.
    fn upload_file(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> impl Future<Output = Result<Ack, ApiError>> + Send;

    /// `DELETE /file/`.
    fn delete_file(&self) -> impl Future<Output = Result<Ack, ApiError>> + Send;

    /// `GET /file/download/`, raw bytes.
    fn download_file(&self) -> impl Future<Output = Result<Bytes, ApiError>> + Send;

    /// `POST /predict/` with `dd.MM.yyyy` dates.
    fn get_predictions(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> impl Future<Output = Result<Vec<DailyPrediction>, ApiError>> + Send;
}

impl<T: PredictionApi> PredictionApi for Arc<T> {
    fn check_file(&self) -> impl Future<Output = Result<FileState, ApiError>> + Send {
        (**self).check_file()
    }

    fn upload_file(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> impl Future<Output = Result<Ack, ApiError>> + Send {
        (**self).upload_file(filename, contents)
    }

    fn delete_file(&self) -> impl Future<Output = Result<Ack, ApiError>> + Send {
        (**self).delete_file()
    }

    fn download_file(&self) -> impl Future<Output = Result<Bytes, ApiError>> + Send {
        (**self).download_file()
    }

    fn get_predictions(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> impl Future<Output = Result<Vec<DailyPrediction>, ApiError>> + Send {
        (**self).get_predictions(start_date, end_date)
    }
}
