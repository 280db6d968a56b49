//! In-memory `PredictionApi` with scripted responses and failure injection.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use bytes::Bytes;
use chrono::NaiveDate;
use lumen_core::constants::WIRE_DATE_FORMAT;
use lumen_core::errors::ApiError;
use lumen_core::models::{Ack, DailyPrediction, FileState};
use lumen_core::traits::PredictionApi;

use crate::synthetic_predictions;

/// The five backend operations, for call accounting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakeOp {
    Check,
    Upload,
    Delete,
    Download,
    Predict,
}

#[derive(Default)]
struct Inner {
    file: Option<(String, Vec<u8>)>,
    scripted_checks: VecDeque<(Result<FileState, ApiError>, Duration)>,
    failures: HashMap<FakeOp, ApiError>,
    predictions: Option<Vec<DailyPrediction>>,
    delays: HashMap<FakeOp, Duration>,
    calls: Vec<FakeOp>,
}

/// Single-slot backend held in memory.
///
/// Mirrors the real backend: one file at most, duplicate uploads rejected,
/// delete and predict need a stored file.
#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(filename: &str, contents: &[u8]) -> Self {
        let api = Self::new();
        api.lock().file = Some((filename.to_string(), contents.to_vec()));
        api
    }

    /// Queue a `check_file` answer delivered after `delay`. Queued answers are
    /// used before the stored slot is consulted.
    pub fn push_check(&self, result: Result<FileState, ApiError>, delay: Duration) {
        self.lock().scripted_checks.push_back((result, delay));
    }

    /// Fail every call of `op` with `error` until cleared.
    pub fn fail(&self, op: FakeOp, error: ApiError) {
        self.lock().failures.insert(op, error);
    }

    pub fn clear_failure(&self, op: FakeOp) {
        self.lock().failures.remove(&op);
    }

    /// Delay every call of `op`.
    pub fn delay(&self, op: FakeOp, delay: Duration) {
        self.lock().delays.insert(op, delay);
    }

    /// Answer predict calls with `days` instead of synthetic forecasts.
    pub fn set_predictions(&self, days: Vec<DailyPrediction>) {
        self.lock().predictions = Some(days);
    }

    /// Replace the stored slot without going through upload.
    pub fn set_file(&self, file: Option<(&str, &[u8])>) {
        self.lock().file = file.map(|(name, bytes)| (name.to_string(), bytes.to_vec()));
    }

    pub fn stored_file(&self) -> Option<(String, Vec<u8>)> {
        self.lock().file.clone()
    }

    pub fn calls(&self) -> Vec<FakeOp> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, op: FakeOp) -> usize {
        self.lock().calls.iter().filter(|c| **c == op).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and return the injected failure and delay for it.
    fn begin(&self, op: FakeOp) -> (Option<ApiError>, Duration) {
        let mut inner = self.lock();
        inner.calls.push(op);
        let failure = inner.failures.get(&op).cloned();
        let delay = inner.delays.get(&op).copied().unwrap_or_default();
        (failure, delay)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn status(status: u16, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

impl PredictionApi for FakeApi {
    async fn check_file(&self) -> Result<FileState, ApiError> {
        let (failure, delay) = self.begin(FakeOp::Check);
        let scripted = self.lock().scripted_checks.pop_front();
        if let Some((result, scripted_delay)) = scripted {
            pause(scripted_delay).await;
            return result;
        }
        pause(delay).await;
        if let Some(e) = failure {
            return Err(e);
        }
        Ok(match &self.lock().file {
            Some((name, _)) => FileState::present(name.clone()),
            None => FileState::missing(),
        })
    }

    async fn upload_file(&self, filename: &str, contents: Vec<u8>) -> Result<Ack, ApiError> {
        let (failure, delay) = self.begin(FakeOp::Upload);
        pause(delay).await;
        if let Some(e) = failure {
            return Err(e);
        }
        if filename.is_empty() {
            return Err(status(400, "No selected file"));
        }
        if !filename.to_lowercase().ends_with(".parquet") {
            return Err(status(400, "Only .parquet files are allowed"));
        }
        let mut inner = self.lock();
        if inner.file.is_some() {
            return Err(status(400, "A .parquet file already exists on the server"));
        }
        inner.file = Some((filename.to_string(), contents));
        Ok(Ack {
            success: Some("File uploaded successfully".to_string()),
            ..Ack::default()
        })
    }

    async fn delete_file(&self) -> Result<Ack, ApiError> {
        let (failure, delay) = self.begin(FakeOp::Delete);
        pause(delay).await;
        if let Some(e) = failure {
            return Err(e);
        }
        match self.lock().file.take() {
            Some((name, _)) => Ok(Ack {
                success: Some("Deleted .parquet file".to_string()),
                deleted_file: vec![name],
                ..Ack::default()
            }),
            None => Err(ApiError::InvalidResponse {
                reason: "no file to delete: No .parquet files found to delete".to_string(),
            }),
        }
    }

    async fn download_file(&self) -> Result<Bytes, ApiError> {
        let (failure, delay) = self.begin(FakeOp::Download);
        pause(delay).await;
        if let Some(e) = failure {
            return Err(e);
        }
        match &self.lock().file {
            Some((_, contents)) => Ok(Bytes::from(contents.clone())),
            None => Err(status(404, "No .parquet file found")),
        }
    }

    async fn get_predictions(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DailyPrediction>, ApiError> {
        let (failure, delay) = self.begin(FakeOp::Predict);
        pause(delay).await;
        if let Some(e) = failure {
            return Err(e);
        }
        let inner = self.lock();
        if inner.file.is_none() {
            return Err(status(404, " Parquet file not found"));
        }
        if let Some(days) = &inner.predictions {
            return Ok(days.clone());
        }
        let parse = |raw: &str| {
            NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT)
                .map_err(|e| status(400, &format!("time data '{raw}' does not match: {e}")))
        };
        let start = parse(start_date)?;
        let end = parse(end_date)?;
        if start > end {
            return Err(status(400, "Error, start date can't be after end date"));
        }
        Ok(synthetic_predictions(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn single_slot_rejects_second_upload() {
        let api = FakeApi::new();
        api.upload_file("a.parquet", vec![1]).await.unwrap();
        let err = api.upload_file("b.parquet", vec![2]).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(api.stored_file().unwrap().0, "a.parquet");
    }

    #[tokio::test]
    async fn delete_without_file_is_rejected() {
        let api = FakeApi::new();
        let err = api.delete_file().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn scripted_checks_come_first() {
        let api = FakeApi::with_file("a.parquet", b"x");
        api.push_check(Ok(FileState::missing()), Duration::ZERO);
        assert_eq!(api.check_file().await.unwrap(), FileState::missing());
        assert_eq!(
            api.check_file().await.unwrap(),
            FileState::present("a.parquet")
        );
        assert_eq!(api.call_count(FakeOp::Check), 2);
    }
}
