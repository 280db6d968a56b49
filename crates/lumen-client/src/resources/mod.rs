//! Typed resource functions over the shared [`HttpClient`], and [`ApiClient`]
//! binding them to the `PredictionApi` seam.

pub mod file;
pub mod predict;

use bytes::Bytes;
use lumen_core::config::ApiConfig;
use lumen_core::errors::ApiError;
use lumen_core::models::{Ack, DailyPrediction, FileState};
use lumen_core::traits::PredictionApi;

use crate::transport::{HttpClient, HttpClientConfig};

/// Backend client used by the application.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(HttpClientConfig::from(config))?,
        })
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl PredictionApi for ApiClient {
    async fn check_file(&self) -> Result<FileState, ApiError> {
        file::check_file(&self.http).await
    }

    async fn upload_file(&self, filename: &str, contents: Vec<u8>) -> Result<Ack, ApiError> {
        file::upload_file(&self.http, filename, contents).await
    }

    async fn delete_file(&self) -> Result<Ack, ApiError> {
        file::delete_file(&self.http).await
    }

    async fn download_file(&self) -> Result<Bytes, ApiError> {
        file::download_file(&self.http).await
    }

    async fn get_predictions(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DailyPrediction>, ApiError> {
        predict::get_predictions(&self.http, start_date, end_date).await
    }
}
