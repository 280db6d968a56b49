//! HTTP client with a configured base URL, default headers, timeout, and gzip.
//!
//! Calls are single-shot: no retries, no backoff. Every request carries a fresh
//! `x-request-id` and runs inside a `lumen.request` span.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use bytes::Bytes;
use lumen_core::config::ApiConfig;
use lumen_core::constants::REQUEST_ID_HEADER;
use lumen_core::errors::ApiError;
use lumen_observability::request_span;
use lumen_observability::tracing_setup::events;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;

use super::protocol::error_message;

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Headers attached to every request.
    pub default_headers: BTreeMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for HttpClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            default_headers: config.default_headers.clone(),
        }
    }
}

fn transport_err(e: reqwest::Error) -> ApiError {
    ApiError::Transport {
        reason: e.to_string(),
    }
}

/// HTTP transport client. One instance is shared by every resource call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::Request {
                reason: format!("invalid header name '{name}': {e}"),
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| ApiError::Request {
                reason: format!("invalid value for header '{name}': {e}"),
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Request {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET and decode a JSON body.
    pub async fn get_json<Resp: DeserializeOwned>(&self, path: &str) -> Result<Resp, ApiError> {
        let body = self.send(Method::GET, path, |req| req).await?;
        decode(&body)
    }

    /// GET a raw body.
    pub async fn get_bytes(&self, path: &str) -> Result<Bytes, ApiError> {
        self.send(Method::GET, path, |req| req).await
    }

    /// POST a JSON payload and decode a JSON body.
    pub async fn post_json<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        payload: &Req,
    ) -> Result<Resp, ApiError> {
        let body = self
            .send(Method::POST, path, |req| req.json(payload))
            .await?;
        decode(&body)
    }

    /// POST a multipart form and return the raw body.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Bytes, ApiError> {
        self.send(Method::POST, path, move |req| req.multipart(form))
            .await
    }

    /// DELETE and return the raw body.
    pub async fn delete(&self, path: &str) -> Result<Bytes, ApiError> {
        self.send(Method::DELETE, path, |req| req).await
    }

    /// Send one request. Non-2xx statuses become `ApiError::Status` carrying the
    /// backend's message.
    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Bytes, ApiError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = request_span!(method, path, request_id);
        let req = build(
            self.client
                .request(method.clone(), self.url(path))
                .header(REQUEST_ID_HEADER, &request_id),
        );

        async move {
            let started = Instant::now();
            let resp = match req.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    events::request_failed(method.as_str(), path, &e.to_string());
                    return Err(transport_err(e));
                }
            };

            let status = resp.status();
            let body = resp.bytes().await.map_err(|e| {
                events::request_failed(method.as_str(), path, &e.to_string());
                transport_err(e)
            })?;
            events::request_completed(
                method.as_str(),
                path,
                status.as_u16(),
                started.elapsed().as_millis(),
            );

            if status.is_success() {
                Ok(body)
            } else {
                Err(ApiError::Status {
                    status: status.as_u16(),
                    message: error_message(&body),
                })
            }
        }
        .instrument(span)
        .await
    }
}

fn decode<Resp: DeserializeOwned>(body: &[u8]) -> Result<Resp, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let api = ApiConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..ApiConfig::default()
        };
        let client = HttpClient::new(HttpClientConfig::from(&api)).unwrap();
        assert_eq!(client.url("/file/"), "http://localhost:5000/file/");
    }

    #[test]
    fn invalid_default_header_is_a_request_error() {
        let mut config = HttpClientConfig::default();
        config
            .default_headers
            .insert("bad header".to_string(), "v".to_string());
        let err = HttpClient::new(config).unwrap_err();
        assert!(matches!(err, ApiError::Request { .. }));
    }
}
