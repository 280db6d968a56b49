//! `/file/` resource: check, upload, delete, download.

use bytes::Bytes;
use lumen_core::constants::{paths, UPLOAD_FIELD};
use lumen_core::errors::ApiError;
use lumen_core::models::{Ack, FileState};
use lumen_observability::tracing_setup::events;
use reqwest::multipart::{Form, Part};

use crate::transport::HttpClient;

/// Whether a data file is present. Never fails for a missing file.
pub async fn check_file(http: &HttpClient) -> Result<FileState, ApiError> {
    let state: FileState = http.get_json(paths::FILE).await?;
    if state.exists && state.filename.is_none() {
        return Err(ApiError::InvalidResponse {
            reason: "file reported present without a filename".to_string(),
        });
    }
    Ok(state)
}

/// Upload `contents` as multipart field `file` under `filename`.
pub async fn upload_file(
    http: &HttpClient,
    filename: &str,
    contents: Vec<u8>,
) -> Result<Ack, ApiError> {
    let size = contents.len();
    let part = Part::bytes(contents)
        .file_name(filename.to_string())
        .mime_str("application/octet-stream")
        .map_err(|e| ApiError::Request {
            reason: e.to_string(),
        })?;
    let form = Form::new().part(UPLOAD_FIELD, part);

    let body = http.post_multipart(paths::FILE, form).await?;
    events::file_uploaded(filename, size);
    Ok(parse_ack(&body))
}

/// Delete the server-side file.
///
/// The backend answers 200 with only a `message` when nothing is stored;
/// that answer is rejected as `InvalidResponse`.
pub async fn delete_file(http: &HttpClient) -> Result<Ack, ApiError> {
    let body = http.delete(paths::FILE).await?;
    let ack = delete_ack(&body)?;
    events::file_deleted(&ack.deleted_file);
    Ok(ack)
}

/// Raw bytes of the stored file.
pub async fn download_file(http: &HttpClient) -> Result<Bytes, ApiError> {
    http.get_bytes(paths::FILE_DOWNLOAD).await
}

/// Mutation acknowledgements are opaque; an empty or non-JSON body is an
/// empty ack.
fn parse_ack(body: &[u8]) -> Ack {
    serde_json::from_slice(body).unwrap_or_default()
}

fn delete_ack(body: &[u8]) -> Result<Ack, ApiError> {
    let ack = parse_ack(body);
    if ack.success.is_none() && ack.deleted_file.is_empty() {
        return Err(ApiError::InvalidResponse {
            reason: format!(
                "no file to delete: {}",
                ack.summary().unwrap_or("nothing was removed")
            ),
        });
    }
    Ok(ack)
}
