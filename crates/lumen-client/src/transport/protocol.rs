//! Wire helpers shared by the resource functions.

use serde::Deserialize;

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Best human-readable message for a failed response body.
pub fn error_message(body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(text) = parsed.error.or(parsed.message) {
            return text.trim().to_string();
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "no response body".to_string()
    } else {
        text.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_field() {
        let body = br#"{"error": "Only .parquet files are allowed"}"#;
        assert_eq!(error_message(body), "Only .parquet files are allowed");
    }

    #[test]
    fn falls_back_to_message_field() {
        let body = br#"{"message": "Error, start date can't be after end date"}"#;
        assert_eq!(
            error_message(body),
            "Error, start date can't be after end date"
        );
    }

    #[test]
    fn non_json_body_is_truncated_text() {
        let body = "x".repeat(500);
        assert_eq!(error_message(body.as_bytes()).len(), 200);
        assert_eq!(error_message(b"   "), "no response body");
    }
}
