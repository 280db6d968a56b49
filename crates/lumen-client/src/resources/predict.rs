//! `/predict/` resource.

use lumen_core::constants::paths;
use lumen_core::errors::ApiError;
use lumen_core::models::{DailyPrediction, PredictRequest};
use lumen_observability::tracing_setup::events;

use crate::transport::HttpClient;

/// Daily room forecasts for the inclusive range. Dates are `dd.MM.yyyy`.
pub async fn get_predictions(
    http: &HttpClient,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<DailyPrediction>, ApiError> {
    let request = PredictRequest {
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
    };
    let days: Vec<DailyPrediction> = http.post_json(paths::PREDICT, &request).await?;
    validate(&days)?;
    events::predictions_received(start_date, end_date, days.len());
    Ok(days)
}

/// Reject entries that would render ambiguously.
pub fn validate(days: &[DailyPrediction]) -> Result<(), ApiError> {
    for day in days {
        if day.calendar_day().is_none() {
            return Err(ApiError::InvalidResponse {
                reason: format!("unparseable prediction date '{}'", day.date),
            });
        }
        if !day.has_unique_rooms() {
            return Err(ApiError::InvalidResponse {
                reason: format!("duplicate room in prediction for {}", day.date),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<DailyPrediction> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn backend_payload_is_valid() {
        let days = parse(
            r#"[{"date": "2024-06-01T00:00:00", "predictions": [
                {"room_id": 1, "room_cnt": 3}, {"room_id": 11, "room_cnt": 0}]}]"#,
        );
        assert!(validate(&days).is_ok());
    }

    #[test]
    fn duplicate_room_is_rejected() {
        let days = parse(
            r#"[{"date": "01.06.2024", "predictions": [
                {"room_id": 2, "room_cnt": 3}, {"room_id": 2, "room_cnt": 1}]}]"#,
        );
        assert!(matches!(
            validate(&days),
            Err(ApiError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn bad_date_is_rejected() {
        let days = parse(r#"[{"date": "someday", "predictions": []}]"#);
        assert!(matches!(
            validate(&days),
            Err(ApiError::InvalidResponse { .. })
        ));
    }
}
