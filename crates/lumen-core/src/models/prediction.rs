use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::RoomId;
use crate::constants::{ISO_DATETIME_FORMAT, ISO_DATE_FORMAT, WIRE_DATE_FORMAT};

/// Body of `POST /predict/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub start_date: String,
    pub end_date: String,
}

/// Forecast for a single room on a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPrediction {
    pub room_id: RoomId,
    pub room_cnt: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_boundary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_boundary: Option<f64>,
}

/// All room forecasts for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub date: String,
    pub predictions: Vec<RoomPrediction>,
}

impl DailyPrediction {
    /// Calendar day of this entry.
    ///
    /// Accepts `dd.MM.yyyy`, `yyyy-MM-dd`, and `yyyy-MM-ddTHH:MM:SS`.
    pub fn calendar_day(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, ISO_DATETIME_FORMAT).map(|dt| dt.date()))
            .ok()
    }

    /// Whether every room appears at most once.
    pub fn has_unique_rooms(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.predictions.len());
        self.predictions.iter().all(|p| seen.insert(p.room_id))
    }

    pub fn count_for(&self, room: RoomId) -> Option<i64> {
        self.predictions
            .iter()
            .find(|p| p.room_id == room)
            .map(|p| p.room_cnt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str) -> DailyPrediction {
        DailyPrediction {
            date: date.to_string(),
            predictions: Vec::new(),
        }
    }

    #[test]
    fn calendar_day_accepts_backend_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert_eq!(day("01.06.2024").calendar_day(), expected);
        assert_eq!(day("2024-06-01").calendar_day(), expected);
        assert_eq!(day("2024-06-01T00:00:00").calendar_day(), expected);
        assert_eq!(day("June 1st").calendar_day(), None);
    }

    #[test]
    fn duplicate_rooms_are_detected() {
        let mut entry = day("01.06.2024");
        entry.predictions = vec![
            RoomPrediction {
                room_id: RoomId::Room1,
                room_cnt: 3,
                high_boundary: None,
                low_boundary: None,
            },
            RoomPrediction {
                room_id: RoomId::Room1,
                room_cnt: 4,
                high_boundary: None,
                low_boundary: None,
            },
        ];
        assert!(!entry.has_unique_rooms());
        entry.predictions.pop();
        assert!(entry.has_unique_rooms());
        assert_eq!(entry.count_for(RoomId::Room1), Some(3));
        assert_eq!(entry.count_for(RoomId::Room2), None);
    }
}
