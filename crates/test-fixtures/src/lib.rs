//! Test fixtures for Lumen: golden backend payloads, an in-memory
//! [`FakeApi`], and a [`StubBackend`] HTTP server speaking the backend's wire
//! format.

pub mod fake_api;
pub mod stub_backend;

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use lumen_core::constants::ISO_DATETIME_FORMAT;
use lumen_core::models::{DailyPrediction, RoomId, RoomPrediction};
use serde::de::DeserializeOwned;

pub use fake_api::{FakeApi, FakeOp};
pub use stub_backend::{RecordedRequest, StubBackend};

/// Root directory of the golden payloads.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw bytes.
pub fn load_fixture_bytes(relative_path: &str) -> Vec<u8> {
    let path = fixtures_root().join(relative_path);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Deterministic forecasts for every day in `start..=end`, one entry per room,
/// dated the way the backend dates them (`yyyy-MM-ddTHH:MM:SS`).
pub fn synthetic_predictions(start: NaiveDate, end: NaiveDate) -> Vec<DailyPrediction> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| DailyPrediction {
            date: day
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.format(ISO_DATETIME_FORMAT).to_string())
                .unwrap_or_default(),
            predictions: RoomId::ALL
                .into_iter()
                .map(|room| RoomPrediction {
                    room_id: room,
                    room_cnt: i64::from((day.ordinal() + u32::from(room.number())) % 7),
                    high_boundary: None,
                    low_boundary: None,
                })
                .collect(),
        })
        .collect()
}
