//! Backend payloads recorded from the real service decode as expected.

use lumen_core::models::{Ack, DailyPrediction, FileState, RoomId};
use test_fixtures::load_fixture;

#[test]
fn check_file_payloads() {
    let present: FileState = load_fixture("check_file_present.json");
    assert_eq!(present, FileState::present("rooms_2024.parquet"));

    let missing: FileState = load_fixture("check_file_missing.json");
    assert_eq!(missing, FileState::missing());
}

#[test]
fn delete_ack_payload() {
    let ack: Ack = load_fixture("delete_ack.json");
    assert_eq!(ack.deleted_file, vec!["rooms_2024.parquet".to_string()]);
}

#[test]
fn prediction_payload_passes_validation() {
    let days: Vec<DailyPrediction> = load_fixture("predictions_three_days.json");
    lumen_client::resources::predict::validate(&days).unwrap();
    assert_eq!(days[1].count_for(RoomId::Room1), Some(4));
    assert_eq!(days[2].count_for(RoomId::Room11), Some(8));
}
