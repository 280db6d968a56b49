//! End-to-end tests of `ApiClient` against the stub backend.

use lumen_client::ApiClient;
use lumen_core::config::ApiConfig;
use lumen_core::errors::ApiError;
use lumen_core::models::{FileState, RoomId};
use lumen_core::traits::PredictionApi;
use test_fixtures::{load_fixture_bytes, StubBackend};

async fn setup() -> (StubBackend, ApiClient) {
    let stub = StubBackend::start().await;
    let client = ApiClient::new(&stub.api_config()).unwrap();
    (stub, client)
}

#[tokio::test]
async fn check_reports_missing_file() {
    let (_stub, client) = setup().await;
    assert_eq!(client.check_file().await.unwrap(), FileState::missing());
}

#[tokio::test]
async fn upload_then_check_then_download_round_trip() {
    let (stub, client) = setup().await;
    let contents = load_fixture_bytes("sample.parquet");

    let ack = client
        .upload_file("rooms_2024.parquet", contents.clone())
        .await
        .unwrap();
    assert_eq!(ack.summary(), Some("File uploaded successfully"));
    assert_eq!(
        stub.stored_file(),
        Some(("rooms_2024.parquet".to_string(), contents.clone()))
    );

    assert_eq!(
        client.check_file().await.unwrap(),
        FileState::present("rooms_2024.parquet")
    );
    let downloaded = client.download_file().await.unwrap();
    assert_eq!(downloaded.as_ref(), contents.as_slice());
}

#[tokio::test]
async fn duplicate_upload_surfaces_backend_message() {
    let (stub, client) = setup().await;
    stub.seed_file("first.parquet", b"a");

    let err = client
        .upload_file("second.parquet", b"b".to_vec())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 400,
            message: "A .parquet file already exists on the server".to_string(),
        }
    );
}

#[tokio::test]
async fn non_parquet_upload_is_sent_and_rejected_by_backend() {
    let (stub, client) = setup().await;
    let err = client
        .upload_file("notes.csv", b"a,b".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn delete_without_stored_file_is_rejected() {
    let (stub, client) = setup().await;
    stub.seed_file("rooms.parquet", b"x");

    let first = client.delete_file().await.unwrap();
    assert_eq!(first.deleted_file, vec!["rooms.parquet".to_string()]);
    assert_eq!(stub.stored_file(), None);

    let err = client.delete_file().await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse { .. }), "got {err:?}");
    assert_eq!(stub.requests().len(), 2);
}

#[tokio::test]
async fn download_without_file_is_404() {
    let (_stub, client) = setup().await;
    let err = client.download_file().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn predictions_cover_each_day_and_every_room() {
    let (stub, client) = setup().await;
    stub.seed_file("rooms.parquet", b"x");

    let days = client
        .get_predictions("01.06.2024", "03.06.2024")
        .await
        .unwrap();
    assert_eq!(days.len(), 3);
    for day in &days {
        assert!(day.calendar_day().is_some());
        for room in RoomId::ALL {
            assert!(day.count_for(room).is_some());
        }
    }
}

#[tokio::test]
async fn reversed_range_is_a_backend_error() {
    let (stub, client) = setup().await;
    stub.seed_file("rooms.parquet", b"x");

    let err = client
        .get_predictions("03.06.2024", "01.06.2024")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 400,
            message: "Error, start date can't be after end date".to_string(),
        }
    );
}

#[tokio::test]
async fn predict_without_file_is_404() {
    let (_stub, client) = setup().await;
    let err = client
        .get_predictions("01.06.2024", "01.06.2024")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn server_errors_are_status_errors() {
    let (stub, client) = setup().await;
    stub.force_status(Some(503));
    let err = client.check_file().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 503,
            message: "injected failure".to_string(),
        }
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ApiConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 2,
        ..ApiConfig::default()
    };

    let client = ApiClient::new(&config).unwrap();
    let err = client.check_file().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
}

#[tokio::test]
async fn every_request_carries_a_unique_request_id() {
    let (stub, client) = setup().await;
    stub.seed_file("rooms.parquet", b"x");
    client.check_file().await.unwrap();
    client.delete_file().await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/file/");
    assert_eq!(requests[1].method, "DELETE");
    let ids: Vec<_> = requests.iter().filter_map(|r| r.request_id.clone()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}
