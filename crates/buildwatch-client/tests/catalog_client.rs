//! Catalog client tests against wiremock servers.

use buildwatch_client::{BuildCatalogClient, ClientConfig};
use buildwatch_core::fakes::{FakeClock, RecordingSink};
use buildwatch_core::{
    BuildLookup, BuildSource, NormalizedVersion, Platform, ProcessingState, SourceError,
    WatchConfig, WatchController, WatchedBuild,
};
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────────

fn build_json(number: &str, state: &str) -> serde_json::Value {
    serde_json::json!({
        "app_version": "1.2.0",
        "build_number": number,
        "platform": "IOS",
        "processing_state": state,
    })
}

fn lookup(app_id: &str) -> BuildLookup {
    BuildLookup {
        app_id: app_id.to_string(),
        version: Some(NormalizedVersion::parse("1.2")),
        build_number: None,
        platform: Some(Platform::Ios),
    }
}

fn client(server: &MockServer) -> BuildCatalogClient {
    BuildCatalogClient::new(ClientConfig::new(&server.uri()).with_token("s3cret"))
        .expect("client build")
}

/// Two pages for `app-1`: build 41 still processing, then build 42 ready.
async fn mount_two_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/apps/app-1/builds"))
        .and(query_param("version", "1.2.0"))
        .and(query_param("platform", "IOS"))
        .and(query_param("sort", "uploadedDate"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [build_json("41", "PROCESSING")],
            "next": format!("{}/apps/app-1/builds?page=2", server.uri()),
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/apps/app-1/builds"))
        .and(query_param("page", "2"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [build_json("42", "VALID")],
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ── Listing ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn follows_pagination_and_keeps_order() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let builds = client(&server)
        .list_builds(&lookup("app-1"))
        .await
        .expect("list");

    let numbers: Vec<&str> = builds.iter().map(|b| b.build_number.as_str()).collect();
    assert_eq!(numbers, vec!["41", "42"]);
    assert_eq!(builds[0].processing_state, ProcessingState::Pending);
    assert_eq!(builds[1].processing_state, ProcessingState::Ready);
}

#[tokio::test]
async fn next_link_to_another_origin_is_refused_without_sending_token() {
    let catalog = MockServer::start().await;
    let elsewhere = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/apps/app-1/builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [],
            "next": format!("{}/steal", elsewhere.uri()),
        })))
        .expect(1)
        .mount(&catalog)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(0)
        .mount(&elsewhere)
        .await;

    let err = client(&catalog)
        .list_builds(&lookup("app-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Config(_)), "got {err}");
    let received = elsewhere.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn error_status_becomes_source_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/missing/builds"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such app"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .list_builds(&lookup("missing"))
        .await
        .unwrap_err();

    match err {
        SourceError::Status { code, body } => {
            assert_eq!(code, 404);
            assert_eq!(body, "no such app");
        }
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn malformed_body_becomes_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/garbled/builds"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": ["))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .list_builds(&lookup("garbled"))
        .await
        .unwrap_err();

    assert!(matches!(err, SourceError::Decode(_)), "got {err}");
}

// ── End to end ──────────────────────────────────────────────────────────

#[tokio::test]
async fn select_latest_watch_over_http_picks_last_page_build() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let client = client(&server);
    let clock = FakeClock::new();
    let sink = RecordingSink::new();
    let config = WatchConfig::new("app-1")
        .with_app_version("1.2")
        .with_platform(Platform::Ios)
        .with_select_latest(true)
        .with_return_summary(true);

    let result = WatchController::new(&client, &clock, &sink)
        .watch(&config)
        .await
        .expect("watch");

    match result {
        WatchedBuild::Summary(summary) => assert_eq!(summary.build_number, "42"),
        other => panic!("expected summary, got {other:?}"),
    }
}
