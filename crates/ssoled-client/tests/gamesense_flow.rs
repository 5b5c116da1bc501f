//! End-to-end flow against a mock GameSense server.
//!
//! Each test writes a `coreProps.json` pointing at a `wiremock` server and
//! drives the public [`Oled`] API over real HTTP.

use std::time::Duration;

use serde_json::{Value, json};
use ssoled_client::Oled;
use ssoled_core::OledError;
use ssoled_settings::OledSettings;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Fixture {
    server: MockServer,
    _dir: TempDir,
    oled: Oled,
}

async fn fixture(metadata_status: u16) -> Fixture {
    let server = MockServer::start().await;
    for endpoint in ["/bind_game_event", "/game_event", "/game_heartbeat"] {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/game_metadata"))
        .respond_with(ResponseTemplate::new(metadata_status).set_body_string("{}"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let props = dir.path().join("coreProps.json");
    let address = server.address().to_string();
    std::fs::write(&props, json!({ "address": address }).to_string()).unwrap();

    let oled = Oled::new(OledSettings {
        game: "flow_test".into(),
        display_name: "Flow Test".into(),
        developer: "tests".into(),
        discovery_path: props.to_string_lossy().into_owned(),
        heartbeat_interval_ms: 200,
        enforce_platform: false,
        ..Default::default()
    });

    Fixture {
        server,
        _dir: dir,
        oled,
    }
}

async fn bodies(server: &MockServer, endpoint: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == endpoint)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn connect_display_disconnect() {
    let Fixture { server, _dir, oled } = fixture(200).await;

    oled.connect().await.unwrap();
    assert!(oled.is_connected().await);
    assert!(matches!(
        oled.connect().await,
        Err(OledError::AlreadyConnected)
    ));

    let metadata = bodies(&server, "/game_metadata").await;
    assert_eq!(
        metadata,
        vec![json!({
            "game": "FLOW_TEST",
            "game_display_name": "Flow Test",
            "developer": "tests"
        })]
    );

    let binds = bodies(&server, "/bind_game_event").await;
    assert_eq!(binds.len(), 1);
    assert_eq!(binds[0]["event"], "LINES");
    assert_eq!(
        binds[0]["handlers"][0]["datas"][0]["lines"]
            .as_array()
            .unwrap()
            .len(),
        3
    );

    assert!(oled.print_text("one").await.unwrap());
    assert!(oled.print_text("two").await.unwrap());
    assert!(oled.set_text(0, "top").await.unwrap());
    assert!(oled.clear().await.unwrap());

    let events = bodies(&server, "/game_event").await;
    let frames: Vec<&Value> = events.iter().map(|e| &e["data"]["frame"]).collect();
    assert_eq!(frames.len(), 4);
    assert_eq!(
        frames[1],
        &json!({"custom-text-1": "", "custom-text-2": "one", "custom-text-3": "two"})
    );
    assert_eq!(
        frames[2],
        &json!({"custom-text-1": "top", "custom-text-2": "one", "custom-text-3": "two"})
    );
    assert_eq!(
        frames[3],
        &json!({"custom-text-1": "", "custom-text-2": "", "custom-text-3": ""})
    );
    assert!(events.iter().all(|e| e["game"] == "FLOW_TEST" && e["event"] == "LINES"));

    oled.disconnect().await.unwrap();
    assert!(!oled.is_connected().await);
}

#[tokio::test]
async fn heartbeat_runs_until_disconnect() {
    let Fixture { server, _dir, oled } = fixture(200).await;
    oled.connect().await.unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    let beats = bodies(&server, "/game_heartbeat").await;
    assert!(beats.len() >= 2, "expected at least two keepalives, got {}", beats.len());
    assert!(beats.iter().all(|b| b == &json!({"game": "FLOW_TEST"})));

    oled.disconnect().await.unwrap();
    // Let the server finish recording a request that was already on the wire.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after_stop = bodies(&server, "/game_heartbeat").await.len();

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(bodies(&server, "/game_heartbeat").await.len(), after_stop);
}

#[tokio::test]
async fn rejected_registration_is_a_startup_error() {
    let Fixture { server, _dir, oled } = fixture(500).await;

    let err = oled.connect().await.unwrap_err();
    assert!(matches!(err, OledError::Registration));
    assert!(err.is_startup());
    assert!(!oled.is_connected().await);
    assert!(bodies(&server, "/bind_game_event").await.is_empty());
    assert!(bodies(&server, "/game_heartbeat").await.is_empty());
}

#[tokio::test]
async fn missing_discovery_file_makes_no_requests() {
    let Fixture { server, _dir: dir, .. } = fixture(200).await;
    let oled = Oled::new(OledSettings {
        discovery_path: dir.path().join("absent.json").to_string_lossy().into_owned(),
        enforce_platform: false,
        ..Default::default()
    });

    let err = oled.connect().await.unwrap_err();
    assert!(matches!(err, OledError::ServerNotRunning { .. }));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[cfg(not(windows))]
#[tokio::test]
async fn platform_check_refuses_non_windows() {
    let Fixture { server, _dir: dir, .. } = fixture(200).await;
    let oled = Oled::new(OledSettings {
        discovery_path: dir.path().join("coreProps.json").to_string_lossy().into_owned(),
        enforce_platform: true,
        ..Default::default()
    });

    let err = oled.connect().await.unwrap_err();
    assert!(matches!(err, OledError::UnsupportedPlatform { .. }));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
