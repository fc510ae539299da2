mod common;

use std::sync::Arc;

use common::{FakeApi, VALID_CODE, authenticated_state, state_with};
use reqwest::{StatusCode, Url};
use serde_json::{Value, json};
use spotify_mixer::{
    error::MixerError,
    management::MixerState,
    server::{router, start_api_server},
};

/// Calls `/auth` and returns the `state` carried by the consent URL.
async fn issued_state(base: &str) -> String {
    let body: Value = reqwest::get(format!("{}/auth", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let url = Url::parse(body["auth_url"].as_str().unwrap()).unwrap();
    url.query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap()
}

async fn is_authenticated(base: &str) -> bool {
    let health: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    health["authenticated"].as_bool().unwrap()
}

/// Serves the router on an ephemeral port and returns its base URL.
async fn spawn(state: MixerState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health_reports_authentication() {
    let base = spawn(state_with(Arc::new(FakeApi::new()))).await;

    let res = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["authenticated"], false);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_auth_returns_consent_url() {
    let base = spawn(state_with(Arc::new(FakeApi::new()))).await;

    let body: Value = reqwest::get(format!("{}/auth", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let url = body["auth_url"].as_str().unwrap();
    assert!(url.contains("client_id=client-id"));
    assert!(url.contains("response_type=code"));
}

#[tokio::test]
async fn test_callback_authenticates_session() {
    let api = Arc::new(FakeApi::new());
    let base = spawn(state_with(api.clone())).await;
    let state = issued_state(&base).await;

    let res = reqwest::get(format!(
        "{}/callback?code={}&state={}",
        base, VALID_CODE, state
    ))
    .await
    .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Authentication successful"));

    assert!(is_authenticated(&base).await);
}

#[tokio::test]
async fn test_callback_without_state_is_rejected() {
    let api = Arc::new(FakeApi::new());
    let base = spawn(state_with(api.clone())).await;
    issued_state(&base).await;

    let res = reqwest::get(format!("{}/callback?code={}", base, VALID_CODE))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(!is_authenticated(&base).await);
    assert_eq!(api.calls_named("exchange_code"), 0);
}

#[tokio::test]
async fn test_callback_failures() {
    let api = Arc::new(FakeApi::new());
    let base = spawn(state_with(api.clone())).await;

    let denied = reqwest::get(format!("{}/callback?error=access_denied", base))
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::BAD_REQUEST);

    let missing = reqwest::get(format!("{}/callback", base)).await.unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let forged = reqwest::get(format!("{}/callback?code={}&state=forged", base, VALID_CODE))
        .await
        .unwrap();
    assert_eq!(forged.status(), StatusCode::BAD_REQUEST);

    let state = issued_state(&base).await;
    let bad = reqwest::get(format!("{}/callback?code=stale&state={}", base, state))
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    assert!(bad.text().await.unwrap().contains("Login failed"));

    assert_eq!(api.calls_named("exchange_code"), 1);
    assert!(!is_authenticated(&base).await);
}

#[tokio::test]
async fn test_create_playlist_requires_authentication() {
    let api = Arc::new(FakeApi::new().with_artist("Tems", "Tems", 5));
    let base = spawn(state_with(api.clone())).await;

    let res = reqwest::Client::new()
        .post(format!("{}/create-playlist", base))
        .json(&json!({ "artists": ["Tems"], "playlist_name": "Mix" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unauthenticated");
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_create_playlist_validates_input() {
    let base = spawn(authenticated_state(Arc::new(FakeApi::new())).await).await;
    let client = reqwest::Client::new();

    for payload in [
        json!({ "artists": [], "playlist_name": "Mix" }),
        json!({ "artists": ["Tems"], "playlist_name": "  " }),
        json!({ "artists": ["Tems"], "playlist_name": "Mix", "songs_per_artist": 0 }),
        json!({ "artists": ["Tems"], "playlist_name": "Mix", "songs_per_artist": 11 }),
    ] {
        let res = client
            .post(format!("{}/create-playlist", base))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", payload);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_request");
    }
}

#[tokio::test]
async fn test_create_playlist_returns_mix_result() {
    let api = Arc::new(
        FakeApi::new()
            .with_artist("Taylor Swift", "Taylor Swift", 10)
            .with_artist("Tems", "Tems", 10),
    );
    let base = spawn(authenticated_state(api.clone()).await).await;

    let res = reqwest::Client::new()
        .post(format!("{}/create-playlist", base))
        .json(&json!({
            "artists": ["Taylor Swift", "ZZZNonexistentArtist123", "Tems"],
            "playlist_name": "Evening Mix",
            "songs_per_artist": 3,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["tracks"].as_array().unwrap().len(), 6);
    assert_eq!(body["playlist_id"], "playlist-1");
    assert_eq!(
        body["playlist_url"],
        "https://open.spotify.com/playlist/playlist-1"
    );
    assert_eq!(body["found_artists"], json!(["Taylor Swift", "Tems"]));
    assert_eq!(body["skipped_artists"], json!(["ZZZNonexistentArtist123"]));
    assert_eq!(body["tracks"][0]["searched_for_name"], "Taylor Swift");
}

#[tokio::test]
async fn test_create_playlist_defaults_songs_per_artist() {
    let api = Arc::new(FakeApi::new().with_artist("Tems", "Tems", 10));
    let base = spawn(authenticated_state(api.clone()).await).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/create-playlist", base))
        .json(&json!({ "artists": ["Tems"], "playlist_name": "Mix" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["tracks"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_create_playlist_no_tracks_is_not_found() {
    let api = Arc::new(FakeApi::new());
    let base = spawn(authenticated_state(api.clone()).await).await;

    let res = reqwest::Client::new()
        .post(format!("{}/create-playlist", base))
        .json(&json!({ "artists": ["Nobody"], "playlist_name": "Mix" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "no_tracks_found");
    assert_eq!(api.calls_named("create_playlist"), 0);
}

#[tokio::test]
async fn test_search_artist_lists_candidates() {
    let api = Arc::new(FakeApi::new().with_artist("Wizkid", "Wizkid", 10));
    let base = spawn(authenticated_state(api.clone()).await).await;

    let res = reqwest::Client::new()
        .post(format!("{}/search-artist", base))
        .json(&json!({ "artist_name": "Wizkid" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["query"], "Wizkid");
    assert_eq!(body["artists"][0]["name"], "Wizkid");
    assert_eq!(body["artists"][0]["id"], "wizkid");
}

#[tokio::test]
async fn test_remote_failure_maps_to_bad_gateway() {
    let api = Arc::new(FakeApi::new().with_artist("Tems", "Tems", 5).failing_create());
    let base = spawn(authenticated_state(api.clone()).await).await;

    let res = reqwest::Client::new()
        .post(format!("{}/create-playlist", base))
        .json(&json!({ "artists": ["Tems"], "playlist_name": "Mix" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "remote_error");
}

#[tokio::test]
async fn test_server_reports_port_in_use_as_io_error() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    let err = start_api_server(state_with(Arc::new(FakeApi::new())), &addr)
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<MixerError>().is_none());
    let io_err = err.downcast_ref::<std::io::Error>().unwrap();
    assert_eq!(io_err.kind(), std::io::ErrorKind::AddrInUse);
}

#[tokio::test]
async fn test_server_rejects_malformed_address() {
    let err = start_api_server(state_with(Arc::new(FakeApi::new())), "not-an-address")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MixerError>(),
        Some(MixerError::Config(_))
    ));
}
