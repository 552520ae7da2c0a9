use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use rest_pki::RestPkiClient;
use tempfile::TempDir;
use wiremock::MockServer;

use crate::ServerConfig;
use crate::router::{AppState, InternalAppState, router};

/// Router wired to a mocked REST PKI plus the app-data directory backing
/// it (dropped with the test).
pub(crate) fn test_app(mock_server: &MockServer) -> (Router, TempDir) {
    let app_data = tempfile::tempdir().unwrap();

    let config = ServerConfig {
        rest_pki_url: mock_server.uri(),
        access_token: "access-token".to_string(),
        app_data_dir: app_data.path().to_path_buf(),
        ..Default::default()
    };

    let client =
        RestPkiClient::new(&config.rest_pki_url, config.access_token.to_owned()).unwrap();

    let state: AppState = Arc::new(InternalAppState {
        client,
        config: Arc::new(config),
    });

    (router(state), app_data)
}

pub(crate) fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) fn empty_post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) async fn response_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
