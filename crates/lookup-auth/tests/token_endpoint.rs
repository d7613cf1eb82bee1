//! Client-credentials flow against a local `tiny_http` token endpoint.

use std::io::Read;
use std::thread::JoinHandle;

use lookup_auth::{AuthError, AuthState, client_credentials, resolve_event};
use lookup_config::AuthConfig;
use pretty_assertions::assert_eq;

struct Captured {
    method: String,
    authorization: Option<String>,
    body: String,
}

/// Serve exactly one request with `status` and `body`, returning what was sent.
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind test server");
    let port = server
        .server_addr()
        .to_ip()
        .map(|addr| addr.port())
        .expect("ip listener");

    let handle = std::thread::spawn(move || {
        let mut request = server.recv().expect("receive request");
        let mut sent = String::new();
        request
            .as_reader()
            .read_to_string(&mut sent)
            .expect("read body");
        let captured = Captured {
            method: request.method().to_string(),
            authorization: request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string()),
            body: sent,
        };
        let response = tiny_http::Response::from_string(body)
            .with_status_code(status)
            .with_header(
                tiny_http::Header::from_bytes("Content-Type", "application/json")
                    .expect("valid header"),
            );
        request.respond(response).expect("respond");
        captured
    });

    (format!("http://127.0.0.1:{port}/token"), handle)
}

#[tokio::test]
async fn fetch_token_sends_basic_auth_and_grant() {
    let (url, server) = serve_once(
        200,
        r#"{"access_token":"issued-token","token_type":"Bearer","expires_in":3600}"#,
    );

    let token = client_credentials::fetch_token(&reqwest::Client::new(), &url, "key", "secret")
        .await
        .expect("token issued");
    let captured = server.join().expect("server thread");

    assert_eq!(token.bearer(), "issued-token");
    assert_eq!(token.client_id.as_deref(), Some("key"));
    assert_eq!(captured.method, "POST");
    // base64("key:secret")
    assert_eq!(captured.authorization.as_deref(), Some("Basic a2V5OnNlY3JldA=="));
    assert_eq!(captured.body, "grant_type=client_credentials");
}

#[tokio::test]
async fn rejected_credentials_surface_status() {
    let (url, server) = serve_once(401, r#"{"error":"invalid_client"}"#);

    let err = client_credentials::fetch_token(&reqwest::Client::new(), &url, "key", "bad")
        .await
        .unwrap_err();
    server.join().expect("server thread");

    assert!(matches!(err, AuthError::TokenRequest { status: 401, .. }));
    assert!(err.to_string().contains("invalid_client"));
}

#[tokio::test]
async fn resolve_event_reports_token_failure_as_error_state() {
    let (url, server) = serve_once(500, "oops");
    let config = AuthConfig {
        token_url: url,
        client_id: "key".into(),
        client_secret: "secret".into(),
        ..Default::default()
    };

    let event = resolve_event(&config, &reqwest::Client::new()).await;
    server.join().expect("server thread");

    assert_eq!(event.state, AuthState::Error);
    assert!(event.error.as_deref().is_some_and(|e| e.contains("500")));
}

#[tokio::test]
async fn resolve_event_uses_client_credentials() {
    let (url, server) = serve_once(200, r#"{"access_token":"cc-token","expires_in":3600}"#);
    let config = AuthConfig {
        token_url: url,
        client_id: "key".into(),
        client_secret: "secret".into(),
        ..Default::default()
    };

    let event = resolve_event(&config, &reqwest::Client::new()).await;
    server.join().expect("server thread");

    assert_eq!(event.state, AuthState::Authenticated);
    assert_eq!(event.authorization_header().as_deref(), Some("Bearer cc-token"));
}
