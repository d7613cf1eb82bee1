//! Local persons API stand-in built on `tiny_http`.

use std::thread::JoinHandle;

/// What the stand-in server saw.
pub struct Captured {
    pub url: String,
    pub authorization: Option<String>,
}

/// Serve exactly one request with `status` and `body`.
///
/// Returns the base URL to search against and a handle yielding the request.
pub fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind test server");
    let port = server
        .server_addr()
        .to_ip()
        .map(|addr| addr.port())
        .expect("ip listener");

    let handle = std::thread::spawn(move || {
        let request = server.recv().expect("receive request");
        let captured = Captured {
            url: request.url().to_string(),
            authorization: request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string()),
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

    (format!("http://127.0.0.1:{port}/byuapi/persons/v4/"), handle)
}
