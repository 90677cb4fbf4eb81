//! Live round-trips against the mock echo server.
//!
//! # Design
//! Each test starts the mock server on a random port, then drives real HTTP
//! through the bundled transport. The `EchoReply` mirror is defined
//! independently from the mock-server crate so these tests catch schema
//! drift between the two.

use std::collections::BTreeMap;

use httpcall_core::{Configuration, Error, HeaderValue, Request};
use serde::Deserialize;

/// Mirror of the mock server's echo reply.
#[derive(Debug, Deserialize)]
struct EchoReply {
    method: String,
    path: String,
    query: String,
    headers: BTreeMap<String, String>,
    body: String,
}

/// Start the mock server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn configuration(host: &str) -> Configuration {
    let mut config = Configuration::new();
    config.set_host(host);
    config
}

#[test]
fn get_round_trip_echoes_the_method() {
    let config = configuration(&start_server());
    let response = Request::get(&config, "/echo").call().unwrap();

    assert_eq!(response.response_info().http_code, 200);
    let reply: EchoReply = serde_json::from_str(response.response_body()).unwrap();
    assert_eq!(reply.method, "GET");
    assert_eq!(reply.path, "/echo");

    // The reconstructed header block starts with the status line.
    let status_line = response.response_headers().status_line().unwrap();
    assert!(status_line.contains("200"), "{status_line}");
}

#[test]
fn request_header_overrides_configuration_header() {
    let mut config = configuration(&start_server());
    config.add_header("X-Layer", "configuration").unwrap();

    let mut request = Request::get(&config, "echo");
    request.add_header("X-Layer", "request").unwrap();
    let response = request.call().unwrap();

    assert!(response
        .request_headers()
        .contains(&"X-Layer: request".to_string()));
    let reply: EchoReply = serde_json::from_str(response.response_body()).unwrap();
    assert_eq!(reply.headers.get("x-layer").map(String::as_str), Some("request"));
}

#[test]
fn query_data_is_appended_url_encoded() {
    let config = configuration(&start_server());
    let mut request = Request::get(&config, "echo");
    request.add_query_data("name", "value").unwrap();
    request.add_query_data("q", "a b").unwrap();
    let response = request.call().unwrap();

    assert!(response.request_url().ends_with("/echo?name=value&q=a+b"));
    let reply: EchoReply = serde_json::from_str(response.response_body()).unwrap();
    assert_eq!(reply.query, "name=value&q=a+b");
}

#[test]
fn post_body_is_form_encoded_by_default() {
    let config = configuration(&start_server());
    let mut request = Request::post(&config, "echo");
    request.add_post_data("name", "value").unwrap();
    request.add_post_data("other", "1").unwrap();
    let response = request.call().unwrap();

    assert_eq!(response.request_body(), "name=value&other=1");
    let reply: EchoReply = serde_json::from_str(response.response_body()).unwrap();
    assert_eq!(reply.method, "POST");
    assert_eq!(reply.body, "name=value&other=1");
}

#[test]
fn json_content_type_switches_body_encoding() {
    let config = configuration(&start_server());
    let mut request = Request::post(&config, "echo");
    request.add_header("Content-Type", "application/json").unwrap();
    request.add_post_data("name", "value").unwrap();
    let response = request.call().unwrap();

    assert_eq!(response.request_body(), r#"{"name":"value"}"#);
    let reply: EchoReply = serde_json::from_str(response.response_body()).unwrap();
    assert_eq!(reply.body, r#"{"name":"value"}"#);
    assert_eq!(
        reply.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn custom_verbs_reach_the_server() {
    let host = start_server();
    let config = configuration(&host);

    for (request, expected) in [
        (Request::delete(&config, "echo"), "DELETE"),
        (Request::options(&config, "echo"), "OPTIONS"),
        (Request::patch(&config, "echo"), "PATCH"),
        (Request::put(&config, "echo"), "PUT"),
    ] {
        let response = request.call().unwrap();
        let reply: EchoReply = serde_json::from_str(response.response_body()).unwrap();
        assert_eq!(reply.method, expected);
    }
}

#[test]
fn head_suppresses_the_response_body() {
    let config = configuration(&start_server());
    let response = Request::head(&config, "echo").call().unwrap();

    assert_eq!(response.response_info().http_code, 200);
    assert!(response.response_body().is_empty());
}

#[test]
fn http_failure_carries_the_populated_response() {
    let config = configuration(&start_server());
    let err = Request::get(&config, "/status/404").call().unwrap_err();

    match err {
        Error::Call { message, response } => {
            assert_eq!(message, "404");
            assert_eq!(response.response_info().http_code, 404);
            assert!(response.request_url().ends_with("/status/404"));
        }
        other => panic!("expected a call failure, got {other:?}"),
    }
}

#[test]
fn repeated_set_cookie_headers_collapse_to_a_sequence() {
    let config = configuration(&start_server());
    let response = Request::get(&config, "cookies").call().unwrap();

    assert_eq!(
        response.response_headers().get("set-cookie"),
        Some(&HeaderValue::Sequence(vec![
            "a=1".to_string(),
            "b=2".to_string()
        ]))
    );
}

#[test]
fn unreachable_host_reports_status_zero() {
    // Grab a port that is then released, so nothing listens there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = configuration(&format!("http://{addr}"));
    let err = Request::get(&config, "echo").call().unwrap_err();

    match err {
        Error::Call { message, response } => {
            assert!(message.contains("failed"), "{message}");
            assert_eq!(response.response_info().http_code, 0);
            assert!(response.response_body().is_empty());
        }
        other => panic!("expected a call failure, got {other:?}"),
    }
}
