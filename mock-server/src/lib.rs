use std::collections::BTreeMap;

use axum::{
    extract::Path,
    http::{header::SET_COOKIE, HeaderMap, Method, StatusCode, Uri},
    response::{AppendHeaders, IntoResponse},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the `/echo` route reports back about the incoming request.
/// Header names are lowercased by the HTTP stack; repeated headers are
/// joined with `", "`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EchoReply {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/cookies", any(cookies))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, header_map: HeaderMap, body: String) -> Json<EchoReply> {
    let mut headers = BTreeMap::new();
    for (name, value) in &header_map {
        let value = value.to_str().unwrap_or_default().to_string();
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    Json(EchoReply {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers,
        body,
    })
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn cookies() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, "a=1"), (SET_COOKIE, "b=2")]),
        "ok",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_reply_round_trips_through_json() {
        let reply = EchoReply {
            method: "GET".to_string(),
            path: "/echo".to_string(),
            query: "name=value".to_string(),
            headers: BTreeMap::from([("accept".to_string(), "*/*".to_string())]),
            body: String::new(),
        };

        let json = serde_json::to_string(&reply).unwrap();
        let back: EchoReply = serde_json::from_str(&json).unwrap();
        assert_eq!(back.method, reply.method);
        assert_eq!(back.query, reply.query);
        assert_eq!(back.headers, reply.headers);
    }

    #[test]
    fn echo_reply_exposes_the_method_field() {
        let json = r#"{"method":"POST","path":"/echo","query":"","headers":{},"body":""}"#;
        let reply: EchoReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.method, "POST");
    }
}
