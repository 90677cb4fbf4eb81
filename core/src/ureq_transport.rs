//! Bundled `ureq`-backed transport.
//!
//! # Design
//! One agent per call: every configuration knob (timeouts, proxy, TLS
//! verification, user agent) can differ between calls, so nothing is
//! cached between them. Non-2xx statuses come back as data
//! (`http_status_as_error(false)`) because status interpretation belongs
//! to the caller, not the transport. The response head is re-serialized
//! into a raw header block so the caller's header parsing sees exactly one
//! input shape regardless of transport.

use std::time::Instant;

use url::Url;

use crate::config::ProxyType;
use crate::response::TransportInfo;
use crate::transport::{ProxySettings, RawExchange, Transport, TransportCall, TransportError};

/// Blocking executor on top of `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        UreqTransport
    }

    fn build_agent(call: &TransportCall) -> Result<ureq::Agent, TransportError> {
        let mut config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .user_agent(call.user_agent.as_str());

        if let Some(timeout) = call.connect_timeout {
            config = config.timeout_connect(Some(timeout));
        }
        if let Some(timeout) = call.request_timeout {
            config = config.timeout_global(Some(timeout));
        }
        if let Some(settings) = &call.proxy {
            let uri = proxy_uri(settings)?;
            let proxy = ureq::Proxy::new(uri.as_str())
                .map_err(|err| TransportError(format!("invalid proxy: {err}")))?;
            config = config.proxy(Some(proxy));
        }
        if !call.verify_tls {
            config = config.tls_config(
                ureq::tls::TlsConfig::builder()
                    .disable_verification(true)
                    .build(),
            );
        }

        Ok(config.build().new_agent())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, call: &TransportCall) -> Result<RawExchange, TransportError> {
        let agent = Self::build_agent(call)?;
        let started = Instant::now();

        let mut request = ureq::http::Request::builder()
            .method(call.method.as_str())
            .uri(call.url.as_str());
        for line in &call.headers {
            let (name, value) = line.split_once(':').unwrap_or((line.as_str(), ""));
            request = request.header(name.trim(), value.trim());
        }
        // An explicit Accept-Encoding overrides ureq's automatic one, so
        // compression is negotiated only when the caller allowed it.
        if call.accept_compressed {
            request = request.header("Accept-Encoding", "gzip");
        } else {
            request = request.header("Accept-Encoding", "identity");
        }

        if call.verbose {
            trace_request(call);
        }

        let body: &[u8] = call.body.as_deref().map(str::as_bytes).unwrap_or(&[]);
        let request = request
            .body(body)
            .map_err(|err| TransportError(format!("invalid request: {err}")))?;

        let mut response = agent
            .run(request)
            .map_err(|err| TransportError(err.to_string()))?;

        let status = response.status();
        let version = response.version();
        let mut head = format!("{version:?} {status}\r\n");
        for (name, value) in response.headers() {
            head.push_str(name.as_str());
            head.push_str(": ");
            head.push_str(value.to_str().unwrap_or_default());
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        if call.verbose {
            trace_response(&head);
        }

        let content_type = response
            .headers()
            .get(ureq::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body_bytes = if call.suppress_body {
            Vec::new()
        } else {
            response
                .body_mut()
                .read_to_vec()
                .map_err(|err| TransportError(format!("failed reading response body: {err}")))?
        };

        let header_size = head.len();
        let size_download = body_bytes.len() as u64;
        let mut raw = head.into_bytes();
        raw.extend_from_slice(&body_bytes);

        Ok(RawExchange {
            raw,
            header_size,
            info: TransportInfo {
                http_code: status.as_u16(),
                url: call.url.clone(),
                content_type,
                header_size,
                total_time: started.elapsed(),
                size_download,
            },
        })
    }
}

/// Assemble the proxy URI from the independently-set pieces.
fn proxy_uri(settings: &ProxySettings) -> Result<Url, TransportError> {
    let scheme = settings.kind.unwrap_or(ProxyType::Http).scheme();
    let mut url = Url::parse(&format!("{scheme}://{}", settings.host)).map_err(|err| {
        TransportError(format!("invalid proxy host {:?}: {err}", settings.host))
    })?;
    if let Some(port) = settings.port {
        url.set_port(Some(port))
            .map_err(|()| TransportError(format!("invalid proxy port {port}")))?;
    }
    if let Some(username) = &settings.username {
        url.set_username(username)
            .map_err(|()| TransportError("invalid proxy username".to_string()))?;
        url.set_password(settings.password.as_deref())
            .map_err(|()| TransportError("invalid proxy password".to_string()))?;
    }
    Ok(url)
}

fn trace_request(call: &TransportCall) {
    eprintln!("> {} {}", call.method, call.url);
    for line in &call.headers {
        eprintln!("> {line}");
    }
    eprintln!(">");
}

fn trace_response(head: &str) {
    for line in head.lines() {
        eprintln!("< {line}");
    }
}
