//! Request assembly and the single-shot `call()`.
//!
//! # Design
//! One `Request` borrows one [`Configuration`] and owns the per-call
//! header, query and body maps. `call()` performs exactly one blocking
//! round-trip through a [`Transport`] and classifies the outcome by status
//! code; there is no retry, no caching and no state shared between calls.
//! The original per-method request types collapse into factory
//! constructors selecting a [`Method`] value.

use std::str::FromStr;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::config::Configuration;
use crate::debug::DebugSink;
use crate::error::Error;
use crate::headers::parse_header_block;
use crate::method::Method;
use crate::params::Params;
use crate::response::Response;
use crate::transport::{
    ProxySettings, RawExchange, Transport, TransportCall, TransportError,
};
use crate::ureq_transport::UreqTransport;

const JSON_CONTENT_TYPE: &str = "application/json";

/// One HTTP request against a shared [`Configuration`].
#[derive(Debug, Clone)]
pub struct Request<'a> {
    configuration: &'a Configuration,
    method: Method,
    resource_path: String,
    headers: Params,
    query_data: Params,
    post_data: Params,
}

impl<'a> Request<'a> {
    pub fn new(configuration: &'a Configuration, method: Method, resource_path: &str) -> Self {
        Request {
            configuration,
            method,
            resource_path: strip_leading_slash(resource_path),
            headers: Params::new(),
            query_data: Params::new(),
            post_data: Params::new(),
        }
    }

    /// Build a request from a method name, rejecting anything outside the
    /// supported enumeration with [`Error::MethodNotAllowed`].
    pub fn with_method_name(
        configuration: &'a Configuration,
        method: &str,
        resource_path: &str,
    ) -> Result<Self, Error> {
        Ok(Request::new(
            configuration,
            Method::from_str(method)?,
            resource_path,
        ))
    }

    pub fn delete(configuration: &'a Configuration, resource_path: &str) -> Self {
        Request::new(configuration, Method::Delete, resource_path)
    }

    pub fn get(configuration: &'a Configuration, resource_path: &str) -> Self {
        Request::new(configuration, Method::Get, resource_path)
    }

    pub fn head(configuration: &'a Configuration, resource_path: &str) -> Self {
        Request::new(configuration, Method::Head, resource_path)
    }

    pub fn options(configuration: &'a Configuration, resource_path: &str) -> Self {
        Request::new(configuration, Method::Options, resource_path)
    }

    pub fn patch(configuration: &'a Configuration, resource_path: &str) -> Self {
        Request::new(configuration, Method::Patch, resource_path)
    }

    pub fn post(configuration: &'a Configuration, resource_path: &str) -> Self {
        Request::new(configuration, Method::Post, resource_path)
    }

    pub fn put(configuration: &'a Configuration, resource_path: &str) -> Self {
        Request::new(configuration, Method::Put, resource_path)
    }

    pub fn configuration(&self) -> &Configuration {
        self.configuration
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Resource path, always stored without a leading slash.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn set_resource_path(&mut self, resource_path: &str) {
        self.resource_path = strip_leading_slash(resource_path);
    }

    pub fn add_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        Params::validate_name(name, "header")?;
        self.headers.set(name, value);
        Ok(())
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.remove(name);
    }

    pub fn clear_headers(&mut self) {
        self.headers.clear();
    }

    pub fn headers(&self) -> &Params {
        &self.headers
    }

    pub fn add_query_data(&mut self, name: &str, value: &str) -> Result<(), Error> {
        Params::validate_name(name, "query data")?;
        self.query_data.set(name, value);
        Ok(())
    }

    pub fn remove_query_data(&mut self, name: &str) {
        self.query_data.remove(name);
    }

    pub fn clear_query_data(&mut self) {
        self.query_data.clear();
    }

    pub fn query_data(&self) -> &Params {
        &self.query_data
    }

    pub fn add_post_data(&mut self, name: &str, value: &str) -> Result<(), Error> {
        Params::validate_name(name, "post data")?;
        self.post_data.set(name, value);
        Ok(())
    }

    pub fn remove_post_data(&mut self, name: &str) {
        self.post_data.remove(name);
    }

    pub fn clear_post_data(&mut self) {
        self.post_data.clear();
    }

    pub fn post_data(&self) -> &Params {
        &self.post_data
    }

    /// Perform the call with the bundled [`UreqTransport`].
    pub fn call(&self) -> Result<Response, Error> {
        self.call_with(&UreqTransport::new())
    }

    /// Perform the call with an explicit transport.
    ///
    /// Exactly one round-trip is attempted. A status in [200, 299] returns
    /// the populated [`Response`]; anything else, including transport
    /// failures reported with status 0, returns [`Error::Call`] carrying
    /// the same response for inspection.
    pub fn call_with(&self, transport: &dyn Transport) -> Result<Response, Error> {
        let config = self.configuration;

        let mut merged = Params::merged(config.headers(), &self.headers);
        if let (Some(username), Some(password)) = (config.http_username(), config.http_password())
        {
            if merged.get("Authorization").is_none() {
                let token = BASE64.encode(format!("{username}:{password}"));
                merged.set("Authorization", &format!("Basic {token}"));
            }
        }
        let header_lines: Vec<String> = merged
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();

        let mut url = format!("{}/{}", config.host(), self.resource_path);
        if !self.query_data.is_empty() {
            url.push('?');
            url.push_str(&form_encode(&self.query_data));
        }

        let encoded_body = if json_body_requested(&merged) {
            json_encode(&self.post_data)
        } else {
            form_encode(&self.post_data)
        };

        let call = TransportCall {
            url: url.clone(),
            method: self.method,
            headers: header_lines.clone(),
            body: self
                .method
                .sends_body()
                .then(|| encoded_body.clone()),
            suppress_body: self.method == Method::Head,
            connect_timeout: nonzero_secs(config.connect_timeout()),
            request_timeout: nonzero_secs(config.request_timeout()),
            proxy: proxy_settings(config),
            verify_tls: config.ssl_verification(),
            accept_compressed: config.allow_encoding(),
            user_agent: config.user_agent().to_string(),
            // debug and verbose are mutually exclusive; debug wins
            verbose: config.verbose() && !config.debug(),
        };

        let sink = config
            .debug()
            .then(|| DebugSink::new(config.debug_file().map(|path| path.to_path_buf())));
        if let Some(sink) = &sink {
            sink.write_block(&url, "HTTP request body", &encoded_body);
        }

        tracing::debug!(method = %self.method, %url, "executing request");

        let (exchange, failure) = match transport.execute(&call) {
            Ok(exchange) => (exchange, None),
            Err(TransportError(message)) => (RawExchange::default(), Some(message)),
        };

        let split = exchange.header_size.min(exchange.raw.len());
        let (head, tail) = exchange.raw.split_at(split);
        let response_headers = parse_header_block(&String::from_utf8_lossy(head));
        let response_body = String::from_utf8_lossy(tail).into_owned();

        let mut info = exchange.info;
        if info.url.is_empty() {
            info.url = url.clone();
        }

        if let Some(sink) = &sink {
            sink.write_block(&url, "HTTP response body", &response_body);
        }

        let response = Response {
            request_url: url.clone(),
            request_headers: header_lines,
            request_body: encoded_body,
            response_body,
            response_headers,
            response_info: info,
        };

        let http_code = response.response_info.http_code;
        if (200..=299).contains(&http_code) {
            tracing::debug!(http_code, "call succeeded");
            return Ok(response);
        }

        let message = match (failure, http_code) {
            (Some(text), _) => format!("call to {url} failed: {text}"),
            (None, 0) => format!(
                "call to {url} failed for an unknown reason, possibly disconnected from the network"
            ),
            (None, code) => code.to_string(),
        };
        tracing::debug!(http_code, %message, "call failed");
        Err(Error::Call {
            message,
            response: Box::new(response),
        })
    }
}

fn strip_leading_slash(path: &str) -> String {
    path.strip_prefix('/').unwrap_or(path).to_string()
}

fn nonzero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn proxy_settings(config: &Configuration) -> Option<ProxySettings> {
    config.proxy_host().map(|host| ProxySettings {
        host: host.to_string(),
        port: config.proxy_port(),
        kind: config.proxy_type(),
        username: config.proxy_username().map(str::to_string),
        password: config.proxy_password().map(str::to_string),
    })
}

/// The body switches to JSON only on an explicit
/// `Content-Type: application/json` among the merged headers.
fn json_body_requested(merged: &Params) -> bool {
    merged.iter().any(|(name, value)| {
        name.eq_ignore_ascii_case("Content-Type")
            && value.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE)
    })
}

fn form_encode(params: &Params) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in params.iter() {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

/// JSON object of the body fields, in insertion order.
fn json_encode(params: &Params) -> String {
    let mut object = serde_json::Map::new();
    for (name, value) in params.iter() {
        object.insert(name.to_string(), serde_json::Value::String(value.to_string()));
    }
    serde_json::Value::Object(object).to_string()
}
