//! Completed-call response record.

use std::time::Duration;

use crate::headers::Headers;

/// Transport diagnostics for one executed call.
///
/// `http_code` is 0 when the transport failed before any response arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportInfo {
    pub http_code: u16,
    /// URL the call was issued against.
    pub url: String,
    pub content_type: Option<String>,
    /// Size in bytes of the raw header block.
    pub header_size: usize,
    pub total_time: Duration,
    /// Size in bytes of the response body as read from the transport.
    pub size_download: u64,
}

/// Everything captured about one completed call: the request as it went
/// out, the response as it came back, and the transport diagnostics.
///
/// Constructed by `call()` and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Response {
    pub(crate) request_url: String,
    pub(crate) request_headers: Vec<String>,
    pub(crate) request_body: String,
    pub(crate) response_body: String,
    pub(crate) response_headers: Headers,
    pub(crate) response_info: TransportInfo,
}

impl Response {
    /// Final request URL, query string included.
    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    /// The merged headers as serialized `"Name: Value"` lines.
    pub fn request_headers(&self) -> &[String] {
        &self.request_headers
    }

    /// The encoded request body as handed to the transport.
    pub fn request_body(&self) -> &str {
        &self.request_body
    }

    /// Response body as text (lossy UTF-8); `size_download` in
    /// [`TransportInfo`] preserves the exact byte count.
    pub fn response_body(&self) -> &str {
        &self.response_body
    }

    pub fn response_headers(&self) -> &Headers {
        &self.response_headers
    }

    pub fn response_info(&self) -> &TransportInfo {
        &self.response_info
    }
}
