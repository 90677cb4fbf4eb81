//! The blocking transport boundary.
//!
//! # Design
//! `call()` assembles a [`TransportCall`] as plain owned data and hands it
//! to a [`Transport`], which performs exactly one blocking round-trip and
//! returns the raw bytes it read plus the reported header size. Keeping
//! both sides plain data lets the request pipeline run without a network
//! (scripted transports in tests) while the bundled `UreqTransport` does
//! the real I/O.

use std::fmt;
use std::time::Duration;

use crate::config::ProxyType;
use crate::method::Method;
use crate::response::TransportInfo;

/// Proxy settings resolved from the configuration. Each piece is applied
/// independently; only the host is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub host: String,
    pub port: Option<u16>,
    pub kind: Option<ProxyType>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// One fully-assembled blocking call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportCall {
    /// Target URL, query string included.
    pub url: String,
    pub method: Method,
    /// Serialized `"Name: Value"` lines, configuration and call merged.
    pub headers: Vec<String>,
    /// Encoded request body; `None` for methods that send none.
    pub body: Option<String>,
    /// Do not read a response body (HEAD).
    pub suppress_body: bool,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub proxy: Option<ProxySettings>,
    pub verify_tls: bool,
    pub accept_compressed: bool,
    pub user_agent: String,
    /// Emit transport-level trace output for this call.
    pub verbose: bool,
}

/// Raw result of one executed call: header block and body concatenated,
/// with the split point reported by the transport.
#[derive(Debug, Clone, Default)]
pub struct RawExchange {
    pub raw: Vec<u8>,
    /// Size in bytes of the header block at the start of `raw`.
    pub header_size: usize,
    pub info: TransportInfo,
}

/// Transport-level failure: the call never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

/// A blocking HTTP executor.
pub trait Transport {
    /// Perform exactly one blocking round-trip. Implementations never
    /// retry; a non-2xx status is a normal result, not an error.
    fn execute(&self, call: &TransportCall) -> Result<RawExchange, TransportError>;
}
