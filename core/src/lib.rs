//! Synchronous HTTP request façade over a pluggable blocking transport.
//!
//! # Overview
//! Assembles request options (method, headers, query and body data, proxy,
//! timeouts, TLS verification) into exactly one blocking round-trip and
//! wraps the raw result into a [`Response`]. The network I/O itself is
//! delegated to a [`Transport`]; the bundled [`UreqTransport`] does the
//! real thing, and tests script their own.
//!
//! # Design
//! - [`Configuration`] holds connection-wide defaults and is shared by
//!   reference across requests; callers must not mutate it mid-flight.
//! - [`Request`] owns the per-call data and merges it over the
//!   configuration (call-level wins) at `call()` time.
//! - Success is a status in [200, 299]; everything else, including
//!   transport-level failures reported with status 0, surfaces as
//!   [`Error::Call`] carrying the populated response.
//! - No retries, no caching, no concurrency machinery: one call, one
//!   round-trip, on the calling thread.

pub mod config;
mod debug;
pub mod error;
pub mod headers;
pub mod method;
pub mod params;
pub mod request;
pub mod response;
pub mod transport;
pub mod ureq_transport;

pub use config::{Configuration, ProxyType};
pub use error::Error;
pub use headers::{parse_header_block, HeaderValue, Headers};
pub use method::Method;
pub use params::Params;
pub use request::Request;
pub use response::{Response, TransportInfo};
pub use transport::{ProxySettings, RawExchange, Transport, TransportCall, TransportError};
pub use ureq_transport::UreqTransport;
