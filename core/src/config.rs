//! Connection-wide request defaults.
//!
//! # Design
//! `Configuration` is a plain data holder shared by reference across
//! requests. It provides no internal locking: sharing it across threads is
//! fine as long as nobody mutates it mid-flight, which is the caller's
//! responsibility.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::params::Params;

/// Proxy protocol selector. Defaults to `Http` when a proxy host is set
/// without an explicit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyType {
    Http,
    Socks4,
    Socks5,
}

impl ProxyType {
    pub(crate) fn scheme(self) -> &'static str {
        match self {
            ProxyType::Http => "http",
            ProxyType::Socks4 => "socks4",
            ProxyType::Socks5 => "socks5",
        }
    }
}

/// Connection-wide defaults applied to every call made with this
/// configuration: host, default headers, timeouts, proxy, TLS
/// verification, basic-auth credentials, debug/verbose sinks.
#[derive(Debug, Clone)]
pub struct Configuration {
    allow_encoding: bool,
    connect_timeout: u64,
    debug: bool,
    debug_file: Option<PathBuf>,
    headers: Params,
    host: String,
    http_password: Option<String>,
    http_username: Option<String>,
    proxy_host: Option<String>,
    proxy_password: Option<String>,
    proxy_port: Option<u16>,
    proxy_type: Option<ProxyType>,
    proxy_username: Option<String>,
    request_timeout: u64,
    ssl_verification: bool,
    user_agent: String,
    verbose: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            allow_encoding: false,
            connect_timeout: 0,
            debug: false,
            debug_file: None,
            headers: Params::new(),
            host: String::new(),
            http_password: None,
            http_username: None,
            proxy_host: None,
            proxy_password: None,
            proxy_port: None,
            proxy_type: None,
            proxy_username: None,
            request_timeout: 0,
            ssl_verification: true,
            user_agent: concat!("httpcall/", env!("CARGO_PKG_VERSION")).to_string(),
            verbose: false,
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Configuration::default()
    }

    /// Add (or overwrite) a default header sent with every call. Rejects
    /// invalid names with [`Error::InvalidArgument`], leaving the map
    /// unchanged.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        Params::validate_name(name, "header")?;
        self.headers.set(name, value);
        Ok(())
    }

    /// Remove a default header; no-op when absent.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.remove(name);
    }

    pub fn headers(&self) -> &Params {
        &self.headers
    }

    /// Whether compressed transfer encoding may be negotiated.
    pub fn allow_encoding(&self) -> bool {
        self.allow_encoding
    }

    pub fn set_allow_encoding(&mut self, allow_encoding: bool) {
        self.allow_encoding = allow_encoding;
    }

    /// Connect timeout in seconds; 0 means unset.
    pub fn connect_timeout(&self) -> u64 {
        self.connect_timeout
    }

    pub fn set_connect_timeout(&mut self, connect_timeout: u64) {
        self.connect_timeout = connect_timeout;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Enable the debug sink (request and response bodies, timestamped).
    /// Debug takes precedence over verbose.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Debug sink destination; `None` means process stdout.
    pub fn debug_file(&self) -> Option<&Path> {
        self.debug_file.as_deref()
    }

    pub fn set_debug_file(&mut self, debug_file: Option<PathBuf>) {
        self.debug_file = debug_file;
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Base URL every resource path is appended to. A trailing slash is
    /// trimmed so the join never doubles it.
    pub fn set_host(&mut self, host: &str) {
        self.host = host.trim_end_matches('/').to_string();
    }

    pub fn http_password(&self) -> Option<&str> {
        self.http_password.as_deref()
    }

    pub fn set_http_password(&mut self, http_password: Option<String>) {
        self.http_password = http_password;
    }

    pub fn http_username(&self) -> Option<&str> {
        self.http_username.as_deref()
    }

    pub fn set_http_username(&mut self, http_username: Option<String>) {
        self.http_username = http_username;
    }

    pub fn proxy_host(&self) -> Option<&str> {
        self.proxy_host.as_deref()
    }

    /// Proxy host; the other proxy settings apply independently once this
    /// is set.
    pub fn set_proxy_host(&mut self, proxy_host: Option<String>) {
        self.proxy_host = proxy_host;
    }

    pub fn proxy_password(&self) -> Option<&str> {
        self.proxy_password.as_deref()
    }

    pub fn set_proxy_password(&mut self, proxy_password: Option<String>) {
        self.proxy_password = proxy_password;
    }

    pub fn proxy_port(&self) -> Option<u16> {
        self.proxy_port
    }

    pub fn set_proxy_port(&mut self, proxy_port: Option<u16>) {
        self.proxy_port = proxy_port;
    }

    pub fn proxy_type(&self) -> Option<ProxyType> {
        self.proxy_type
    }

    pub fn set_proxy_type(&mut self, proxy_type: Option<ProxyType>) {
        self.proxy_type = proxy_type;
    }

    pub fn proxy_username(&self) -> Option<&str> {
        self.proxy_username.as_deref()
    }

    pub fn set_proxy_username(&mut self, proxy_username: Option<String>) {
        self.proxy_username = proxy_username;
    }

    /// Whole-request timeout in seconds; 0 means unset.
    pub fn request_timeout(&self) -> u64 {
        self.request_timeout
    }

    pub fn set_request_timeout(&mut self, request_timeout: u64) {
        self.request_timeout = request_timeout;
    }

    pub fn ssl_verification(&self) -> bool {
        self.ssl_verification
    }

    /// Disable only to skip host and peer TLS verification.
    pub fn set_ssl_verification(&mut self, ssl_verification: bool) {
        self.ssl_verification = ssl_verification;
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = user_agent.to_string();
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Enable transport-level trace output. Ignored while debug is on.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = Configuration::new();
        assert_eq!(config.connect_timeout(), 0);
        assert_eq!(config.request_timeout(), 0);
        assert!(!config.allow_encoding());
        assert!(config.ssl_verification());
        assert!(!config.debug());
        assert!(!config.verbose());
        assert!(config.debug_file().is_none());
        assert!(config.proxy_host().is_none());
        assert!(config.headers().is_empty());
        assert!(config.user_agent().starts_with("httpcall/"));
    }

    #[test]
    fn host_trailing_slash_is_trimmed() {
        let mut config = Configuration::new();
        config.set_host("http://example.test/");
        assert_eq!(config.host(), "http://example.test");
    }

    #[test]
    fn invalid_header_name_leaves_headers_unchanged() {
        let mut config = Configuration::new();
        config.add_header("Accept", "text/plain").unwrap();

        let err = config.add_header("", "v").unwrap_err();
        assert!(err.to_string().contains("\"\""));
        assert_eq!(config.headers().len(), 1);
    }

    #[test]
    fn remove_header_is_a_no_op_when_absent() {
        let mut config = Configuration::new();
        config.remove_header("missing");
        assert!(config.headers().is_empty());
    }
}
