//! Error types for the request façade.
//!
//! # Design
//! `Call` embeds the response because callers routinely inspect the status
//! code and body of a failed call. Transport-level failures (no response at
//! all) and HTTP-level failures (non-2xx status) share the same variant,
//! distinguished by the embedded response's `http_code` (0 for the former)
//! and by the message text.

use std::fmt;

use crate::response::Response;

/// Errors returned by configuration, request building and `call()`.
#[derive(Debug)]
pub enum Error {
    /// A header, query or body field name was rejected. The message quotes
    /// the offending value; the map it was destined for is unchanged.
    InvalidArgument(String),

    /// The method string is outside the supported enumeration.
    MethodNotAllowed(String),

    /// The call completed without a 2xx status, or the transport failed
    /// before any response arrived. Carries the populated response either
    /// way; on a pure transport failure its `http_code` is 0.
    Call {
        message: String,
        response: Box<Response>,
    },
}

impl Error {
    /// The response attached to a failed call, when this is a `Call` error.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Call { response, .. } => Some(response),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) => write!(f, "{message}"),
            Error::MethodNotAllowed(method) => {
                write!(f, "the method {method:?} is not allowed")
            }
            Error::Call { message, .. } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Error {}
