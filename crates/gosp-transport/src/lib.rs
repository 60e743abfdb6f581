//! Transport abstraction layer for the gosp client.
//!
//! Provides the [`Transport`] trait: one method that takes an
//! [`HttpRequest`] and yields an [`HttpResponse`]. Everything above this
//! crate talks to the REPL server through that trait, so the real HTTP
//! client can be swapped for a scripted one in tests.
//!
//! # Feature Flags
//!
//! - `http` (default): real HTTP transport via `reqwest`
//! - `mock`: [`MockTransport`], a scripted in-memory transport for tests

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::ReqwestTransport;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;

use std::fmt;
use std::sync::Arc;

/// Header carrying the bearer credential on authenticated requests.
pub const AUTHORIZATION: &str = "Authorization";

/// Header announcing a JSON request body.
pub const CONTENT_TYPE: &str = "Content-Type";

/// The HTTP methods the client uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// An outgoing request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path beginning with `/`, e.g. `/api/expr`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a `GET` request with no headers and no body.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a `POST` request with no headers and no body.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON body and the matching content type.
    pub fn json_body(mut self, body: Vec<u8>) -> Self {
        self.headers
            .push((CONTENT_TYPE.to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }

    /// Returns the first header value with the given name
    /// (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response received from the server, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with the given status and body, no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the first header value with the given name
    /// (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Sends requests to the REPL server.
///
/// One call, one round trip. Implementations must not retry and must not
/// impose their own timeout; a failure is reported once and the caller
/// decides what to show the user.
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and waits for the complete response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// A shared transport is a transport, so a caller can keep a handle (for
/// example to inspect a `MockTransport`) while a client owns another.
impl<T: Transport> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        T::send(self, request).await
    }
}
