/// Errors that can occur in the transport layer.
///
/// Anything in here means the request never produced a usable HTTP
/// response. Non-2xx statuses are NOT transport errors: they come back as
/// an ordinary [`HttpResponse`](crate::HttpResponse) for the layers above
/// to interpret.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client failed (DNS, connect, TLS, reading the body...).
    #[cfg(feature = "http")]
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be built (bad base URL, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The peer went away before a response was received.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),
}
