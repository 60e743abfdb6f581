//! Error types for the protocol layer.
//!
//! A `ProtocolError` means a body could not be turned into (or built from)
//! the expected wire type. It says nothing about networking.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: an HTML error page instead of JSON, missing required
    /// fields, or a truncated body.
    #[error("malformed response: {0}")]
    Decode(serde_json::Error),

    /// The body parsed but does not fit the contract, e.g. a 2xx
    /// evaluation reply with neither `result` nor `message`.
    #[error("unexpected response: {0}")]
    InvalidMessage(String),

    /// A non-2xx response whose body carried no usable `message`.
    #[error("server error: {0}")]
    Status(u16),
}
