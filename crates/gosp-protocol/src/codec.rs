//! Codec trait and the JSON implementation.
//!
//! A "codec" converts between Rust types and raw body bytes. The layers
//! above only talk to the [`Codec`] trait, so the wire format stays in one
//! place.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the result owns its
/// data, so the response buffer can be dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`), which is what the REPL
/// server speaks.
///
/// ## Example
///
/// ```rust
/// use gosp_protocol::{Codec, EvalRequest, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&EvalRequest { expr: "1+1".into() }).unwrap();
/// assert_eq!(bytes, br#"{"expr":"1+1"}"#);
///
/// let decoded: EvalRequest = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded.expr, "1+1");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
