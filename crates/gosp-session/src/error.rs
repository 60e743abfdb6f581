//! Error types for the session layer.

use gosp_protocol::ProtocolError;
use gosp_transport::TransportError;

/// Errors that can occur while registering, logging in, or logging out.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The server refused the request and said why (bad credentials,
    /// duplicate username, expired key...). Displays the server's
    /// message verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response arrived but could not be understood.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl SessionError {
    /// Returns `true` if the server explained the failure itself, as
    /// opposed to a network or format problem.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
