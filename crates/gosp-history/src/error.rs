//! Error types for the history layer.

use gosp_protocol::ProtocolError;
use gosp_transport::TransportError;

/// Errors that can occur while loading persisted history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// No credential is held, so there is no history to ask for.
    /// Reported before any request is made.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The server refused and said why. Displays the message verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response arrived but could not be understood.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
