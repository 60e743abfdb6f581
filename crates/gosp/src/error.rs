//! Unified error type for the gosp client.

use gosp_history::HistoryError;
use gosp_protocol::ProtocolError;
use gosp_session::SessionError;
use gosp_transport::TransportError;

use crate::ConfigError;

/// How an error is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The server explained the failure; show its message verbatim.
    Api,
    /// No usable response; shown as `Fetch error: ...`.
    Transport,
    /// Bad local configuration, caught before any request.
    Config,
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum GospError {
    /// A transport-level error (connect, send, read).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, unexpected body).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A register/login/logout error.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A history load error.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// A configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GospError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Session(SessionError::Rejected { .. })
            | Self::History(HistoryError::Rejected { .. } | HistoryError::NotAuthenticated) => {
                ErrorCategory::Api
            }
            Self::Config(_) => ErrorCategory::Config,
            _ => ErrorCategory::Transport,
        }
    }

    /// The line shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => fetch_error(self),
            ErrorCategory::Api | ErrorCategory::Config => self.to_string(),
        }
    }
}

/// Renders a borrowed session error the way
/// [`GospError::user_message`] would.
pub(crate) fn session_message(error: &SessionError) -> String {
    match error {
        SessionError::Rejected { message, .. } => message.clone(),
        other => fetch_error(other),
    }
}

/// Formats a transport-category failure: `Fetch error: <cause>`.
pub(crate) fn fetch_error(cause: &dyn std::fmt::Display) -> String {
    format!("Fetch error: {cause}")
}
