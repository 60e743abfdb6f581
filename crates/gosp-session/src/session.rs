//! Session types: the client's record of who it is talking as.
//!
//! A "session" here is one process's view of its login:
//! - WHAT credential it holds (at most one, in memory only)
//! - WHICH state it is in (unauthenticated, logging in, authenticated)
//!
//! Only [`AuthManager`](crate::AuthManager) writes to a
//! [`SessionContext`]; the evaluation and history paths borrow it
//! read-only to decorate their requests.

use std::fmt;

use gosp_protocol::bearer;
use gosp_transport::{AUTHORIZATION, HttpRequest};

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// The opaque bearer token issued by the server at login (`authKey`).
///
/// Never persisted, never logged: `Debug` and `Display` print a redacted
/// placeholder. Use [`as_str`](Self::as_str) when the raw value is needed
/// for a header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Where the session is in its login lifecycle.
///
/// ```text
///   Unauthenticated ──(login)──→ Authenticating ──(ok)──→ Authenticated
///         ↑                            │                        │
///         └──────────(failed)──────────┘                        │
///         └──────────────────────(logout)───────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,

    /// A login request is in flight.
    Authenticating,

    /// A credential is held.
    Authenticated,
}

impl SessionState {
    /// Returns `true` if the REPL and history views should be shown.
    pub fn shows_authenticated_views(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Unauthenticated"),
            Self::Authenticating => write!(f, "Authenticating"),
            Self::Authenticated => write!(f, "Authenticated"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionContext
// ---------------------------------------------------------------------------

/// The one piece of shared session state: an optional credential plus the
/// lifecycle state.
///
/// Passed explicitly to every call that may need to authenticate: `&self`
/// for readers, `&mut self` (through [`AuthManager`](crate::AuthManager))
/// for the writer. Holding the credential in an `Option` makes "at most
/// one credential" a property of the type.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    credential: Option<Credential>,
    state: SessionState,
}

impl SessionContext {
    /// Creates an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` if a credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Adds `Authorization: Bearer <key>` to `request` if a credential is
    /// held; returns it unchanged otherwise.
    pub fn authorize(&self, request: HttpRequest) -> HttpRequest {
        match &self.credential {
            Some(credential) => request.header(AUTHORIZATION, bearer(credential.as_str())),
            None => request,
        }
    }

    pub(crate) fn begin_login(&mut self) {
        self.credential = None;
        self.state = SessionState::Authenticating;
    }

    pub(crate) fn establish(&mut self, credential: Credential) {
        self.credential = Some(credential);
        self.state = SessionState::Authenticated;
    }

    pub(crate) fn clear(&mut self) {
        self.credential = None;
        self.state = SessionState::Unauthenticated;
    }
}
