//! Session management for the gosp client.
//!
//! This crate owns the client's login:
//!
//! 1. **Credential**: the opaque bearer token the server issues
//!    ([`Credential`]), held in memory only
//! 2. **Session tracking**: one [`SessionContext`] per process, with its
//!    [`SessionState`]
//! 3. **Flows**: register, login, and logout ([`AuthManager`])
//!
//! # How it fits in the stack
//!
//! ```text
//! REPL / History (above)  ← borrow the SessionContext to authorize requests
//!     ↕
//! Session Layer (this crate)  ← the only writer of the credential
//!     ↕
//! Protocol + Transport (below)  ← wire types and the HTTP round trip
//! ```

mod auth;
mod error;
mod session;

pub use auth::{AuthManager, LogoutOutcome, REGISTERED_NOTICE};
pub use error::SessionError;
pub use session::{Credential, SessionContext, SessionState};
