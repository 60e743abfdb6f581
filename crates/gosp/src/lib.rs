//! # gosp
//!
//! Session client for a remote expression-evaluation ("REPL") service
//! with optional authentication and server-side history.
//!
//! The server does all the real work: it evaluates, issues credentials,
//! and stores history. This crate drives the requests, holds the session
//! credential in memory, and keeps a [`Screen`] describing what the user
//! should see.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gosp::prelude::*;
//!
//! # async fn run() -> Result<(), GospError> {
//! let mut client = ClientBuilder::new().build()?;
//! client.evaluate("1+1").await;
//! assert!(client.screen().output().starts_with("Result:"));
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod repl;
mod screen;

pub use client::{ClientBuilder, LOGGED_OUT_NOTICE, NOT_AUTHENTICATED_NOTICE, SessionClient};
pub use config::{ClientConfig, ConfigError};
pub use error::{ErrorCategory, GospError};
pub use repl::{Evaluation, ReplInvoker};
pub use screen::{RUNNING, Screen};

/// Everything a front-end usually needs.
pub mod prelude {
    pub use crate::{
        ClientBuilder, ClientConfig, ConfigError, ErrorCategory, Evaluation, GospError,
        LOGGED_OUT_NOTICE, NOT_AUTHENTICATED_NOTICE, RUNNING, ReplInvoker, Screen,
        SessionClient,
    };
    pub use gosp_history::{
        EMPTY_NOTICE, HistoryEntry, HistoryError, HistoryLog, HistoryRenderer,
        LOGIN_REQUIRED_NOTICE, Outcome,
    };
    pub use gosp_protocol::{Credentials, Routes};
    pub use gosp_session::{
        AuthManager, Credential, LogoutOutcome, REGISTERED_NOTICE, SessionContext,
        SessionError, SessionState,
    };
    pub use gosp_transport::{ReqwestTransport, Transport, TransportError};
}
