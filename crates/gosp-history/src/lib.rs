//! History for the gosp client.
//!
//! Every evaluation leaves exactly one record behind. Records come from
//! two places: the client's own invocations (appended as they finish) and
//! the server's persisted history (loaded on demand, authenticated only).
//!
//! # Key types
//!
//! - [`HistoryEntry`]: one immutable (command, outcome, timestamp) record
//! - [`Outcome`]: success, evaluation error, or transport error
//! - [`HistoryLog`]: the ordered log, oldest first
//! - [`HistoryRenderer`]: `append_local` and `load_from_server`

mod entry;
mod error;
mod log;
mod renderer;

pub use entry::{HistoryEntry, Outcome, TIMESTAMP_FORMAT, format_timestamp};
pub use error::HistoryError;
pub use log::HistoryLog;
pub use renderer::{EMPTY_NOTICE, HistoryRenderer, LOGIN_REQUIRED_NOTICE};
