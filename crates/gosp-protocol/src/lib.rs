//! Wire protocol for the gosp REPL API.
//!
//! This crate defines the "language" the client and the REPL server speak:
//!
//! - **Types** ([`EvalRequest`], [`Credentials`], [`ApiError`],
//!   [`HistoryReply`], etc.): the JSON bodies that travel on the wire.
//! - **Routes** ([`Routes`], [`Endpoint`]): which path and method each
//!   call uses.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how bodies are converted
//!   to/from bytes.
//! - **Responses** ([`EvalResponse`], [`api_error`]): how a status code
//!   plus a body is classified.
//! - **Errors** ([`ProtocolError`]): what can go wrong doing the above.
//!
//! # Architecture
//!
//! ```text
//! Transport (HttpRequest/HttpResponse) → Protocol (typed bodies) → Session / History
//! ```
//!
//! There is exactly one contract: errors are `{message, loc?}`, the login
//! credential is the body field `authKey`, and history comes back under
//! the `history` key.

mod codec;
mod error;
mod response;
mod routes;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use response::{EvalResponse, api_error, bearer, render_value};
pub use routes::{Endpoint, Routes};
pub use types::{
    ApiError, Credentials, EvalRequest, HistoryItem, HistoryReply, LoginReply,
    SourceLocation, StatusReply,
};
