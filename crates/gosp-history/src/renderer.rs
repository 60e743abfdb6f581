//! Feeding the history log: local results and server-persisted history.

use std::sync::Arc;

use gosp_protocol::{Codec, Endpoint, HistoryReply, JsonCodec, Routes, api_error};
use gosp_session::SessionContext;
use gosp_transport::Transport;

use crate::{HistoryEntry, HistoryError, HistoryLog, Outcome};

/// Notice shown instead of querying when no credential is held.
pub const LOGIN_REQUIRED_NOTICE: &str = "Please log in to view history.";

/// Notice shown when the server has no history for this user.
pub const EMPTY_NOTICE: &str = "No history yet.";

/// Keeps a [`HistoryLog`] up to date.
///
/// Reads the session's credential but never writes it.
pub struct HistoryRenderer<T: Transport, C: Codec = JsonCodec> {
    transport: Arc<T>,
    routes: Routes,
    codec: C,
}

impl<T: Transport> HistoryRenderer<T> {
    pub fn new(transport: Arc<T>, routes: Routes) -> Self {
        Self::with_codec(transport, routes, JsonCodec)
    }
}

impl<T: Transport, C: Codec> HistoryRenderer<T, C> {
    pub fn with_codec(transport: Arc<T>, routes: Routes, codec: C) -> Self {
        Self {
            transport,
            routes,
            codec,
        }
    }

    /// Records the outcome of a finished invocation. No network.
    pub fn append_local<'a>(
        &self,
        log: &'a mut HistoryLog,
        command: impl Into<String>,
        outcome: Outcome,
    ) -> &'a HistoryEntry {
        log.push(HistoryEntry::now(command, outcome))
    }

    /// Replaces `log` with the user's persisted history.
    ///
    /// Returns the number of entries loaded (possibly zero). On any error
    /// the log is left untouched.
    ///
    /// # Errors
    /// - [`HistoryError::NotAuthenticated`]: no credential; nothing sent
    /// - [`HistoryError::Rejected`]: the server refused (expired key...)
    /// - [`HistoryError::Transport`] / [`HistoryError::Protocol`]: no
    ///   usable response
    pub async fn load_from_server(
        &self,
        session: &SessionContext,
        log: &mut HistoryLog,
    ) -> Result<usize, HistoryError> {
        if !session.is_authenticated() {
            return Err(HistoryError::NotAuthenticated);
        }

        let request = session.authorize(self.routes.request(Endpoint::History));
        let resp = self.transport.send(request).await?;

        if !resp.is_success() {
            let err = match api_error(&resp, &self.codec) {
                Ok(api) => HistoryError::Rejected {
                    status: resp.status,
                    message: api.message,
                },
                Err(e) => HistoryError::Protocol(e),
            };
            tracing::warn!(status = resp.status, error = %err, "history load failed");
            return Err(err);
        }

        let reply: HistoryReply = self.codec.decode(&resp.body)?;
        let count = reply.history.len();
        log.replace(reply.history.into_iter().map(HistoryEntry::from).collect());
        tracing::debug!(count, "history loaded");
        Ok(count)
    }
}
