//! Submitting expressions to the evaluation endpoint.

use std::sync::Arc;

use gosp_history::Outcome;
use gosp_protocol::{Codec, Endpoint, EvalRequest, EvalResponse, JsonCodec, Routes, render_value};
use gosp_session::SessionContext;
use gosp_transport::Transport;

use crate::error::fetch_error;

/// One finished invocation: the trimmed command and what came of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub command: String,
    pub outcome: Outcome,
}

/// Sends expressions to the server and turns each reply into an
/// [`Outcome`].
pub struct ReplInvoker<T: Transport, C: Codec = JsonCodec> {
    transport: Arc<T>,
    routes: Routes,
    codec: C,
}

impl<T: Transport> ReplInvoker<T> {
    pub fn new(transport: Arc<T>, routes: Routes) -> Self {
        Self::with_codec(transport, routes, JsonCodec)
    }
}

impl<T: Transport, C: Codec> ReplInvoker<T, C> {
    pub fn with_codec(transport: Arc<T>, routes: Routes, codec: C) -> Self {
        Self {
            transport,
            routes,
            codec,
        }
    }

    /// Evaluates `expression`.
    ///
    /// Returns `None` without sending anything when the trimmed input is
    /// empty. Otherwise always returns exactly one [`Evaluation`]; a
    /// failure of any kind becomes its outcome rather than an `Err`.
    pub async fn evaluate(&self, session: &SessionContext, expression: &str) -> Option<Evaluation> {
        let command = expression.trim();
        if command.is_empty() {
            return None;
        }

        let outcome = self.invoke(session, command).await;
        match &outcome {
            Outcome::Success(_) => tracing::debug!(%command, "evaluated"),
            Outcome::EvaluationError(text) => {
                tracing::debug!(%command, %text, "evaluation failed");
            }
            Outcome::TransportError(text) => {
                tracing::warn!(%command, %text, "evaluation request failed");
            }
        }

        Some(Evaluation {
            command: command.to_string(),
            outcome,
        })
    }

    async fn invoke(&self, session: &SessionContext, command: &str) -> Outcome {
        let body = match self.codec.encode(&EvalRequest {
            expr: command.to_string(),
        }) {
            Ok(body) => body,
            Err(e) => return Outcome::TransportError(fetch_error(&e)),
        };
        let request = session.authorize(self.routes.request(Endpoint::Eval).json_body(body));

        let resp = match self.transport.send(request).await {
            Ok(resp) => resp,
            Err(e) => return Outcome::TransportError(fetch_error(&e)),
        };

        match EvalResponse::from_response(&resp, &self.codec) {
            Ok(EvalResponse::Value(value)) => Outcome::result(render_value(&value)),
            Ok(EvalResponse::Failure(err)) => Outcome::EvaluationError(format!("Error: {err}")),
            Err(e) => Outcome::TransportError(fetch_error(&e)),
        }
    }
}
