//! Scripted in-memory transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{HttpRequest, HttpResponse, Transport, TransportError};

/// A [`Transport`] that replays queued responses and records every
/// request it was asked to send.
///
/// An empty queue answers with [`TransportError::ConnectionClosed`], so a
/// test that forgets to script a response sees a transport failure rather
/// than a hang.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and JSON body.
    pub fn push_json(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse::new(status, body.as_bytes().to_vec())))
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) -> &Self {
        self.push(Err(error))
    }

    /// Queues an arbitrary reply.
    pub fn push(&self, reply: Result<HttpResponse, TransportError>) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push_back(reply);
        self
    }

    /// Returns every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(request);
        self.replies
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::ConnectionClosed(
                    "no scripted response".into(),
                ))
            })
    }
}
