//! `SessionClient` builder and the user-facing operations.
//!
//! This is the entry point for talking to a REPL server. It ties together
//! all the layers: transport → protocol → session → history, and keeps the
//! [`Screen`] in step with every outcome.

use std::sync::Arc;

use gosp_history::{
    EMPTY_NOTICE, HistoryEntry, HistoryError, HistoryRenderer, LOGIN_REQUIRED_NOTICE,
};
use gosp_protocol::Credentials;
use gosp_session::{AuthManager, LogoutOutcome, REGISTERED_NOTICE, SessionContext, SessionError};
use gosp_transport::{ReqwestTransport, Transport};

use crate::error::session_message;
use crate::repl::ReplInvoker;
use crate::screen::{RUNNING, Screen};
use crate::{ClientConfig, GospError};

/// Status line after logging out.
pub const LOGGED_OUT_NOTICE: &str = "Logged out.";

/// Status line after asking to log out without a session.
pub const NOT_AUTHENTICATED_NOTICE: &str = "Not authenticated.";

/// Builder for configuring a [`SessionClient`].
///
/// # Example
///
/// ```rust,no_run
/// use gosp::prelude::*;
///
/// # async fn run() -> Result<(), GospError> {
/// let mut client = ClientBuilder::new()
///     .base_url("http://localhost:8000")
///     .build()?;
/// client.login("alice", "secret").await?;
/// client.evaluate("(+ 1 2)").await;
/// println!("{}", client.screen().output());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the server base URL.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
        self
    }

    /// Builds a client backed by `reqwest`.
    pub fn build(self) -> Result<SessionClient<ReqwestTransport>, GospError> {
        let config = self.config.validated()?;
        let transport = match &config.user_agent {
            Some(agent) => ReqwestTransport::with_user_agent(&config.base_url, agent)?,
            None => ReqwestTransport::new(&config.base_url)?,
        };
        Ok(SessionClient::new(transport, config))
    }

    /// Builds a client over any [`Transport`]. The base URL is the
    /// transport's business; only the routes are used here.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> SessionClient<T> {
        SessionClient::new(transport, self.config)
    }
}

/// A session against one REPL server.
///
/// Owns the [`SessionContext`] (the credential) and the [`Screen`]. Each
/// operation awaits one request at most, catches every failure, and
/// records it on the screen; the `Result`s returned are for callers that
/// want to branch on the outcome too.
pub struct SessionClient<T: Transport> {
    session: SessionContext,
    screen: Screen,
    auth: AuthManager<T>,
    repl: ReplInvoker<T>,
    history: HistoryRenderer<T>,
}

impl<T: Transport> SessionClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let transport = Arc::new(transport);
        Self {
            session: SessionContext::new(),
            screen: Screen::default(),
            auth: AuthManager::new(Arc::clone(&transport), config.routes.clone()),
            repl: ReplInvoker::new(Arc::clone(&transport), config.routes.clone()),
            history: HistoryRenderer::new(transport, config.routes),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    // -- Auth ---------------------------------------------------------------

    /// Creates an account. Does not log in.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<(), GospError> {
        let result = self
            .auth
            .register(&Credentials::new(username, password))
            .await;
        match result {
            Ok(()) => {
                self.screen.status = REGISTERED_NOTICE.to_string();
                Ok(())
            }
            Err(e) => Err(self.auth_failed(e)),
        }
    }

    /// Logs in; empty username and password request an anonymous session.
    ///
    /// On success the REPL and history views become visible. On failure
    /// the credential is gone and the views are hidden.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), GospError> {
        let credentials = Credentials::new(username, password);
        let had_session = self.session.is_authenticated();
        let result = self.auth.login(&mut self.session, &credentials).await;
        match result {
            Ok(()) => {
                self.screen.status = if credentials.is_anonymous() {
                    "Logged in anonymously.".to_string()
                } else {
                    format!("Logged in as {username}.")
                };
                self.screen.authenticated_views_visible = true;
                self.screen.history_notice = None;
                Ok(())
            }
            Err(e) => {
                // A failed login ends a session that was held, but leaves
                // anonymous results alone.
                if had_session {
                    self.screen.tear_down();
                } else {
                    self.screen.authenticated_views_visible = false;
                }
                Err(self.auth_failed(e))
            }
        }
    }

    /// Logs out. Local state is cleared whatever the server says.
    ///
    /// Without a session only the status line changes.
    pub async fn logout(&mut self) -> LogoutOutcome {
        let outcome = self.auth.logout(&mut self.session).await;
        let status = match &outcome {
            LogoutOutcome::NotAuthenticated => None,
            LogoutOutcome::LoggedOut { message } => {
                Some(message.clone().unwrap_or_else(|| LOGGED_OUT_NOTICE.to_string()))
            }
            LogoutOutcome::LocalOnly { error } => {
                Some(format!("{LOGGED_OUT_NOTICE} ({})", session_message(error)))
            }
        };
        match status {
            Some(status) => {
                self.screen.status = status;
                self.screen.tear_down();
            }
            None => self.screen.status = NOT_AUTHENTICATED_NOTICE.to_string(),
        }
        outcome
    }

    fn auth_failed(&mut self, error: SessionError) -> GospError {
        let error = GospError::from(error);
        self.screen.status = error.user_message();
        error
    }

    // -- REPL ---------------------------------------------------------------

    /// Puts the [`RUNNING`] placeholder in the output panel for a
    /// non-blank `expression`, so a front-end can draw it before awaiting
    /// [`evaluate`](Self::evaluate). Returns `false` for blank input.
    pub fn start_evaluation(&mut self, expression: &str) -> bool {
        if expression.trim().is_empty() {
            return false;
        }
        self.screen.output = RUNNING.to_string();
        true
    }

    /// Evaluates `expression` and appends exactly one history entry.
    ///
    /// Blank input does nothing and returns `None`.
    pub async fn evaluate(&mut self, expression: &str) -> Option<&HistoryEntry> {
        if !self.start_evaluation(expression) {
            return None;
        }

        let evaluation = self.repl.evaluate(&self.session, expression).await?;
        self.screen.output = evaluation.outcome.text().to_string();
        Some(self.history.append_local(
            &mut self.screen.history,
            evaluation.command,
            evaluation.outcome,
        ))
    }

    // -- History ------------------------------------------------------------

    /// Replaces the history log with the server's copy.
    ///
    /// Without a credential the notice asks the user to log in and no
    /// request is sent.
    pub async fn load_history(&mut self) -> Result<usize, GospError> {
        let result = self
            .history
            .load_from_server(&self.session, &mut self.screen.history)
            .await;
        match result {
            Ok(count) => {
                self.screen.history_notice = (count == 0).then(|| EMPTY_NOTICE.to_string());
                Ok(count)
            }
            Err(HistoryError::NotAuthenticated) => {
                self.screen.history_notice = Some(LOGIN_REQUIRED_NOTICE.to_string());
                Err(HistoryError::NotAuthenticated.into())
            }
            Err(e) => {
                let error = GospError::from(e);
                self.screen.history_notice = Some(error.user_message());
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gosp_transport::MockTransport;

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let result = ClientBuilder::new().base_url("localhost:8000").build();
        assert!(matches!(result, Err(GospError::Config(_))));
    }

    #[test]
    fn test_builder_accepts_http_url() {
        let client = ClientBuilder::new().base_url("http://127.0.0.1:1/").build();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_blank_input_leaves_screen_alone() {
        let mut client = ClientBuilder::new().build_with_transport(MockTransport::new());
        assert!(client.evaluate("  ").await.is_none());
        assert_eq!(client.screen().output(), "");
        assert!(client.screen().history().is_empty());
    }

    #[test]
    fn test_start_evaluation_shows_placeholder_before_sending() {
        let mut client = ClientBuilder::new().build_with_transport(MockTransport::new());

        assert!(!client.start_evaluation(" \t"));
        assert_eq!(client.screen().output(), "");

        assert!(client.start_evaluation("1+1"));
        assert_eq!(client.screen().output(), RUNNING);
        assert!(client.screen().history().is_empty(), "nothing recorded yet");
    }

    #[tokio::test]
    async fn test_logout_with_server_message() {
        let mock = MockTransport::new();
        mock.push_json(200, r#"{"authKey":"k"}"#)
            .push_json(200, r#"{"message":"see you"}"#);
        let mut client = ClientBuilder::new().build_with_transport(mock);

        client.login("a", "b").await.unwrap();
        client.logout().await;

        assert_eq!(client.screen().status(), "see you");
    }

    #[tokio::test]
    async fn test_logout_server_failure_is_reported() {
        let mock = MockTransport::new();
        mock.push_json(200, r#"{"authKey":"k"}"#);
        // No second reply scripted: the logout call fails at transport level.
        let mut client = ClientBuilder::new().build_with_transport(mock);

        client.login("a", "b").await.unwrap();
        let outcome = client.logout().await;

        assert!(matches!(outcome, LogoutOutcome::LocalOnly { .. }));
        assert_eq!(
            client.screen().status(),
            "Logged out. (Fetch error: connection closed: no scripted response)"
        );
        assert!(!client.session().is_authenticated());
    }
}
