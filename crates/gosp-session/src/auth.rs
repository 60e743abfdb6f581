//! Register, login, and logout against the REPL server.
//!
//! The server owns accounts and issues credentials; this module only
//! drives the three flows and keeps the [`SessionContext`] in step with
//! what the server said.

use std::sync::Arc;

use gosp_protocol::{
    Codec, Credentials, Endpoint, JsonCodec, LoginReply, Routes, StatusReply,
    api_error,
};
use gosp_transport::{HttpResponse, Transport};

use crate::{Credential, SessionContext, SessionError};

/// Status line shown after a successful registration.
pub const REGISTERED_NOTICE: &str = "Registered, please log in.";

/// What happened when the user asked to log out.
#[derive(Debug)]
pub enum LogoutOutcome {
    /// No credential was held; nothing was sent.
    NotAuthenticated,

    /// The server acknowledged the logout.
    LoggedOut { message: Option<String> },

    /// The server call failed. Local state was cleared anyway.
    LocalOnly { error: SessionError },
}

/// Drives the authentication flows and is the only writer of a
/// [`SessionContext`].
///
/// Generic over the [`Transport`] so tests can script the server, and
/// over the [`Codec`] for symmetry with the rest of the stack.
pub struct AuthManager<T: Transport, C: Codec = JsonCodec> {
    transport: Arc<T>,
    routes: Routes,
    codec: C,
}

impl<T: Transport> AuthManager<T> {
    /// Creates a manager speaking JSON.
    pub fn new(transport: Arc<T>, routes: Routes) -> Self {
        Self::with_codec(transport, routes, JsonCodec)
    }
}

impl<T: Transport, C: Codec> AuthManager<T, C> {
    pub fn with_codec(transport: Arc<T>, routes: Routes, codec: C) -> Self {
        Self {
            transport,
            routes,
            codec,
        }
    }

    /// Creates an account. Never touches the session: the user still has
    /// to log in afterwards.
    ///
    /// # Errors
    /// - [`SessionError::Rejected`]: the server refused (e.g. duplicate
    ///   username); the message is the server's, verbatim
    /// - [`SessionError::Transport`] / [`SessionError::Protocol`]: no
    ///   usable response
    pub async fn register(&self, credentials: &Credentials) -> Result<(), SessionError> {
        let resp = self.post_credentials(Endpoint::Register, credentials).await?;
        if resp.is_success() {
            tracing::info!(username = %credentials.username, "registered");
            return Ok(());
        }
        Err(self.rejection(&resp))
    }

    /// Logs in and stores the returned credential in `session`.
    ///
    /// The session is `Authenticating` while the request is in flight.
    /// Any failure leaves it `Unauthenticated` with no credential, even if
    /// one was held before. Empty username and password are sent as-is:
    /// whether anonymous login is allowed is the server's call.
    ///
    /// # Errors
    /// - [`SessionError::Rejected`]: bad credentials and the like
    /// - [`SessionError::Protocol`]: a 2xx reply without `authKey`
    /// - [`SessionError::Transport`]: no response at all
    pub async fn login(
        &self,
        session: &mut SessionContext,
        credentials: &Credentials,
    ) -> Result<(), SessionError> {
        session.begin_login();

        let result = self.try_login(credentials).await;
        match result {
            Ok(credential) => {
                session.establish(credential);
                tracing::info!(
                    username = %credentials.username,
                    anonymous = credentials.is_anonymous(),
                    "logged in"
                );
                Ok(())
            }
            Err(e) => {
                session.clear();
                tracing::warn!(error = %e, "login failed");
                Err(e)
            }
        }
    }

    async fn try_login(&self, credentials: &Credentials) -> Result<Credential, SessionError> {
        let resp = self.post_credentials(Endpoint::Login, credentials).await?;
        if !resp.is_success() {
            return Err(self.rejection(&resp));
        }
        let reply: LoginReply = self.codec.decode(&resp.body)?;
        Ok(Credential::new(reply.auth_key))
    }

    /// Logs out.
    ///
    /// Without a credential this is a local no-op and no request is made.
    /// With one, the server is told first; then local state is cleared no
    /// matter how that call went.
    pub async fn logout(&self, session: &mut SessionContext) -> LogoutOutcome {
        if !session.is_authenticated() {
            session.clear();
            return LogoutOutcome::NotAuthenticated;
        }

        let request = session.authorize(self.routes.request(Endpoint::Logout));
        let result = self.transport.send(request).await;
        session.clear();

        let outcome = match result {
            Ok(resp) if resp.is_success() => LogoutOutcome::LoggedOut {
                message: self
                    .codec
                    .decode::<StatusReply>(&resp.body)
                    .ok()
                    .and_then(|r| r.message),
            },
            Ok(resp) => LogoutOutcome::LocalOnly {
                error: self.rejection(&resp),
            },
            Err(e) => LogoutOutcome::LocalOnly { error: e.into() },
        };

        match &outcome {
            LogoutOutcome::LocalOnly { error } => {
                tracing::warn!(%error, "server logout failed, cleared locally");
            }
            _ => tracing::info!("logged out"),
        }
        outcome
    }

    async fn post_credentials(
        &self,
        endpoint: Endpoint,
        credentials: &Credentials,
    ) -> Result<HttpResponse, SessionError> {
        let body = self.codec.encode(credentials)?;
        let request = self.routes.request(endpoint).json_body(body);
        tracing::debug!(%endpoint, "sending credentials");
        Ok(self.transport.send(request).await?)
    }

    fn rejection(&self, resp: &HttpResponse) -> SessionError {
        match api_error(resp, &self.codec) {
            Ok(err) => SessionError::Rejected {
                status: resp.status,
                message: err.message,
            },
            Err(e) => SessionError::Protocol(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionState;
    use gosp_protocol::ProtocolError;
    use gosp_transport::{MockTransport, TransportError};

    fn manager() -> (Arc<MockTransport>, AuthManager<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let auth = AuthManager::new(Arc::clone(&mock), Routes::default());
        (mock, auth)
    }

    async fn logged_in(
        auth: &AuthManager<MockTransport>,
        mock: &MockTransport,
        key: &str,
    ) -> SessionContext {
        mock.push_json(200, &format!(r#"{{"authKey":"{key}"}}"#));
        let mut session = SessionContext::new();
        auth.login(&mut session, &Credentials::new("a", "pw"))
            .await
            .expect("login should succeed");
        session
    }

    // -- register ---------------------------------------------------------

    #[tokio::test]
    async fn test_register_success_sends_credentials() {
        let (mock, auth) = manager();
        mock.push_json(200, r#"{"status":"OK"}"#);

        auth.register(&Credentials::new("alice", "pw")).await.unwrap();

        let reqs = mock.requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].path, "/api/register");
        let body = String::from_utf8(reqs[0].body.clone().unwrap()).unwrap();
        assert_eq!(body, r#"{"username":"alice","password":"pw"}"#);
    }

    #[tokio::test]
    async fn test_register_conflict_surfaces_message_verbatim() {
        let (mock, auth) = manager();
        mock.push_json(409, r#"{"message":"username already exists"}"#);

        let err = auth
            .register(&Credentials::new("alice", "pw"))
            .await
            .unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "username already exists");
    }

    // -- login ------------------------------------------------------------

    #[tokio::test]
    async fn test_login_success_stores_credential() {
        let (mock, auth) = manager();
        let session = logged_in(&auth, &mock, "key-1").await;

        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.credential().map(Credential::as_str), Some("key-1"));
    }

    #[tokio::test]
    async fn test_login_wrong_password_leaves_credential_unset() {
        let (mock, auth) = manager();
        mock.push_json(401, r#"{"message":"invalid credentials"}"#);
        let mut session = SessionContext::new();

        let err = auth
            .login(&mut session, &Credentials::new("a", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid credentials");
        assert!(!session.is_authenticated());
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_failed_login_clears_previous_credential() {
        let (mock, auth) = manager();
        let mut session = logged_in(&auth, &mock, "old").await;
        mock.push_error(TransportError::ConnectionClosed("reset".into()));

        let err = auth
            .login(&mut session, &Credentials::new("a", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Transport(_)));
        assert!(session.credential().is_none());
    }

    #[tokio::test]
    async fn test_login_success_without_auth_key_is_malformed() {
        let (mock, auth) = manager();
        mock.push_json(200, r#"{"status":"OK"}"#);
        let mut session = SessionContext::new();

        let err = auth
            .login(&mut session, &Credentials::new("a", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Protocol(ProtocolError::Decode(_))));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_anonymous_login_forwards_empty_fields() {
        let (mock, auth) = manager();
        mock.push_json(200, r#"{"authKey":"anon"}"#);
        let mut session = SessionContext::new();

        auth.login(&mut session, &Credentials::new("", ""))
            .await
            .unwrap();

        assert!(session.is_authenticated());
        let body = String::from_utf8(mock.requests()[0].body.clone().unwrap()).unwrap();
        assert_eq!(body, r#"{"username":"","password":""}"#);
    }

    #[tokio::test]
    async fn test_login_error_page_reports_status() {
        let (mock, auth) = manager();
        mock.push_json(500, "Internal Server Error");
        let mut session = SessionContext::new();

        let err = auth
            .login(&mut session, &Credentials::new("a", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Protocol(ProtocolError::Status(500))));
    }

    // -- logout -----------------------------------------------------------

    #[tokio::test]
    async fn test_logout_without_credential_sends_nothing() {
        let (mock, auth) = manager();
        let mut session = SessionContext::new();

        let outcome = auth.logout(&mut session).await;

        assert!(matches!(outcome, LogoutOutcome::NotAuthenticated));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_sends_bearer_and_clears() {
        let (mock, auth) = manager();
        let mut session = logged_in(&auth, &mock, "key-9").await;
        mock.push_json(200, r#"{"message":"bye"}"#);

        let outcome = auth.logout(&mut session).await;

        match outcome {
            LogoutOutcome::LoggedOut { message } => {
                assert_eq!(message.as_deref(), Some("bye"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let req = &mock.requests()[1];
        assert_eq!(req.path, "/api/logout");
        assert_eq!(req.header_value("authorization"), Some("Bearer key-9"));
        assert!(!session.is_authenticated());
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_call_fails() {
        let (mock, auth) = manager();
        let mut session = logged_in(&auth, &mock, "key-2").await;
        mock.push_error(TransportError::ConnectionClosed("down".into()));

        let outcome = auth.logout(&mut session).await;

        assert!(matches!(outcome, LogoutOutcome::LocalOnly { .. }));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_rejected_by_server_still_clears() {
        let (mock, auth) = manager();
        let mut session = logged_in(&auth, &mock, "key-3").await;
        mock.push_json(401, r#"{"message":"invalid or expired authKey"}"#);

        let outcome = auth.logout(&mut session).await;

        match outcome {
            LogoutOutcome::LocalOnly { error } => {
                assert_eq!(error.to_string(), "invalid or expired authKey");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(session.credential().is_none());
    }
}
