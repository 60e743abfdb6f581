//! Core protocol types for the REPL API's wire format.
//!
//! Every type here is a JSON body that travels between the client and the
//! REPL server. Requests are `Serialize`, responses are `Deserialize`;
//! a few are both so tests can build server replies from real values.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of an evaluation request: `{ "expr": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalRequest {
    pub expr: String,
}

/// Body of a register or login request.
///
/// The fields are forwarded untouched: the server trims and validates
/// them, and an empty pair is how the anonymous login is expressed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns `true` when both fields are empty.
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

// Manual Debug so passwords never reach a log line.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Errors reported by the server
// ---------------------------------------------------------------------------

/// Where in the submitted source an evaluation failed.
///
/// Rendered as `source:line:column`, e.g. `repl:1:2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub source: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// The server's error body: `{ "message": "...", "loc"?: {...} }`.
///
/// Every endpoint uses this shape on failure. Only the evaluation
/// endpoint fills in `loc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.loc {
            Some(loc) => write!(f, "{} (at {loc})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

// ---------------------------------------------------------------------------
// Success bodies
// ---------------------------------------------------------------------------

/// Successful login: the credential travels in the body as `authKey`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(rename = "authKey")]
    pub auth_key: String,
}

/// Informational body of register and logout: `{ "message"?: "..." }`.
///
/// Unknown fields (e.g. `status`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One persisted evaluation, as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// When the server recorded the evaluation (RFC 3339 on the wire).
    pub at: DateTime<Utc>,
    pub expr: String,
    pub result: String,
}

/// Body of the history endpoint: `{ "history": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryReply {
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_request_json_format() {
        let req = EvalRequest {
            expr: "1+1".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "expr": "1+1" }));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("alice", "hunter2");
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("alice"));
        assert!(!dbg.contains("hunter2"));
    }

    #[test]
    fn test_credentials_anonymous() {
        assert!(Credentials::new("", "").is_anonymous());
        assert!(!Credentials::new("a", "").is_anonymous());
    }

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation {
            source: "repl".into(),
            line: 1,
            column: 2,
        };
        assert_eq!(loc.to_string(), "repl:1:2");
    }

    #[test]
    fn test_api_error_without_loc() {
        let err: ApiError = serde_json::from_str(r#"{"message":"invalid credentials"}"#).unwrap();
        assert_eq!(err.loc, None);
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[test]
    fn test_api_error_with_loc() {
        let err: ApiError = serde_json::from_str(
            r#"{"message":"division by zero","loc":{"source":"repl","line":1,"column":2}}"#,
        )
        .unwrap();
        assert_eq!(err.to_string(), "division by zero (at repl:1:2)");
    }

    #[test]
    fn test_login_reply_reads_auth_key() {
        let reply: LoginReply =
            serde_json::from_str(r#"{"authKey":"k-123","status":"OK"}"#).unwrap();
        assert_eq!(reply.auth_key, "k-123");
    }

    #[test]
    fn test_status_reply_ignores_unknown_fields() {
        let reply: StatusReply = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert_eq!(reply.message, None);
    }

    #[test]
    fn test_history_reply_parses_rfc3339() {
        let reply: HistoryReply = serde_json::from_str(
            r#"{"history":[{"at":"2025-03-01T10:00:00Z","expr":"1+1","result":"2"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.history.len(), 1);
        assert_eq!(reply.history[0].expr, "1+1");
        assert_eq!(reply.history[0].at.to_rfc3339(), "2025-03-01T10:00:00+00:00");
    }
}
