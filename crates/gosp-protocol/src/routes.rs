//! Endpoint table: which path and method each API call uses.

use std::fmt;

use gosp_transport::{HttpRequest, Method};
use serde::{Deserialize, Serialize};

/// The five calls the client makes against the REPL server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Eval,
    Register,
    Login,
    Logout,
    History,
}

impl Endpoint {
    /// The HTTP method this endpoint expects. Only history is a `GET`.
    pub fn method(self) -> Method {
        match self {
            Self::History => Method::Get,
            Self::Eval | Self::Register | Self::Login | Self::Logout => Method::Post,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eval => write!(f, "eval"),
            Self::Register => write!(f, "register"),
            Self::Login => write!(f, "login"),
            Self::Logout => write!(f, "logout"),
            Self::History => write!(f, "history"),
        }
    }
}

/// Paths of each endpoint, relative to the server's base URL.
///
/// Paths are configurable; body shapes are not. Missing keys in a config
/// file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub eval: String,
    pub register: String,
    pub login: String,
    pub logout: String,
    pub history: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            eval: "/api/expr".to_string(),
            register: "/api/register".to_string(),
            login: "/api/login".to_string(),
            logout: "/api/logout".to_string(),
            history: "/api/history".to_string(),
        }
    }
}

impl Routes {
    /// Returns the configured path for `endpoint`.
    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Eval => &self.eval,
            Endpoint::Register => &self.register,
            Endpoint::Login => &self.login,
            Endpoint::Logout => &self.logout,
            Endpoint::History => &self.history,
        }
    }

    /// Builds an empty request (right method, right path) for `endpoint`.
    pub fn request(&self, endpoint: Endpoint) -> HttpRequest {
        let path = self.path(endpoint);
        match endpoint.method() {
            Method::Get => HttpRequest::get(path),
            Method::Post => HttpRequest::post(path),
        }
    }
}
