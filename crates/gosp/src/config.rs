//! Client configuration.

use std::path::{Path, PathBuf};

use gosp_protocol::Routes;
use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
}

/// Where the REPL server lives and how to reach each endpoint.
///
/// Every field has a default, so a config file only needs the keys it
/// wants to change:
///
/// ```toml
/// base_url = "https://repl.example.com"
///
/// [routes]
/// eval = "/api/v2/expr"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server base URL, without a trailing `/`.
    pub base_url: String,

    /// Endpoint paths relative to `base_url`.
    pub routes: Routes,

    /// `User-Agent` header; the crate name and version when unset.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            routes: Routes::default(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validated()
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), base_url = %config.base_url, "config loaded");
        Ok(config)
    }

    /// Returns a copy pointing at another server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Checks the base URL scheme and trims any trailing `/`.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.routes, Routes::default());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://repl.example.com/"

            [routes]
            eval = "/v2/expr"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://repl.example.com");
        assert_eq!(config.routes.eval, "/v2/expr");
        assert_eq!(config.routes.login, "/api/login");
    }

    #[test]
    fn test_bad_scheme_rejected() {
        let err = ClientConfig::from_toml_str(r#"base_url = "ftp://x""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = ClientConfig::from_toml_str("base_url = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ClientConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_with_base_url() {
        let config = ClientConfig::default()
            .with_base_url("http://10.0.0.1:9000/")
            .validated()
            .unwrap();
        assert_eq!(config.base_url, "http://10.0.0.1:9000");
    }
}
