//! HTTP transport implementation using `reqwest`.

use crate::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// A `reqwest`-backed [`Transport`] bound to one server base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport for the given base URL
    /// (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_user_agent(base_url, concat!("gosp/", env!("CARGO_PKG_VERSION")))
    }

    /// Same as [`new`](Self::new), with a custom `User-Agent`.
    pub fn with_user_agent(base_url: &str, user_agent: &str) -> Result<Self, TransportError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::InvalidRequest(format!(
                "base URL must start with http:// or https://: {base_url}"
            )));
        }
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!(%base_url, "HTTP transport ready");
        Ok(Self { client, base_url })
    }

    /// Returns the base URL with any trailing `/` removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(method = %request.method, %url, "sending request");
        let resp = builder.send().await?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = resp.bytes().await?.to_vec();
        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, headers, body })
    }
}
