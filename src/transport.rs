//! HTTP transport boundary.
//!
//! The client never talks to the network directly. It issues requests
//! through an [`HttpTransport`], which owns connection pooling, TLS and
//! timeouts. [`ReqwestTransport`] is the default implementation.

use async_trait::async_trait;
use tracing::trace;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text. Empty when the server sent no body.
    pub body: String,
}

impl HttpResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// An async HTTP transport.
///
/// Implementations report network-level failures (refused connections,
/// timeouts, truncated bodies) as [`Error::ServiceUnavailable`]. Any HTTP
/// status, including errors, is returned as an [`HttpResponse`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, url: &Url, headers: &[(String, String)]) -> Result<HttpResponse>;

    /// Issue a POST request with a text body.
    async fn post(
        &self,
        url: &Url,
        headers: &[(String, String)],
        body: String,
    ) -> Result<HttpResponse>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from the timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `reqwest` cannot build its
    /// client, e.g. when no TLS backend initialises.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::InvalidParameter {
                name: "http_client".to_string(),
                value: e.to_string(),
            })?;
        Ok(Self { http })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<HttpResponse> {
        let resp = builder.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(map_reqwest_error)?;
        trace!(status, body_len = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url, headers: &[(String, String)]) -> Result<HttpResponse> {
        let mut builder = self.http.get(url.clone());
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        self.send(builder).await
    }

    async fn post(
        &self,
        url: &Url,
        headers: &[(String, String)],
        body: String,
    ) -> Result<HttpResponse> {
        let mut builder = self.http.post(url.clone()).body(body);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        self.send(builder).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::service_unavailable(format!("request timed out: {err}"))
    } else {
        Error::service_unavailable(format!("transport error: {err}"))
    }
}
