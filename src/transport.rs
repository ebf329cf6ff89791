//! The network layer the client sends requests through.
//!
//! [`Transport`] decouples the execution pipeline from any particular HTTP
//! implementation. [`ReqwestTransport`] is the default; tests and embedders can
//! plug in their own.

use crate::{error::BoxError, Config, Error, Result};
use http::{HeaderMap, Method};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// A fully resolved request, ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// `None` means no body is transmitted at all.
    pub body: Option<String>,
    /// The effective timeout for the whole exchange.
    pub timeout: Duration,
}

/// What came back from the server.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

/// Failures a transport reports, by kind.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("timed out: {0}")]
    Timeout(#[source] BoxError),

    /// The connection was not established within the connect timeout.
    #[error("connect timed out: {0}")]
    ConnectTimeout(#[source] BoxError),

    /// Includes DNS resolution failures.
    #[error("connect failed: {0}")]
    Connect(#[source] BoxError),

    #[error("i/o failed: {0}")]
    Io(#[source] BoxError),

    #[error("{0}")]
    Other(#[source] BoxError),
}

/// Sends requests and returns the status, headers and body text of the reply.
///
/// The redirect policy is passed per call so a single transport can honour
/// per-request overrides. Implementations must be safe to share across tasks.
pub trait Transport: Send + Sync + 'static {
    fn send(
        &self,
        request: TransportRequest,
        follow_redirects: bool,
    ) -> impl Future<Output = std::result::Result<TransportResponse, TransportError>> + Send;
}

/// A [`Transport`] backed by `reqwest`.
///
/// Holds one client that follows redirects and one that doesn't, both built
/// once from the [`Config`], and picks between them per call.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    following: reqwest::Client,
    not_following: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the transport from the connection settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if `reqwest` rejects the settings.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            following: build_client(config, reqwest::redirect::Policy::default())?,
            not_following: build_client(config, reqwest::redirect::Policy::none())?,
        })
    }
}

fn build_client(config: &Config, policy: reqwest::redirect::Policy) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .redirect(policy);

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }

    builder
        .build()
        .map_err(|e| Error::ConfigurationError(format!("Failed to build HTTP client: {}", e)))
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: TransportRequest,
        follow_redirects: bool,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let client = if follow_redirects {
            &self.following
        } else {
            &self.not_following
        };

        let mut builder = client
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(request.timeout);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() && error.is_connect() {
        TransportError::ConnectTimeout(Box::new(error))
    } else if error.is_timeout() {
        TransportError::Timeout(Box::new(error))
    } else if error.is_connect() {
        TransportError::Connect(Box::new(error))
    } else if error.is_request() || error.is_body() || error.is_decode() {
        TransportError::Io(Box::new(error))
    } else {
        TransportError::Other(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_default_config() {
        assert!(ReqwestTransport::new(&Config::default()).is_ok());
    }

    #[test]
    fn test_builds_with_user_agent() {
        let config = Config::default().with_user_agent("courier-tests/1.0");
        assert!(ReqwestTransport::new(&config).is_ok());
    }
}
