//! Hooks that adjust outgoing requests just before they are sent.

use crate::{transport::TransportRequest, Error, Result};
use http::header::{HeaderValue, AUTHORIZATION};

/// Adjusts a resolved request before it reaches the transport.
///
/// Interceptors run in the order they were registered on the
/// [`ClientBuilder`](crate::ClientBuilder). Returning an error aborts the request.
///
/// # Examples
///
/// ```
/// use courier::interceptor::RequestInterceptor;
/// use courier::transport::TransportRequest;
/// use http::HeaderValue;
///
/// struct Tenant(&'static str);
///
/// impl RequestInterceptor for Tenant {
///     fn intercept(&self, request: &mut TransportRequest) -> courier::Result<()> {
///         request.headers.insert("x-tenant", HeaderValue::from_static(self.0));
///         Ok(())
///     }
/// }
/// ```
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: &mut TransportRequest) -> Result<()>;
}

/// Attaches `Authorization: Bearer <token>` to every request.
#[derive(Clone)]
pub struct BearerAuth {
    value: HeaderValue,
}

impl BearerAuth {
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if the token contains characters
    /// that are not allowed in a header value.
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        let mut value = HeaderValue::try_from(format!("Bearer {}", token.as_ref()))
            .map_err(|e| Error::ConfigurationError(format!("Invalid bearer token: {}", e)))?;
        value.set_sensitive(true);
        Ok(Self { value })
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

impl RequestInterceptor for BearerAuth {
    fn intercept(&self, request: &mut TransportRequest) -> Result<()> {
        request.headers.insert(AUTHORIZATION, self.value.clone());
        Ok(())
    }
}

/// Logs every outgoing request at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequests;

impl RequestInterceptor for LogRequests {
    fn intercept(&self, request: &mut TransportRequest) -> Result<()> {
        tracing::info!(
            method = %request.method,
            url = %request.url,
            "Sending request"
        );
        Ok(())
    }
}
