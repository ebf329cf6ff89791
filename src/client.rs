//! The request execution engine.
//!
//! [`Client`] turns a [`RequestSpec`] into a [`TransportRequest`], sends it,
//! and normalizes whatever comes back into a [`Response`]. Use
//! [`ClientBuilder`] to configure defaults, interceptors or a custom transport.

use crate::{
    codec,
    interceptor::RequestInterceptor,
    request::{HttpMethod, RequestSpec},
    transport::{ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse},
    Config, Error, Response, Result, StatusCategory,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Executes requests and normalizes their responses.
///
/// The client holds no per-call state, so one instance can be cloned and used
/// from many tasks at once.
///
/// # Examples
///
/// ```no_run
/// use courier::{Client, Config, HttpMethod, RequestSpec};
/// use serde::{Deserialize, Serialize};
/// use std::time::Duration;
///
/// #[derive(Serialize)]
/// struct CreateUser {
///     name: String,
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), courier::Error> {
/// let client = Client::builder()
///     .config(Config::default().with_default_timeout(Duration::from_secs(10)))
///     .build()?;
///
/// // GET request
/// let user = client.get::<User>("https://api.example.com/users/1").await?;
/// if let Some(user) = user.data {
///     println!("User: {}", user.name);
/// }
///
/// // Full control over the request
/// let spec = RequestSpec::builder()
///     .url("https://api.example.com/users")
///     .method(HttpMethod::Post)
///     .json_body(&CreateUser { name: "Ann".to_string() })?
///     .timeout(Duration::from_secs(5))
///     .build();
/// let created = client.execute::<User>(spec).await?;
/// println!("Created with status {}", created.status);
/// # Ok(())
/// # }
/// ```
pub struct Client<T = ReqwestTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    transport: T,
    config: Config,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Client {
    /// Creates a client with the default [`Config`] and the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: Transport> Client<T> {
    /// The defaults this client was built with.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Executes a request and decodes the body into `Res`.
    ///
    /// Any status the server answers with, 4xx and 5xx included, yields
    /// `Ok(Response)`. Use [`Response::is_success`] and friends to tell them apart.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] / [`Error::ConfigurationError`] if the request
    ///   cannot be assembled.
    /// - [`Error::Timeout`], [`Error::Connection`], [`Error::Io`] or
    ///   [`Error::Unexpected`] if no response arrived.
    /// - [`Error::Parsing`] if a 2xx body was non-empty and did not decode.
    ///   For other statuses the decode failure is kept in
    ///   [`Response::decode_error`] instead.
    pub async fn execute<Res>(&self, spec: RequestSpec) -> Result<Response<Res>>
    where
        Res: DeserializeOwned + 'static,
    {
        let (request, follow_redirects) = self.prepare(&spec)?;
        let timeout = request.timeout;
        let method = request.method.clone();
        let url = request.url.clone();

        tracing::debug!(
            method = %method,
            url = %url,
            timeout_ms = timeout.as_millis(),
            follow_redirects = follow_redirects,
            "Executing HTTP request"
        );

        let start_time = Instant::now();
        let response = self
            .inner
            .transport
            .send(request, follow_redirects)
            .await
            .map_err(|e| {
                let error = transport_failure(e, timeout, self.inner.config.connect_timeout);
                tracing::warn!(
                    error = %error,
                    method = %method,
                    url = %url,
                    "Request failed"
                );
                error
            })?;

        normalize(response, start_time.elapsed())
    }

    /// Executes a request and returns the body as text, without decoding.
    pub async fn execute_text(&self, spec: RequestSpec) -> Result<Response<String>> {
        self.execute(spec).await
    }

    /// Executes a request unless `cancel` resolves first.
    ///
    /// When the signal wins, the in-flight exchange is dropped (which aborts it
    /// at the transport) and [`Error::Cancelled`] is returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use courier::{Client, RequestSpec};
    /// use std::time::Duration;
    ///
    /// # async fn example() -> Result<(), courier::Error> {
    /// let client = Client::new()?;
    /// let spec = RequestSpec::builder().url("https://api.example.com/slow").build();
    ///
    /// let result = client
    ///     .execute_with_cancel::<String, _>(spec, tokio::time::sleep(Duration::from_secs(1)))
    ///     .await;
    /// if let Err(e) = result {
    ///     assert!(e.is_cancelled() || e.is_timeout());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute_with_cancel<Res, C>(
        &self,
        spec: RequestSpec,
        cancel: C,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned + 'static,
        C: Future<Output = ()>,
    {
        let url = spec.url().to_owned();

        tokio::select! {
            biased;
            _ = cancel => {
                tracing::debug!(url = %url, "Request cancelled");
                Err(Error::Cancelled)
            }
            result = self.execute(spec) => result,
        }
    }

    /// Makes a GET request to `url`.
    pub async fn get<Res>(&self, url: impl Into<String>) -> Result<Response<Res>>
    where
        Res: DeserializeOwned + 'static,
    {
        let spec = RequestSpec::builder().url(url).method(HttpMethod::Get).build();
        self.execute(spec).await
    }

    /// Makes a POST request to `url` with a JSON body.
    pub async fn post<Req, Res>(&self, url: impl Into<String>, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned + 'static,
    {
        self.send_json(HttpMethod::Post, url.into(), body).await
    }

    /// Makes a PUT request to `url` with a JSON body.
    pub async fn put<Req, Res>(&self, url: impl Into<String>, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned + 'static,
    {
        self.send_json(HttpMethod::Put, url.into(), body).await
    }

    /// Makes a PATCH request to `url` with a JSON body.
    pub async fn patch<Req, Res>(&self, url: impl Into<String>, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned + 'static,
    {
        self.send_json(HttpMethod::Patch, url.into(), body).await
    }

    /// Makes a DELETE request to `url`.
    pub async fn delete<Res>(&self, url: impl Into<String>) -> Result<Response<Res>>
    where
        Res: DeserializeOwned + 'static,
    {
        let spec = RequestSpec::builder()
            .url(url)
            .method(HttpMethod::Delete)
            .build();
        self.execute(spec).await
    }

    async fn send_json<Req, Res>(
        &self,
        method: HttpMethod,
        url: String,
        body: &Req,
    ) -> Result<Response<Res>>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned + 'static,
    {
        let spec = RequestSpec::builder()
            .url(url)
            .method(method)
            .json_body(body)?
            .build();
        self.execute(spec).await
    }

    /// Resolves a spec against the client defaults and runs the interceptors.
    fn prepare(&self, spec: &RequestSpec) -> Result<(TransportRequest, bool)> {
        let config = &self.inner.config;

        let mut url = Url::parse(spec.url())?;
        if !spec.query().is_empty() {
            url.query_pairs_mut().extend_pairs(spec.query());
        }

        let mut request = TransportRequest {
            method: spec.method().into(),
            url,
            headers: header_map(spec.headers())?,
            body: spec.transmitted_body(),
            timeout: config.effective_timeout(spec.timeout()),
        };

        for interceptor in &self.inner.interceptors {
            interceptor.intercept(&mut request)?;
        }

        Ok((request, config.effective_follow_redirects(spec.follow_redirects())))
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::try_from(name.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn transport_failure(error: TransportError, timeout: Duration, connect_timeout: Duration) -> Error {
    match error {
        TransportError::Timeout(source) => Error::Timeout { timeout, source },
        TransportError::ConnectTimeout(source) => Error::Timeout {
            timeout: connect_timeout,
            source,
        },
        TransportError::Connect(source) => Error::Connection(source),
        TransportError::Io(source) => Error::Io(source),
        TransportError::Other(source) => Error::Unexpected(source),
    }
}

/// Decodes the body and assembles the final [`Response`].
fn normalize<Res>(response: TransportResponse, latency: Duration) -> Result<Response<Res>>
where
    Res: DeserializeOwned + 'static,
{
    let TransportResponse {
        status,
        headers,
        body,
    } = response;
    let category = StatusCategory::from_code(status);

    tracing::info!(
        status = status,
        category = %category,
        latency_ms = latency.as_millis(),
        "Received HTTP response"
    );

    match codec::decode::<Res>(&body) {
        Ok(data) => Ok(Response::new(status, body, data, None, headers, latency)),
        Err(e) if category == StatusCategory::Success => {
            tracing::error!(
                error = %e,
                raw_response = %body,
                "Failed to deserialize response"
            );

            Err(Error::Parsing {
                status,
                raw_response: body,
                source: e,
            })
        }
        Err(e) => {
            tracing::debug!(
                error = %e,
                status = status,
                "Error response body did not match the requested type"
            );
            Ok(Response::new(status, body, None, Some(e), headers, latency))
        }
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use courier::{interceptor::BearerAuth, ClientBuilder, Config};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), courier::Error> {
/// let client = ClientBuilder::new()
///     .config(
///         Config::default()
///             .with_default_timeout(Duration::from_secs(15))
///             .with_user_agent("my-app/1.0"),
///     )
///     .interceptor(BearerAuth::new("secret-token")?)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder<T = ReqwestTransport> {
    config: Config,
    transport: Option<T>,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            transport: None,
            interceptors: Vec::new(),
        }
    }
}

impl<T: Transport> ClientBuilder<T> {
    /// Sets the client-wide defaults.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the network layer.
    ///
    /// The connection settings in [`Config`] only apply to the default
    /// transport; a custom one is used as given.
    pub fn transport<U: Transport>(self, transport: U) -> ClientBuilder<U> {
        ClientBuilder {
            config: self.config,
            transport: Some(transport),
            interceptors: self.interceptors,
        }
    }

    /// Adds an interceptor. Interceptors run in the order they were added.
    pub fn interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }
}

impl ClientBuilder<ReqwestTransport> {
    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest` transport cannot be built from the config.
    pub fn build(self) -> Result<Client> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => ReqwestTransport::new(&self.config)?,
        };
        Ok(assemble(transport, self.config, self.interceptors))
    }
}

impl<T: Transport> ClientBuilder<T> {
    /// Builds a `Client` over the custom transport given to [`ClientBuilder::transport`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if no transport was set.
    pub fn build_with_transport(self) -> Result<Client<T>> {
        let transport = self
            .transport
            .ok_or_else(|| Error::ConfigurationError("Transport is required".to_string()))?;
        Ok(assemble(transport, self.config, self.interceptors))
    }
}

fn assemble<T>(
    transport: T,
    config: Config,
    interceptors: Vec<Box<dyn RequestInterceptor>>,
) -> Client<T> {
    Client {
        inner: Arc::new(ClientInner {
            transport,
            config,
            interceptors,
        }),
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
