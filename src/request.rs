//! Request descriptions and the fluent builder that produces them.

use crate::{codec, Result};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// The HTTP methods a [`RequestSpec`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// The method name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Returns `true` if requests with this method transmit a body.
    ///
    /// Only POST, PUT and PATCH do; every other method drops the body at the
    /// transport layer even when one was set.
    pub fn sends_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
        }
    }
}

/// Description of a single HTTP call.
///
/// A spec is built with [`RequestSpec::builder`], handed to
/// [`Client::execute`](crate::Client::execute) by value and consumed by it.
/// Nothing is validated until execution: a malformed URL or header surfaces as
/// an error from `execute`, not from the builder.
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    pub(crate) url: String,
    pub(crate) method: HttpMethod,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) follow_redirects: Option<bool>,
}

impl RequestSpec {
    /// Creates a new [`RequestBuilder`].
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// The target URL, unvalidated.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP method, `GET` unless set.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Looks up a header by exact (case-sensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Query parameters appended to the URL at execution.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// The raw body, if one was set. Whether it is sent depends on the method.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The per-request timeout, if one was set. `None` means the client default applies.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.filter(|timeout| !timeout.is_zero())
    }

    /// The per-request redirect override, if one was set.
    pub fn follow_redirects(&self) -> Option<bool> {
        self.follow_redirects
    }

    /// The body that goes on the wire for this spec's method.
    pub(crate) fn transmitted_body(&self) -> Option<String> {
        if self.method.sends_body() {
            Some(self.body.clone().unwrap_or_default())
        } else {
            None
        }
    }
}

/// Fluent builder for [`RequestSpec`].
///
/// # Examples
///
/// ```
/// use courier::{HttpMethod, RequestSpec};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), courier::Error> {
/// let spec = RequestSpec::builder()
///     .url("https://api.example.com/users")
///     .method(HttpMethod::Post)
///     .header("Accept", "application/json")
///     .json_body(&serde_json::json!({ "name": "Ann" }))?
///     .timeout(Duration::from_secs(5))
///     .build();
///
/// assert_eq!(spec.header("Content-Type"), Some("application/json"));
/// assert_eq!(spec.body(), Some(r#"{"name":"Ann"}"#));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RequestBuilder {
    spec: RequestSpec,
}

impl RequestBuilder {
    /// Creates a builder for a GET request with no URL, headers or body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target URL. It is parsed only when the request is executed.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.spec.url = url.into();
        self
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.spec.method = method;
        self
    }

    /// Sets a header, overwriting any previous value stored under the same name.
    ///
    /// Names are compared case-sensitively here; the transport treats them
    /// case-insensitively, where the later of two differently-cased entries wins.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_pair(&mut self.spec.headers, name.into(), value.into());
        self
    }

    /// Sets several headers at once.
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            set_pair(&mut self.spec.headers, name.into(), value.into());
        }
        self
    }

    /// Appends a query parameter. Parameters are form-urlencoded onto the URL at execution.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.query.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters.
    pub fn query_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.spec
            .query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the raw body, replacing any body set before.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.spec.body = Some(body.into());
        self
    }

    /// Serializes `value` as the body and sets `Content-Type: application/json`.
    ///
    /// Any earlier `Content-Type` entry is removed whatever its casing, so the
    /// spec carries exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`](crate::Error::SerializationFailed)
    /// if `value` cannot be encoded.
    pub fn json_body<T>(mut self, value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        self.spec.body = Some(codec::encode(value)?);
        self.spec
            .headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case("content-type"));
        self.spec
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        Ok(self)
    }

    /// Overrides the client's default timeout for this request. Zero means "use the default".
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.spec.timeout = Some(timeout);
        self
    }

    /// Overrides the client's redirect policy for this request.
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.spec.follow_redirects = Some(follow);
        self
    }

    /// Finishes the builder, returning the request description.
    pub fn build(self) -> RequestSpec {
        self.spec
    }
}

fn set_pair(pairs: &mut Vec<(String, String)>, name: String, value: String) {
    match pairs.iter_mut().find(|(key, _)| *key == name) {
        Some(slot) => slot.1 = value,
        None => pairs.push((name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_defaults() {
        let spec = RequestSpec::builder().url("https://example.com").build();
        assert_eq!(spec.method(), HttpMethod::Get);
        assert!(spec.headers().is_empty());
        assert_eq!(spec.body(), None);
        assert_eq!(spec.timeout(), None);
        assert_eq!(spec.follow_redirects(), None);
    }

    #[test]
    fn test_duplicate_header_overwrites_in_place() {
        let spec = RequestBuilder::new()
            .header("Accept", "text/plain")
            .header("X-Trace", "1")
            .header("Accept", "application/json")
            .build();

        assert_eq!(
            spec.headers(),
            &[
                ("Accept".to_string(), "application/json".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let spec = RequestBuilder::new()
            .header("accept", "a")
            .header("Accept", "b")
            .build();
        assert_eq!(spec.headers().len(), 2);
        assert_eq!(spec.header("accept"), Some("a"));
    }

    #[test]
    fn test_json_body_sets_content_type_once() {
        let spec = RequestBuilder::new()
            .json_body(&serde_json::json!({ "x": 1 }))
            .unwrap()
            .json_body(&serde_json::json!({ "x": 2 }))
            .unwrap()
            .build();

        let content_types: Vec<_> = spec
            .headers()
            .iter()
            .filter(|(name, _)| name == "Content-Type")
            .collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(spec.header("Content-Type"), Some("application/json"));
        assert_eq!(spec.body(), Some(r#"{"x":2}"#));
    }

    #[test]
    fn test_json_body_overrides_user_content_type() {
        let spec = RequestBuilder::new()
            .header("Content-Type", "text/plain")
            .json_body(&[1, 2, 3])
            .unwrap()
            .build();
        assert_eq!(spec.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_json_body_replaces_content_type_of_any_case() {
        let spec = RequestBuilder::new()
            .json_body(&1)
            .unwrap()
            .header("content-type", "text/plain")
            .header("CONTENT-TYPE", "text/html")
            .json_body(&2)
            .unwrap()
            .build();

        let content_types: Vec<_> = spec
            .headers()
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(
            content_types,
            vec![&("Content-Type".to_string(), "application/json".to_string())]
        );
        assert_eq!(spec.body(), Some("2"));
    }

    #[test]
    fn test_body_last_write_wins() {
        let spec = RequestBuilder::new()
            .body("raw")
            .json_body(&"json")
            .unwrap()
            .build();
        assert_eq!(spec.body(), Some(r#""json""#));

        let spec = RequestBuilder::new()
            .json_body(&"json")
            .unwrap()
            .body("raw")
            .build();
        assert_eq!(spec.body(), Some("raw"));
    }

    #[test]
    fn test_json_body_propagates_encoding_failure() {
        let mut bad = std::collections::HashMap::new();
        bad.insert((1, 2), "tuple keys are not valid JSON object keys");

        let result = RequestBuilder::new().json_body(&bad);
        assert!(matches!(result, Err(Error::SerializationFailed(_))));
    }

    #[test]
    fn test_zero_timeout_means_default() {
        let spec = RequestBuilder::new().timeout(Duration::ZERO).build();
        assert_eq!(spec.timeout(), None);

        let spec = RequestBuilder::new()
            .timeout(Duration::from_millis(5000))
            .build();
        assert_eq!(spec.timeout(), Some(Duration::from_millis(5000)));
    }

    #[test]
    fn test_transmitted_body_per_method() {
        let with = |method| {
            RequestBuilder::new()
                .method(method)
                .body("payload")
                .build()
                .transmitted_body()
        };

        assert_eq!(with(HttpMethod::Post).as_deref(), Some("payload"));
        assert_eq!(with(HttpMethod::Put).as_deref(), Some("payload"));
        assert_eq!(with(HttpMethod::Patch).as_deref(), Some("payload"));
        assert_eq!(with(HttpMethod::Get), None);
        assert_eq!(with(HttpMethod::Delete), None);
        assert_eq!(with(HttpMethod::Head), None);
        assert_eq!(with(HttpMethod::Options), None);

        let empty_post = RequestBuilder::new().method(HttpMethod::Post).build();
        assert_eq!(empty_post.transmitted_body().as_deref(), Some(""));
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(http::Method::from(HttpMethod::Patch), http::Method::PATCH);
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
    }
}
