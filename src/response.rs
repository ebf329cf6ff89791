//! Normalized response type.
//!
//! A [`Response`] is produced for every exchange in which the server answered,
//! whatever the status. It keeps the raw body next to the decoded value so the
//! original payload is always available for debugging.

use crate::StatusCategory;
use http::HeaderMap;
use std::time::Duration;

/// The outcome of a request that reached the server.
///
/// # Type Parameters
///
/// * `T` - The type the body was decoded into
///
/// # Examples
///
/// ```no_run
/// use courier::Client;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), courier::Error> {
/// let client = Client::new()?;
/// let response = client.get::<User>("https://api.example.com/users/1").await?;
///
/// if let Some(user) = &response.data {
///     println!("User: {}", user.name);
/// } else if response.is_client_error() {
///     println!("Rejected with {}: {}", response.status, response.raw_body);
/// }
/// println!("Content-Type: {:?}", response.header("content-type"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Response<T> {
    /// The HTTP status code.
    pub status: u16,

    /// The category of `status`.
    pub category: StatusCategory,

    /// The response body as received. Empty when the server sent none.
    pub raw_body: String,

    /// The decoded body.
    ///
    /// `None` when the body was empty, or when it could not be decoded on a
    /// non-2xx response (see `decode_error`).
    pub data: Option<T>,

    /// Why decoding a non-2xx body failed, if it did.
    ///
    /// Decoding failures on 2xx responses are raised as
    /// [`Error::Parsing`](crate::Error::Parsing) instead, so for a successful
    /// response this is always `None`.
    pub decode_error: Option<serde_json::Error>,

    /// The response headers. Repeated headers keep every value.
    pub headers: HeaderMap,

    /// Time from dispatch until the body was fully read.
    pub latency: Duration,
}

impl<T> Response<T> {
    /// Creates a new `Response`, deriving the category from `status`.
    ///
    /// This is typically called by the client at the end of an exchange.
    pub fn new(
        status: u16,
        raw_body: String,
        data: Option<T>,
        decode_error: Option<serde_json::Error>,
        headers: HeaderMap,
        latency: Duration,
    ) -> Self {
        Self {
            status,
            category: StatusCategory::from_code(status),
            raw_body,
            data,
            decode_error,
            headers,
            latency,
        }
    }

    pub fn is_informational(&self) -> bool {
        self.category == StatusCategory::Informational
    }

    pub fn is_success(&self) -> bool {
        self.category == StatusCategory::Success
    }

    pub fn is_redirection(&self) -> bool {
        self.category == StatusCategory::Redirection
    }

    pub fn is_client_error(&self) -> bool {
        self.category == StatusCategory::ClientError
    }

    pub fn is_server_error(&self) -> bool {
        self.category == StatusCategory::ServerError
    }

    /// Returns `true` unless the response is a 2xx whose body decoded cleanly.
    pub fn has_error(&self) -> bool {
        self.decode_error.is_some() || !self.is_success()
    }

    /// Returns the first value of a header. Lookup is case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// # use courier::Response;
    /// # use http::{HeaderMap, HeaderValue};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("application/json"));
    ///
    /// let response: Response<()> =
    ///     Response::new(200, String::new(), None, None, headers, Duration::ZERO);
    ///
    /// assert_eq!(response.header("Content-Type"), Some("application/json"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Returns every value of a header in the order received.
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Maps the decoded data to a different type, keeping everything else.
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            status: self.status,
            category: self.category,
            raw_body: self.raw_body,
            data: self.data.map(f),
            decode_error: self.decode_error,
            headers: self.headers,
            latency: self.latency,
        }
    }

    /// Consumes the response, returning the decoded data.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
