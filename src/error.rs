//! Error types for request execution.
//!
//! Failures fall into three groups that callers usually want to tell apart:
//!
//! - no response reached the caller ([`Error::Timeout`], [`Error::Connection`],
//!   [`Error::Io`], [`Error::Unexpected`], [`Error::Cancelled`]),
//! - a response arrived but its body could not be decoded ([`Error::Parsing`]),
//! - the request could not be assembled in the first place
//!   ([`Error::InvalidUrl`], [`Error::ConfigurationError`],
//!   [`Error::SerializationFailed`]).
//!
//! HTTP error statuses (4xx/5xx) are not errors: they come back as a normal
//! [`Response`](crate::Response) whose category says what happened.

use std::time::Duration;

/// A boxed error from the underlying transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for request execution.
///
/// # Examples
///
/// ```no_run
/// use courier::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new()?;
///
/// match client.get::<serde_json::Value>("https://api.example.com/users/1").await {
///     Ok(response) if response.is_client_error() => {
///         eprintln!("Client error {}: {}", response.status, response.raw_body);
///     }
///     Ok(response) => println!("Got {:?}", response.data),
///     Err(Error::Timeout { timeout, .. }) => eprintln!("Gave up after {:?}", timeout),
///     Err(Error::Parsing { raw_response, source, .. }) => {
///         eprintln!("Could not decode {}: {}", raw_response, source);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The transport gave up waiting for the server.
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// The budget that ran out: the connect timeout when the connection
        /// was never established, the effective request timeout otherwise
        timeout: Duration,
        /// The underlying transport error
        #[source]
        source: BoxError,
    },

    /// A connection could not be established (refused, DNS lookup failed, etc.).
    #[error("Connection failed: {0}")]
    Connection(#[source] BoxError),

    /// Reading or writing the request or response failed mid-flight.
    #[error("I/O error: {0}")]
    Io(#[source] BoxError),

    /// A successful response body could not be decoded into the requested type.
    ///
    /// Only raised for 2xx responses, and only when decoding was actually
    /// attempted; an empty body never produces this error. A body that fails to
    /// decode on any other status does not fail the call: the response is
    /// returned with [`Response::decode_error`](crate::Response::decode_error) set.
    #[error("Failed to deserialize response (status {status}): {source}")]
    Parsing {
        /// The HTTP status code of the response
        status: u16,
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The codec error
        #[source]
        source: serde_json::Error,
    },

    /// The caller's cancellation signal fired before the request completed.
    #[error("Request was cancelled")]
    Cancelled,

    /// The transport failed in a way that does not fit any other kind.
    #[error("Unexpected transport error: {0}")]
    Unexpected(#[source] BoxError),

    /// Failed to serialize a request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// The request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration was provided, such as a malformed header.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl Error {
    /// Returns `true` for [`Error::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Returns `true` for [`Error::Connection`].
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// Returns `true` for [`Error::Parsing`].
    pub fn is_parsing(&self) -> bool {
        matches!(self, Error::Parsing { .. })
    }

    /// Returns `true` for [`Error::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Returns the HTTP status code if a response was received before failing.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Parsing { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if a response was received before failing.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Parsing { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for request execution.
pub type Result<T> = std::result::Result<T, Error>;
