//! # Courier - typed HTTP requests with normalized responses
//!
//! Courier describes an HTTP call as a [`RequestSpec`], executes it through a
//! single entry point and hands back a [`Response`] carrying the status, its
//! [`StatusCategory`], the raw body and the body decoded into the type you
//! asked for. It is built on top of `reqwest`, `serde_json` and `tracing`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use courier::{Client, HttpMethod, RequestSpec};
//! use serde::{Deserialize, Serialize};
//! use std::time::Duration;
//!
//! #[derive(Serialize)]
//! struct CreateUser {
//!     name: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), courier::Error> {
//!     let client = Client::new()?;
//!
//!     // Make a GET request
//!     let response = client.get::<User>("https://api.example.com/users/1").await?;
//!     if let Some(user) = &response.data {
//!         println!("User: {}", user.name);
//!     }
//!     println!("Status {} ({})", response.status, response.category);
//!
//!     // Describe a request in full
//!     let spec = RequestSpec::builder()
//!         .url("https://api.example.com/users")
//!         .method(HttpMethod::Post)
//!         .header("X-Request-Id", "42")
//!         .json_body(&CreateUser { name: "Ann".to_string() })?
//!         .timeout(Duration::from_secs(5))
//!         .build();
//!     let created = client.execute::<User>(spec).await?;
//!     println!("Created: {}", created.is_success());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One execution path** - every call goes through [`Client::execute`]
//! - **Status categories** - 1xx to 5xx classified into [`StatusCategory`], unknown codes included
//! - **HTTP errors are data** - 4xx and 5xx come back as a normal [`Response`]
//! - **Typed failures** - timeouts, connection failures, I/O, parsing and cancellation are distinct [`Error`] variants
//! - **Per-request overrides** - timeout and redirect policy fall back to the client [`Config`]
//! - **Pluggable transport** - swap the [`transport::Transport`] for tests or other HTTP stacks
//! - **Interceptors** - adjust requests before they are sent, e.g. [`interceptor::BearerAuth`]
//! - **Automatic logging** - structured logging with `tracing`
//!
//! ## Error Handling
//!
//! ```no_run
//! use courier::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new()?;
//! match client.get::<serde_json::Value>("https://api.example.com/endpoint").await {
//!     Ok(response) if response.is_server_error() => {
//!         eprintln!("Server error {}: {}", response.status, response.raw_body);
//!     }
//!     Ok(response) => println!("Data: {:?}", response.data),
//!     Err(Error::Parsing { raw_response, source, status }) => {
//!         eprintln!("Failed to deserialize (status {}):", status);
//!         eprintln!("  Raw response: {}", raw_response);
//!         eprintln!("  Error: {}", source);
//!     }
//!     Err(e) if e.is_timeout() || e.is_connection() => eprintln!("Server unreachable: {}", e),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod codec;
mod config;
mod error;
pub mod handler;
pub mod interceptor;
mod request;
mod response;
mod status;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use config::Config;
pub use error::{BoxError, Error, Result};
pub use handler::{handle_response, ResponseCallbacks, ResponseHandler};
pub use request::{HttpMethod, RequestBuilder, RequestSpec};
pub use response::Response;
pub use status::StatusCategory;
