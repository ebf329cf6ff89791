//! Category-based dispatch over finished responses.

use crate::{Response, StatusCategory};
use std::fmt::Debug;

type Callback<'a, A> = Box<dyn FnOnce(A) + 'a>;

/// One optional callback per response category, for [`handle_response`].
///
/// `on_other` receives informational (1xx) and unknown-status responses, which
/// otherwise would have nowhere to go.
pub struct ResponseCallbacks<'a, T> {
    on_success: Option<Callback<'a, &'a T>>,
    on_client_error: Option<Callback<'a, &'a Response<T>>>,
    on_server_error: Option<Callback<'a, &'a Response<T>>>,
    on_redirection: Option<Callback<'a, &'a Response<T>>>,
    on_other: Option<Callback<'a, &'a Response<T>>>,
}

impl<'a, T> ResponseCallbacks<'a, T> {
    pub fn new() -> Self {
        Self {
            on_success: None,
            on_client_error: None,
            on_server_error: None,
            on_redirection: None,
            on_other: None,
        }
    }

    /// Called with the decoded data of a 2xx response. Not called when the body was empty.
    pub fn on_success(mut self, f: impl FnOnce(&'a T) + 'a) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_client_error(mut self, f: impl FnOnce(&'a Response<T>) + 'a) -> Self {
        self.on_client_error = Some(Box::new(f));
        self
    }

    pub fn on_server_error(mut self, f: impl FnOnce(&'a Response<T>) + 'a) -> Self {
        self.on_server_error = Some(Box::new(f));
        self
    }

    pub fn on_redirection(mut self, f: impl FnOnce(&'a Response<T>) + 'a) -> Self {
        self.on_redirection = Some(Box::new(f));
        self
    }

    pub fn on_other(mut self, f: impl FnOnce(&'a Response<T>) + 'a) -> Self {
        self.on_other = Some(Box::new(f));
        self
    }
}

impl<T> Default for ResponseCallbacks<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Invokes at most one callback, chosen by the response's category.
///
/// # Examples
///
/// ```
/// use courier::{handle_response, Response, ResponseCallbacks};
/// use http::HeaderMap;
/// use std::time::Duration;
///
/// let response = Response::new(404, "gone".into(), None::<u32>, None, HeaderMap::new(), Duration::ZERO);
///
/// let mut seen = None;
/// handle_response(
///     &response,
///     ResponseCallbacks::new()
///         .on_success(|n: &u32| println!("got {}", n))
///         .on_client_error(|r| seen = Some(r.status)),
/// );
/// assert_eq!(seen, Some(404));
/// ```
pub fn handle_response<'a, T>(response: &'a Response<T>, callbacks: ResponseCallbacks<'a, T>) {
    match response.category {
        StatusCategory::Success => {
            if let (Some(f), Some(data)) = (callbacks.on_success, response.data.as_ref()) {
                f(data);
            }
        }
        StatusCategory::ClientError => {
            if let Some(f) = callbacks.on_client_error {
                f(response);
            }
        }
        StatusCategory::ServerError => {
            if let Some(f) = callbacks.on_server_error {
                f(response);
            }
        }
        StatusCategory::Redirection => {
            if let Some(f) = callbacks.on_redirection {
                f(response);
            }
        }
        StatusCategory::Informational | StatusCategory::Unknown => {
            if let Some(f) = callbacks.on_other {
                f(response);
            }
        }
    }
}

/// Something that consumes finished responses.
pub trait ResponseHandler<T> {
    fn handle(&self, response: &Response<T>);
}

/// Logs each response at a level matching its category.
///
/// Success logs at `info`, client errors at `warn`, server errors at `error`
/// and everything else at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

impl<T: Debug> ResponseHandler<T> for LoggingHandler {
    fn handle(&self, response: &Response<T>) {
        match response.category {
            StatusCategory::Success => {
                tracing::info!(status = response.status, data = ?response.data, "Success")
            }
            StatusCategory::ClientError => {
                tracing::warn!(status = response.status, "Client error")
            }
            StatusCategory::ServerError => {
                tracing::error!(status = response.status, "Server error")
            }
            _ => tracing::debug!(status = response.status, "Other response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;
    use std::cell::RefCell;
    use std::time::Duration;

    fn response(status: u16, data: Option<u32>) -> Response<u32> {
        Response::new(status, String::new(), data, None, HeaderMap::new(), Duration::ZERO)
    }

    fn dispatch(response: &Response<u32>) -> Vec<&'static str> {
        let fired = RefCell::new(Vec::new());
        handle_response(
            response,
            ResponseCallbacks::new()
                .on_success(|_| fired.borrow_mut().push("success"))
                .on_client_error(|_| fired.borrow_mut().push("client"))
                .on_server_error(|_| fired.borrow_mut().push("server"))
                .on_redirection(|_| fired.borrow_mut().push("redirect"))
                .on_other(|_| fired.borrow_mut().push("other")),
        );
        fired.into_inner()
    }

    #[test]
    fn test_dispatches_exactly_one_callback() {
        assert_eq!(dispatch(&response(200, Some(1))), vec!["success"]);
        assert_eq!(dispatch(&response(404, None)), vec!["client"]);
        assert_eq!(dispatch(&response(502, None)), vec!["server"]);
        assert_eq!(dispatch(&response(307, None)), vec!["redirect"]);
        assert_eq!(dispatch(&response(102, None)), vec!["other"]);
        assert_eq!(dispatch(&response(0, None)), vec!["other"]);
    }

    #[test]
    fn test_success_without_data_fires_nothing() {
        assert!(dispatch(&response(204, None)).is_empty());
    }

    #[test]
    fn test_success_receives_data() {
        let response = response(200, Some(7));
        let mut got = None;
        handle_response(
            &response,
            ResponseCallbacks::new().on_success(|n| got = Some(*n)),
        );
        assert_eq!(got, Some(7));
    }

    #[test]
    fn test_missing_callback_is_a_no_op() {
        let response = response(500, None);
        handle_response(&response, ResponseCallbacks::new());
    }

    #[test]
    fn test_logging_handler_accepts_every_category() {
        for status in [100, 200, 302, 404, 500, 0] {
            LoggingHandler.handle(&response(status, Some(1)));
        }
    }
}
