//! Client-wide defaults.

use std::time::Duration;

/// Defaults applied to every request a [`Client`](crate::Client) executes.
///
/// A config is handed to [`ClientBuilder::config`](crate::ClientBuilder::config)
/// once and never changes afterwards. Individual requests may still override
/// the timeout and redirect policy through their [`RequestSpec`](crate::RequestSpec).
///
/// # Examples
///
/// ```
/// use courier::Config;
/// use std::time::Duration;
///
/// let config = Config::default()
///     .with_default_timeout(Duration::from_secs(10))
///     .with_follow_redirects(false);
///
/// assert_eq!(config.default_timeout, Duration::from_secs(10));
/// assert_eq!(config.connect_timeout, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Timeout for requests that don't set their own.
    pub default_timeout: Duration,

    /// Whether redirects are followed for requests that don't say otherwise.
    pub follow_redirects: bool,

    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,

    /// `User-Agent` sent with every request, if any.
    pub user_agent: Option<String>,
}

impl Config {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Picks the request's own timeout when it has one, the default otherwise.
    pub(crate) fn effective_timeout(&self, requested: Option<Duration>) -> Duration {
        requested
            .filter(|timeout| !timeout.is_zero())
            .unwrap_or(self.default_timeout)
    }

    /// Picks the request's own redirect policy when it has one, the default otherwise.
    pub(crate) fn effective_follow_redirects(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.follow_redirects)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timeout: Self::DEFAULT_TIMEOUT,
            follow_redirects: true,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_timeout, Duration::from_millis(30_000));
        assert!(config.follow_redirects);
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn test_effective_timeout() {
        let config = Config::default();
        assert_eq!(
            config.effective_timeout(Some(Duration::from_millis(5000))),
            Duration::from_millis(5000)
        );
        assert_eq!(config.effective_timeout(None), Duration::from_millis(30_000));
        assert_eq!(
            config.effective_timeout(Some(Duration::ZERO)),
            Duration::from_millis(30_000)
        );
    }

    #[test]
    fn test_effective_follow_redirects() {
        let config = Config::default().with_follow_redirects(false);
        assert!(!config.effective_follow_redirects(None));
        assert!(config.effective_follow_redirects(Some(true)));
    }
}
