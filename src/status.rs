//! Classification of HTTP status codes by hundred-range.

use std::fmt;
use std::ops::RangeInclusive;

/// The five-way category of an HTTP status code.
///
/// Codes outside `100..=599` (including `0`) map to [`StatusCategory::Unknown`]
/// so the category of any response is always defined.
///
/// # Examples
///
/// ```
/// use courier::StatusCategory;
///
/// assert_eq!(StatusCategory::from_code(204), StatusCategory::Success);
/// assert_eq!(StatusCategory::from_code(418), StatusCategory::ClientError);
/// assert_eq!(StatusCategory::from_code(700), StatusCategory::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirection,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
    /// Anything outside `100..=599`.
    Unknown,
}

impl StatusCategory {
    const RANGED: [StatusCategory; 5] = [
        StatusCategory::Informational,
        StatusCategory::Success,
        StatusCategory::Redirection,
        StatusCategory::ClientError,
        StatusCategory::ServerError,
    ];

    /// Returns the category the given status code belongs to.
    pub fn from_code(code: u16) -> Self {
        Self::RANGED
            .into_iter()
            .find(|category| category.matches(code))
            .unwrap_or(StatusCategory::Unknown)
    }

    /// Returns the inclusive code range of this category, or `None` for
    /// [`StatusCategory::Unknown`].
    pub fn range(self) -> Option<RangeInclusive<u16>> {
        match self {
            StatusCategory::Informational => Some(100..=199),
            StatusCategory::Success => Some(200..=299),
            StatusCategory::Redirection => Some(300..=399),
            StatusCategory::ClientError => Some(400..=499),
            StatusCategory::ServerError => Some(500..=599),
            StatusCategory::Unknown => None,
        }
    }

    /// Returns `true` if `code` falls inside this category's range.
    ///
    /// [`StatusCategory::Unknown`] matches every code no other category does.
    pub fn matches(self, code: u16) -> bool {
        match self.range() {
            Some(range) => range.contains(&code),
            None => !(100..=599).contains(&code),
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCategory::Informational => "informational",
            StatusCategory::Success => "success",
            StatusCategory::Redirection => "redirection",
            StatusCategory::ClientError => "client error",
            StatusCategory::ServerError => "server error",
            StatusCategory::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl From<u16> for StatusCategory {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_in_range_maps_to_its_category() {
        for code in 100..=199 {
            assert_eq!(StatusCategory::from_code(code), StatusCategory::Informational);
        }
        for code in 200..=299 {
            assert_eq!(StatusCategory::from_code(code), StatusCategory::Success);
        }
        for code in 300..=399 {
            assert_eq!(StatusCategory::from_code(code), StatusCategory::Redirection);
        }
        for code in 400..=499 {
            assert_eq!(StatusCategory::from_code(code), StatusCategory::ClientError);
        }
        for code in 500..=599 {
            assert_eq!(StatusCategory::from_code(code), StatusCategory::ServerError);
        }
    }

    #[test]
    fn test_out_of_range_codes_are_unknown() {
        for code in [0, 1, 99, 600, 799, 999, u16::MAX] {
            assert_eq!(StatusCategory::from_code(code), StatusCategory::Unknown);
        }
    }

    #[test]
    fn test_matches_is_range_containment() {
        assert!(StatusCategory::Success.matches(200));
        assert!(StatusCategory::Success.matches(299));
        assert!(!StatusCategory::Success.matches(300));
        assert!(!StatusCategory::ClientError.matches(399));
        assert!(StatusCategory::Unknown.matches(0));
        assert!(!StatusCategory::Unknown.matches(503));
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(StatusCategory::from_code(99), StatusCategory::Unknown);
        assert_eq!(StatusCategory::from_code(100), StatusCategory::Informational);
        assert_eq!(StatusCategory::from_code(599), StatusCategory::ServerError);
        assert_eq!(StatusCategory::from_code(600), StatusCategory::Unknown);
    }
}
