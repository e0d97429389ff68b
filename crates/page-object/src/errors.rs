//! Error types surfaced to test code

use script_bridge::BridgeError;
use thiserror::Error;

/// Failures a page object reports to its caller.
///
/// Nothing here is retried internally; a retry would hide exactly the flakiness these
/// checks exist to surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The active backend has no scripting bridge for audits
    #[error("accessibility audits are not implemented for the {backend} backend")]
    UnsupportedBackend { backend: String },

    /// The load predicate never held before the deadline
    #[error("page {url} was not ready after {waited_ms}ms")]
    Timeout { url: String, waited_ms: u64 },

    /// Audit-on-load found at least one error
    #[error("accessibility audit found {error_count} error(s):\n{message}")]
    AccessibilityViolation { error_count: usize, message: String },

    /// The browser session failed underneath us
    #[error("driver error: {0}")]
    Driver(String),

    /// The page object declares no URL
    #[error("page object has no url and cannot be visited")]
    NotVisitable,
}

impl PageError {
    pub fn code(&self) -> &'static str {
        match self {
            PageError::UnsupportedBackend { .. } => "unsupported_backend",
            PageError::Timeout { .. } => "timeout",
            PageError::AccessibilityViolation { .. } => "accessibility_violation",
            PageError::Driver(_) => "driver",
            PageError::NotVisitable => "not_visitable",
        }
    }
}

impl From<BridgeError> for PageError {
    fn from(err: BridgeError) -> Self {
        PageError::Driver(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use script_bridge::BridgeErrorKind;

    #[test]
    fn bridge_errors_become_driver_errors() {
        let err: PageError = BridgeError::new(BridgeErrorKind::Navigation)
            .with_hint("net::ERR_NAME_NOT_RESOLVED")
            .into();
        assert_eq!(
            err,
            PageError::Driver("navigation failed: net::ERR_NAME_NOT_RESOLVED".into())
        );
        assert_eq!(err.code(), "driver");
    }

    #[test]
    fn timeout_and_violation_are_distinct() {
        let timeout = PageError::Timeout {
            url: "http://localhost/a".into(),
            waited_ms: 100,
        };
        let violation = PageError::AccessibilityViolation {
            error_count: 1,
            message: "Error: AX_ARIA_04".into(),
        };
        assert_ne!(timeout.code(), violation.code());
        assert_eq!(
            timeout.to_string(),
            "page http://localhost/a was not ready after 100ms"
        );
    }
}
