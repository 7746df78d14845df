//! Result and error types for Vitrina.

use thiserror::Error;

/// Result type for Vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;

/// Errors that can occur in Vitrina
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// Target route did not load within the configured timeout
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed to load
        url: String,
        /// Error message
        message: String,
    },

    /// Element not actionable in time, or the interaction was rejected
    #[error("{operation} on {selector} failed: {message}")]
    Interaction {
        /// Selector of the target element
        selector: String,
        /// Operation kind ("click", "fill", ...)
        operation: String,
        /// Error message
        message: String,
    },

    /// An explicit wait exceeded its bound
    #[error("Timed out after {ms}ms waiting for {selector}")]
    Timeout {
        /// Selector that was waited on
        selector: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// A required element was absent when a read was attempted
    #[error("No element matched {selector}")]
    NotFound {
        /// Selector that resolved to zero elements
        selector: String,
    },

    /// Caller-supplied input was unusable (e.g. missing credentials)
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message
        message: String,
    },

    /// Underlying browser capability failure outside the UI taxonomy
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VitrinaError {
    /// Check whether this error is a wait timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check whether this error is a missing-element read
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_display() {
        let err = VitrinaError::Navigation {
            url: "https://example.com".to_string(),
            message: "net::ERR_TIMED_OUT".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("https://example.com"));
        assert!(text.contains("ERR_TIMED_OUT"));
    }

    #[test]
    fn test_interaction_display_names_operation() {
        let err = VitrinaError::Interaction {
            selector: "#login-button".to_string(),
            operation: "click".to_string(),
            message: "element is disabled".to_string(),
        };
        assert!(err.to_string().starts_with("click on #login-button"));
    }

    #[test]
    fn test_timeout_predicate() {
        let err = VitrinaError::Timeout {
            selector: ".title".to_string(),
            ms: 10_000,
        };
        assert!(err.is_timeout());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: VitrinaError = io.into();
        assert!(matches!(err, VitrinaError::Io(_)));
    }
}
