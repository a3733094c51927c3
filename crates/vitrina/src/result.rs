//! Result and error types for Vitrina.

use thiserror::Error;

/// Result type for Vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// Browser could not be launched
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation did not reach the expected destination in time
    #[error("Navigation to {url} timed out after {ms}ms")]
    NavigationTimeout {
        /// Destination URL or URL marker that was never reached
        url: String,
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// An element never became visible
    #[error("Element {selector} not visible after {ms}ms")]
    NotVisible {
        /// Selector of the element
        selector: String,
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// A named element or row is absent
    #[error("{what} not found")]
    NotFound {
        /// Description of what was looked for
        what: String,
    },

    /// A value outside the closed set accepted at this boundary
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Dialog text did not carry the expected confirmation
    #[error("Unexpected dialog text {actual:?} (expected to contain {expected:?})")]
    UnexpectedDialog {
        /// Substring the dialog text was required to contain
        expected: String,
        /// Text the dialog actually carried
        actual: String,
    },

    /// Operation invoked in a state that does not allow it
    #[error("Precondition failed: {message}")]
    PreconditionFailed {
        /// Error message
        message: String,
    },

    /// The purchase confirmation panel never appeared
    #[error("Purchase confirmation did not appear within {ms}ms")]
    PurchaseTimeout {
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// No native dialog fired for a one-shot observer
    #[error("No dialog observed within {ms}ms")]
    DialogTimeout {
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// A bounded wait expired
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Description of the awaited condition
        waited_for: String,
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// Scenario check failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Underlying CDP transport error
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

impl From<chromiumoxide::error::CdpError> for VitrinaError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Driver {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn navigation_timeout_display() {
        let err = VitrinaError::NavigationTimeout {
            url: "cart.html".to_string(),
            ms: 30_000,
        };
        assert_eq!(
            err.to_string(),
            "Navigation to cart.html timed out after 30000ms"
        );
    }

    #[test]
    fn unexpected_dialog_carries_both_texts() {
        let err = VitrinaError::UnexpectedDialog {
            expected: "Product added".to_string(),
            actual: "Out of stock".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Product added"));
        assert!(text.contains("Out of stock"));
    }

    #[test]
    fn not_found_names_the_target() {
        let err = VitrinaError::NotFound {
            what: "cart row \"Samsung galaxy s6\"".to_string(),
        };
        assert!(err.to_string().contains("Samsung galaxy s6"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VitrinaError = io.into();
        assert!(matches!(err, VitrinaError::Io(_)));
    }
}
