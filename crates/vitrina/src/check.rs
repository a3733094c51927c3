//! Checks for scenario flows.
//!
//! Flows return `Result` instead of panicking so the runner can attach
//! diagnostics (last URL, screenshot) to a failure before it surfaces.

use std::fmt::Debug;

use crate::result::{VitrinaError, VitrinaResult};

/// Require a condition, failing with the given message otherwise.
///
/// # Errors
///
/// Returns [`VitrinaError::AssertionFailed`] when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> VitrinaResult<()> {
    if condition {
        Ok(())
    } else {
        Err(VitrinaError::AssertionFailed {
            message: message.into(),
        })
    }
}

/// Require two values to be equal.
///
/// # Errors
///
/// Returns [`VitrinaError::AssertionFailed`] naming both values.
pub fn ensure_eq<T: PartialEq + Debug>(expected: &T, actual: &T, context: &str) -> VitrinaResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(VitrinaError::AssertionFailed {
            message: format!("{context}: expected {expected:?}, got {actual:?}"),
        })
    }
}

/// Require a string to contain a substring.
///
/// # Errors
///
/// Returns [`VitrinaError::AssertionFailed`] quoting both strings.
pub fn ensure_contains(haystack: &str, needle: &str) -> VitrinaResult<()> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(VitrinaError::AssertionFailed {
            message: format!("expected {haystack:?} to contain {needle:?}"),
        })
    }
}

/// Require two floats to agree within an absolute tolerance.
///
/// # Errors
///
/// Returns [`VitrinaError::AssertionFailed`] with both values.
pub fn ensure_approx(expected: f64, actual: f64, tolerance: f64) -> VitrinaResult<()> {
    if (expected - actual).abs() <= tolerance {
        Ok(())
    } else {
        Err(VitrinaError::AssertionFailed {
            message: format!("expected {actual} to be within {tolerance} of {expected}"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn ensure_passes_and_fails() {
        assert!(ensure(true, "fine").is_ok());
        let err = ensure(false, "cart should be empty").unwrap_err();
        assert!(err.to_string().contains("cart should be empty"));
    }

    #[test]
    fn ensure_eq_reports_both_sides() {
        assert!(ensure_eq(&1, &1, "count").is_ok());
        let err = ensure_eq(&1, &2, "count").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("count"));
        assert!(text.contains('1'));
        assert!(text.contains('2'));
    }

    #[test]
    fn ensure_contains_quotes_the_needle() {
        assert!(ensure_contains("Thank you for your purchase!", "Thank you").is_ok());
        let err = ensure_contains("Out of stock", "Thank you").unwrap_err();
        assert!(err.to_string().contains("Thank you"));
    }

    #[test]
    fn ensure_approx_respects_the_tolerance() {
        assert!(ensure_approx(790.0, 790.009, 0.01).is_ok());
        assert!(ensure_approx(790.0, 790.02, 0.01).is_err());
    }
}
