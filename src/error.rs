//! Error types for tcalc operations.
//!
//! Every failure names the constraint that was violated so callers can
//! report it verbatim.

use std::fmt;

/// Main error type for tcalc operations.
///
/// # Examples
///
/// ```
/// use tcalc::error::TcalcError;
///
/// let err = TcalcError::insufficient_data("one-sample t-test", 2, 1);
/// assert!(err.to_string().contains("at least 2"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TcalcError {
    /// Input violates a precondition (too small, mismatched, empty, non-finite).
    InvalidInput {
        /// Operation or argument being validated
        context: String,
        /// Violated constraint
        reason: String,
    },

    /// Direction token outside {greater, less}.
    InvalidDirection(String),

    /// Test-type token outside {one-tailed, two-tailed}.
    InvalidTestType(String),

    /// A standard deviation or standard error is zero, so the statistic
    /// would be a division by zero.
    ZeroVariance {
        /// Quantity that has zero spread
        context: String,
    },

    /// A probability distribution could not be constructed.
    Distribution(String),
}

impl fmt::Display for TcalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TcalcError::InvalidInput { context, reason } => {
                write!(f, "Invalid input for {context}: {reason}")
            }
            TcalcError::InvalidDirection(token) => {
                write!(
                    f,
                    "Invalid direction '{token}': expected 'greater' or 'less'"
                )
            }
            TcalcError::InvalidTestType(token) => {
                write!(
                    f,
                    "Invalid test type '{token}': expected 'one-tailed' or 'two-tailed'"
                )
            }
            TcalcError::ZeroVariance { context } => {
                write!(
                    f,
                    "Zero variance in {context}: standard error is 0, t-statistic undefined"
                )
            }
            TcalcError::Distribution(msg) => write!(f, "Distribution error: {msg}"),
        }
    }
}

impl std::error::Error for TcalcError {}

impl TcalcError {
    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(context: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            context: context.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an error for a sample that is smaller than required.
    #[must_use]
    pub fn insufficient_data(context: &str, required: usize, actual: usize) -> Self {
        Self::invalid_input(
            context,
            format!("requires at least {required} observations, got {actual}"),
        )
    }

    /// Create a zero-variance error.
    #[must_use]
    pub fn zero_variance(context: &str) -> Self {
        Self::ZeroVariance {
            context: context.to_string(),
        }
    }

    /// Wrap a distribution-construction failure.
    #[must_use]
    pub fn distribution(err: impl fmt::Display) -> Self {
        Self::Distribution(err.to_string())
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::invalid_input(context, "input is empty")
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, TcalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = TcalcError::invalid_input("paired t-test", "samples differ in length (5 vs 4)");
        let msg = err.to_string();
        assert!(msg.contains("paired t-test"));
        assert!(msg.contains("5 vs 4"));
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = TcalcError::insufficient_data("one-sample t-test", 2, 1);
        assert_eq!(
            err.to_string(),
            "Invalid input for one-sample t-test: requires at least 2 observations, got 1"
        );
    }

    #[test]
    fn test_invalid_direction_display() {
        let err = TcalcError::InvalidDirection("sideways".to_string());
        assert!(err.to_string().contains("sideways"));
        assert!(err.to_string().contains("'greater' or 'less'"));
    }

    #[test]
    fn test_invalid_test_type_display() {
        let err = TcalcError::InvalidTestType("three-tailed".to_string());
        assert!(err.to_string().contains("three-tailed"));
    }

    #[test]
    fn test_zero_variance_display() {
        let err = TcalcError::zero_variance("paired differences");
        assert!(err.to_string().contains("paired differences"));
        assert!(err.to_string().contains("Zero variance"));
    }

    #[test]
    fn test_empty_input() {
        let err = TcalcError::empty_input("sample");
        assert!(matches!(err, TcalcError::InvalidInput { .. }));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(TcalcError::Distribution("df".into()));
        assert!(err.to_string().starts_with("Distribution error"));
    }
}
