//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from parameter validation and price aggregation

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for simulation setup and aggregation
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidParameter`: A simulation input violates its domain
/// - `EmptyInput`: An aggregation was asked to average zero samples
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid("volatility", "must be positive, got -0.2");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'volatility': must be positive, got -0.2"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid simulation input.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },

    /// Division by a zero sample count.
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

impl PricingError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Creates an `EmptyInput` error.
    pub fn empty(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PricingError::invalid("num_paths", "must be at least 1, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'num_paths': must be at least 1, got 0"
        );
    }

    #[test]
    fn test_empty_input_display() {
        let err = PricingError::empty("no terminal prices to average");
        assert_eq!(err.to_string(), "Empty input: no terminal prices to average");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::empty("x");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = PricingError::invalid("volatility", "must be positive");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
