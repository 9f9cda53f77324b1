//! Error types for the relativity calculator.

/// Result alias used by every calculator function.
pub type Result<T> = std::result::Result<T, RelativityError>;

/// Errors raised when an input or result leaves the physically valid range.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RelativityError {
    /// Input outside its valid physical domain (β ≥ 1, negative mass, NaN).
    #[error("{quantity} = {value} is outside its valid domain ({expected})")]
    Domain {
        /// Name of the offending input.
        quantity: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the valid range.
        expected: &'static str,
    },

    /// A derived result is too large to represent or plot.
    #[error("{quantity} overflowed the representable range")]
    NumericOverflow {
        /// Name of the quantity that overflowed.
        quantity: &'static str,
    },
}

impl RelativityError {
    /// `true` for input validation failures.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}

/// Reject NaN, infinities and negative values.
pub(crate) fn non_negative(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RelativityError::Domain {
            quantity,
            value,
            expected: "finite and >= 0",
        })
    }
}

/// Reject NaN and infinities.
pub(crate) fn finite_input(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RelativityError::Domain {
            quantity,
            value,
            expected: "finite",
        })
    }
}

/// Turn a non-finite computed value into [`RelativityError::NumericOverflow`].
pub(crate) fn finite_result(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RelativityError::NumericOverflow { quantity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_rejects_nan_and_negatives() {
        assert!(non_negative("mass", -1.0).unwrap_err().is_domain());
        assert!(non_negative("mass", f64::NAN).unwrap_err().is_domain());
        assert!(non_negative("mass", f64::INFINITY).unwrap_err().is_domain());
        assert_eq!(non_negative("mass", 0.0), Ok(0.0));
    }

    #[test]
    fn overflow_is_not_a_domain_error() {
        let err = finite_result("total energy", f64::INFINITY).unwrap_err();
        assert!(!err.is_domain());
        assert_eq!(err.to_string(), "total energy overflowed the representable range");
    }
}
