//! Error types and validation functions for sequence model fitting.
//!
//! All fallible operations in this crate return [`ModelResult`]. Validation
//! runs before any numeric work so that malformed models or mis-shaped data
//! never reach the dynamic-programming kernels.

use thiserror::Error;

/// Error types for sequence model construction, fitting, and inference.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum ModelError {
    /// Model parameters are structurally invalid (non-stochastic rows,
    /// emission-count mismatch, degenerate covariance). Always fatal:
    /// fitting, decoding, and sampling must not proceed.
    #[error("Invalid model configuration: {reason}")]
    InvalidConfiguration {
        /// What failed validation
        reason: String,
    },

    /// Observation data is incompatible with the model's dimensionality.
    #[error("Dimension mismatch for {parameter}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Parameter or data field with the wrong shape
        parameter: String,
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// A scalar parameter is outside its valid range.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// Too few observations for the requested operation.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum required observations
        required: usize,
        /// Actual number of observations provided
        actual: usize,
    },

    /// Numerical computation failed (singular covariance, non-finite
    /// likelihood).
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for the failure
        reason: String,
    },
}

/// Result type for sequence model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Validates that an observation sequence has sufficient length.
///
/// # Example
/// ```rust
/// use sequence_models::errors::validate_data_length;
///
/// assert!(validate_data_length(3, 2, "fit").is_ok());
/// assert!(validate_data_length(1, 2, "fit").is_err());
/// ```
pub fn validate_data_length(actual: usize, min_required: usize, _operation: &str) -> ModelResult<()> {
    if actual < min_required {
        Err(ModelError::InsufficientData {
            required: min_required,
            actual,
        })
    } else {
        Ok(())
    }
}

/// Validates that a value is finite.
pub fn validate_finite(value: f64, name: &str) -> ModelResult<()> {
    if !value.is_finite() {
        Err(ModelError::NumericalError {
            reason: format!("{} is not finite: {}", name, value),
        })
    } else {
        Ok(())
    }
}

/// Validates that every value in a slice is finite.
///
/// Returns on the first non-finite value with its index for diagnosis.
pub fn validate_all_finite(data: &[f64], name: &str) -> ModelResult<()> {
    if let Some((i, &value)) = data.iter().enumerate().find(|(_, &v)| !v.is_finite()) {
        return Err(ModelError::NumericalError {
            reason: format!("{} contains non-finite value at index {}: {}", name, i, value),
        });
    }
    Ok(())
}

/// Tolerance for probability-sum checks.
pub(crate) const PROB_SUM_TOLERANCE: f64 = 1e-6;

/// Validates that a slice is a probability vector: entries in [0, 1] and
/// summing to 1 within tolerance.
///
/// Exact zeros are allowed; log-space computation handles them by
/// propagating negative infinity.
pub fn validate_probability_vector(probs: &[f64], name: &str) -> ModelResult<()> {
    for (i, &p) in probs.iter().enumerate() {
        if !(0.0..=1.0).contains(&p) || p.is_nan() {
            return Err(ModelError::InvalidConfiguration {
                reason: format!("{}[{}] = {} is not a probability in [0, 1]", name, i, p),
            });
        }
    }
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > PROB_SUM_TOLERANCE {
        return Err(ModelError::InvalidConfiguration {
            reason: format!("{} sums to {}, expected ~1.0", name, sum),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_data_length() {
        assert!(validate_data_length(5, 3, "test").is_ok());
        assert!(validate_data_length(3, 3, "test").is_ok());

        match validate_data_length(2, 5, "test") {
            Err(ModelError::InsufficientData { required, actual }) => {
                assert_eq!(required, 5);
                assert_eq!(actual, 2);
            }
            _ => panic!("Expected InsufficientData error"),
        }
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite(1.0, "x").is_ok());
        assert!(validate_finite(f64::NAN, "x").is_err());
        assert!(validate_finite(f64::INFINITY, "x").is_err());
        assert!(validate_finite(f64::NEG_INFINITY, "x").is_err());
    }

    #[test]
    fn test_validate_all_finite_reports_index() {
        let bad = vec![1.0, 2.0, f64::NAN, 4.0];
        match validate_all_finite(&bad, "obs") {
            Err(ModelError::NumericalError { reason }) => {
                assert!(reason.contains("index 2"));
                assert!(reason.contains("obs"));
            }
            _ => panic!("Expected NumericalError"),
        }
        assert!(validate_all_finite(&[], "obs").is_ok());
    }

    #[test]
    fn test_validate_probability_vector() {
        assert!(validate_probability_vector(&[0.5, 0.5], "pi").is_ok());
        // Exact zeros are valid
        assert!(validate_probability_vector(&[1.0, 0.0], "pi").is_ok());
        // Negative entry
        assert!(validate_probability_vector(&[-0.1, 1.1], "pi").is_err());
        // Bad sum
        assert!(validate_probability_vector(&[0.3, 0.3], "pi").is_err());
    }

    #[test]
    fn test_error_display_formatting() {
        let err = ModelError::DimensionMismatch {
            parameter: "observation".to_string(),
            expected: 2,
            actual: 3,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("observation"));
        assert!(msg.contains("2"));
        assert!(msg.contains("3"));

        let err = ModelError::InvalidConfiguration {
            reason: "row 1 of transition matrix sums to 0.9".to_string(),
        };
        assert!(format!("{}", err).contains("transition matrix"));
    }
}
