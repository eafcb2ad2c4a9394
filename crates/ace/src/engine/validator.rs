//! Input validation for ACE configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for ACE configuration
//! parameters and input data. It checks requirements such as column
//! lengths, finite values, and parameter bounds before any iteration starts.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: Spans in (0, 1], bass enhancement in [0, 10],
//!   positive tolerances, iteration caps in [1, 10000].
//! * **Finite Checks**: Ensures all inputs are finite (no NaN/Inf).
//! * **Regression Requirements**: Ensures at least 2 observations.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::WLSSolver;
use crate::algorithms::smoother::{SmootherKind, check_span};
use crate::engine::executor::AceConfig;
use crate::primitives::errors::AceError;

/// Largest accepted iteration cap.
const MAX_ITERATIONS: usize = 10_000;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for ACE configuration and input data.
///
/// All methods return `Result<(), AceError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate predictor columns and response for an ACE fit.
    pub fn validate_inputs<T: Float>(x: &[Vec<T>], y: &[T]) -> Result<(), AceError> {
        // Check 1: At least one predictor
        if x.is_empty() {
            return Err(AceError::NoPredictors);
        }

        // Check 2: Non-empty response
        let n = y.len();
        if n == 0 {
            return Err(AceError::EmptyInput);
        }

        // Check 3: Matching lengths
        for (i, col) in x.iter().enumerate() {
            if col.len() != n {
                return Err(AceError::MismatchedInputs {
                    predictor: i,
                    x_len: col.len(),
                    y_len: n,
                });
            }
        }

        // Check 4: Sufficient points for a line
        if n < 2 {
            return Err(AceError::TooFewPoints { got: n, min: 2 });
        }

        // Check 5: All values finite
        if let Some(k) = y.iter().position(|v| !v.is_finite()) {
            Self::validate_scalar(y[k], &format!("y[{k}]"))?;
        }
        for (i, col) in x.iter().enumerate() {
            if let Some(k) = col.iter().position(|v| !v.is_finite()) {
                Self::validate_scalar(col[k], &format!("x{i}[{k}]"))?;
            }
        }

        Ok(())
    }

    /// Validate a single numeric value for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str) -> Result<(), AceError> {
        if !val.is_finite() {
            return Err(AceError::InvalidNumericValue(format!(
                "{}={}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate an evaluation point against the fitted dimensionality.
    pub fn validate_point<T: Float>(point: &[T], expected: usize) -> Result<(), AceError> {
        if point.len() != expected {
            return Err(AceError::DimensionMismatch {
                expected,
                got: point.len(),
            });
        }
        for (i, &v) in point.iter().enumerate() {
            Self::validate_scalar(v, &format!("x{i}"))?;
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a smoothing span.
    pub fn validate_span<T: Float>(span: T) -> Result<(), AceError> {
        check_span(span)
    }

    /// Validate the smoother selected for a fit.
    pub fn validate_smoother<T: WLSSolver>(smoother: &SmootherKind<T>) -> Result<(), AceError> {
        match smoother {
            SmootherKind::FixedSpan(s) => Self::validate_span(s.span),
            SmootherKind::Adaptive(s) => s.config.validate(),
        }
    }

    /// Validate a convergence tolerance.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), AceError> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(AceError::InvalidTolerance(
                tol.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate an iteration cap.
    pub fn validate_iterations(iterations: usize) -> Result<(), AceError> {
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(AceError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate a complete solver configuration.
    pub fn validate_config<T: WLSSolver>(config: &AceConfig<T>) -> Result<(), AceError> {
        Self::validate_smoother(&config.smoother)?;
        Self::validate_tolerance(config.inner_tolerance)?;
        Self::validate_tolerance(config.outer_tolerance)?;
        Self::validate_iterations(config.max_inner_iterations)?;
        Self::validate_iterations(config.max_outer_iterations)?;
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), AceError> {
        if let Some(param) = duplicate_param {
            return Err(AceError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
