//! Error types for ACE operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur while configuring a
//! smoother or solver, validating input data, fitting, evaluating a fitted
//! model, or reading and writing transform tables.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Builder misuse is recorded and surfaced when `build()` is called.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty arrays, mismatched lengths, non-finite values.
//! 2. **Parameter validation**: Invalid spans, enhancement, tolerances or iteration caps.
//! 3. **Model state**: Evaluating before fitting, wrong predictor dimensionality.
//! 4. **I/O**: Unreadable files and unparsable rows.
//!
//! ## Invariants
//!
//! * Numerical degeneracies (zero-variance windows, constant responses) are
//!   never reported through this type; they are handled by fallbacks and
//!   surfaced on the results.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for ACE operations.
#[derive(Debug, Clone, PartialEq)]
pub enum AceError {
    /// Input arrays are empty.
    EmptyInput,

    /// At least one predictor column is required.
    NoPredictors,

    /// A predictor column and the response must have the same number of elements.
    MismatchedInputs {
        /// Index of the offending predictor column.
        predictor: usize,
        /// Number of elements in the predictor column.
        x_len: usize,
        /// Number of elements in the response.
        y_len: usize,
    },

    /// Number of observations is below the minimum requirement.
    TooFewPoints {
        /// Number of points provided.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Smoothing span must be in the range (0, 1].
    InvalidSpan(f64),

    /// Candidate spans must contain at least two strictly increasing values.
    UnorderedSpans,

    /// Bass enhancement must lie in [0, 10].
    InvalidBassEnhancement(f64),

    /// Convergence tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// Iteration caps must be in [1, 10000].
    InvalidIterations(usize),

    /// Evaluation input does not match the number of fitted predictors.
    DimensionMismatch {
        /// Number of predictors the model was fitted with.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// The model has not been fitted yet.
    NotFitted,

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// A row of a delimited text source could not be parsed.
    Parse {
        /// One-based line number of the offending row.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Underlying I/O failure while reading or writing a text source.
    Io(String),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for AceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::NoPredictors => write!(f, "At least one predictor column is required"),
            Self::MismatchedInputs {
                predictor,
                x_len,
                y_len,
            } => {
                write!(
                    f,
                    "Length mismatch: predictor {predictor} has {x_len} points, response has {y_len}"
                )
            }
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidSpan(span) => write!(f, "Invalid span: {span} (must be > 0 and <= 1)"),
            Self::UnorderedSpans => write!(
                f,
                "Invalid span set: need at least two strictly increasing spans"
            ),
            Self::InvalidBassEnhancement(alpha) => {
                write!(f, "Invalid bass enhancement: {alpha} (must be in [0, 10])")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and finite)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [1, 10000])")
            }
            Self::DimensionMismatch { expected, got } => {
                write!(
                    f,
                    "Dimension mismatch: model has {expected} predictors, got {got} values"
                )
            }
            Self::NotFitted => write!(f, "Model has not been fitted"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::Parse { line, message } => write!(f, "Parse error on line {line}: {message}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for AceError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for AceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
