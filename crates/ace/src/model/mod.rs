//! Layer 6: Model
//!
//! # Purpose
//!
//! This layer wraps the solver in a regression model: fit transforms from
//! arrays or a text file, predict the response at new predictor vectors, and
//! export the learned transform tables.
//!
//! # Prediction
//!
//! A prediction sums each predictor's transform, interpolated at the new
//! value, and maps the sum back through the inverse of θ. Both steps clamp
//! outside the fitted range.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Model ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Delimited text input and transform export.
#[cfg(feature = "std")]
pub mod io;

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

// External dependencies
use log::debug;

// Internal dependencies
use crate::algorithms::regression::WLSSolver;
use crate::algorithms::transform::Transform;
use crate::engine::executor::{AceConfig, AceExecutor};
use crate::engine::output::AceResult;
use crate::engine::validator::Validator;
use crate::primitives::errors::AceError;

// ============================================================================
// Fitted State
// ============================================================================

/// Everything a fit leaves behind for prediction.
#[derive(Debug, Clone)]
struct Fitted<T> {
    result: AceResult<T>,
    phis: Vec<Transform<T>>,
    theta: Transform<T>,
    theta_inverse: Transform<T>,
}

impl<T: WLSSolver> Fitted<T> {
    fn new(x: &[Vec<T>], y: &[T], result: AceResult<T>) -> Self {
        let phis = x
            .iter()
            .zip(result.phis.iter())
            .map(|(col, phi)| Transform::from_pairs(col, phi))
            .collect();
        let theta = Transform::from_pairs(y, &result.theta);
        let theta_inverse = theta.inverse();
        Self {
            result,
            phis,
            theta,
            theta_inverse,
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// ACE regression model.
///
/// Created by [`AceBuilder::build`](crate::api::AceBuilder::build).
#[derive(Debug, Clone)]
pub struct AceModel<T> {
    executor: AceExecutor<T>,
    fitted: Option<Fitted<T>>,
}

impl<T> AceModel<T>
where
    T: WLSSolver + Send + Sync + 'static,
{
    /// Create an unfitted model from a validated configuration.
    pub fn new(config: AceConfig<T>) -> Self {
        Self {
            executor: AceExecutor::new(config),
            fitted: None,
        }
    }

    /// Solver configuration.
    pub fn config(&self) -> &AceConfig<T> {
        &self.executor.config
    }

    /// Whether `fit` has succeeded at least once.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    // ========================================================================
    // Fitting
    // ========================================================================

    /// Fit transforms to predictor columns `x` and response `y`.
    ///
    /// A failed fit leaves any previous fit in place.
    pub fn fit(&mut self, x: &[Vec<T>], y: &[T]) -> Result<&AceResult<T>, AceError> {
        let result = self.executor.run(x, y)?;
        debug!(
            "ace: fitted {} predictors on {} observations ({})",
            x.len(),
            y.len(),
            result.convergence.name()
        );
        let fitted = self.fitted.insert(Fitted::new(x, y, result));
        Ok(&fitted.result)
    }

    /// Fit from a whitespace-delimited file whose last column is the response.
    #[cfg(feature = "std")]
    pub fn fit_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&AceResult<T>, AceError> {
        let table = io::read_file::<T, _>(path)?;
        self.fit(&table.x, &table.y)
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    fn fitted(&self) -> Result<&Fitted<T>, AceError> {
        self.fitted.as_ref().ok_or(AceError::NotFitted)
    }

    /// Σφ_i(x_i) at a new predictor vector.
    pub fn transformed_response(&self, point: &[T]) -> Result<T, AceError> {
        let fitted = self.fitted()?;
        Validator::validate_point(point, fitted.phis.len())?;
        Ok(fitted
            .phis
            .iter()
            .zip(point.iter())
            .fold(T::zero(), |acc, (phi, &v)| acc + phi.evaluate(v)))
    }

    /// Predicted response at a new predictor vector: θ⁻¹(Σφ_i(x_i)).
    pub fn evaluate(&self, point: &[T]) -> Result<T, AceError> {
        let sum = self.transformed_response(point)?;
        Ok(self.fitted()?.theta_inverse.evaluate(sum))
    }

    /// Predicted responses at many predictor vectors (one per row).
    pub fn evaluate_many(&self, points: &[Vec<T>]) -> Result<Vec<T>, AceError> {
        points.iter().map(|p| self.evaluate(p)).collect()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Result of the last successful fit.
    pub fn result(&self) -> Option<&AceResult<T>> {
        self.fitted.as_ref().map(|f| &f.result)
    }

    /// Predictor transforms, one per column.
    pub fn phi_transforms(&self) -> Result<&[Transform<T>], AceError> {
        Ok(&self.fitted()?.phis)
    }

    /// Response transform θ.
    pub fn theta_transform(&self) -> Result<&Transform<T>, AceError> {
        Ok(&self.fitted()?.theta)
    }

    /// Write `phi_{i}.txt` for each predictor and `theta.txt` into `dir`.
    #[cfg(feature = "std")]
    pub fn write_transforms<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>, AceError>
    where
        T: core::fmt::Display,
    {
        let fitted = self.fitted()?;
        io::write_transforms(dir, &fitted.phis, &fitted.theta)
    }
}
