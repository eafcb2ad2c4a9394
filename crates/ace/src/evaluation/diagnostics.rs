//! Diagnostic metrics for ACE fit quality assessment.
//!
//! ## Purpose
//!
//! This module summarizes how well the sum of predictor transforms Σφ_i(x_i)
//! reproduces the transformed response θ(y) once a fit has finished.
//!
//! ## Design notes
//!
//! * **Residual-based**: Metrics are computed from residuals θ − Σφ.
//! * **Scale**: θ has unit variance after a fit, so RMSE² is the ACE error
//!   criterion and R² is one minus it.
//! * **Generics**: All computations are generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Residual Metrics**: RMSE and MAE measure prediction error.
//! * **Goodness-of-Fit**: R² measures variance of θ explained by Σφ.
//! * **Maximal correlation**: corr(θ, Σφ), the quantity ACE maximizes.
//!
//! ## Invariants
//!
//! * Error metrics (RMSE, MAE, residual SD) are non-negative.
//! * R² <= 1 and |correlation| <= 1.
//!
//! ## Non-goals
//!
//! * This module does not perform the fitting.
//! * This module does not provide p-values or formal hypothesis tests.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::math::moments::{correlation, mean, std_dev};

// ============================================================================
// Diagnostics Structure
// ============================================================================

/// Diagnostic metrics for assessing an ACE fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics<T> {
    /// Root Mean Squared Error of θ − Σφ.
    pub rmse: T,

    /// Mean Absolute Error of θ − Σφ.
    pub mae: T,

    /// Coefficient of determination of θ by Σφ.
    pub r_squared: T,

    /// Pearson correlation between θ and Σφ.
    pub correlation: T,

    /// Standard deviation of the residuals.
    pub residual_sd: T,
}

impl<T: Float> Diagnostics<T> {
    /// Compute diagnostics from the transformed response and the fitted sum.
    pub fn compute(theta: &[T], sum_phi: &[T]) -> Self {
        let n = theta.len().min(sum_phi.len());
        let (theta, sum_phi) = (&theta[..n], &sum_phi[..n]);
        let residuals: Vec<T> = theta
            .iter()
            .zip(sum_phi.iter())
            .map(|(&t, &s)| t - s)
            .collect();

        Self {
            rmse: Self::calculate_rmse(&residuals),
            mae: Self::calculate_mae(&residuals),
            r_squared: Self::calculate_r_squared(theta, &residuals),
            correlation: correlation(theta, sum_phi),
            residual_sd: std_dev(&residuals),
        }
    }

    // ========================================================================
    // Error Metrics
    // ========================================================================

    /// RMSE = sqrt((1/n) Σ r_i²).
    pub fn calculate_rmse(residuals: &[T]) -> T {
        let squares: Vec<T> = residuals.iter().map(|&r| r * r).collect();
        mean(&squares).sqrt()
    }

    /// MAE = (1/n) Σ |r_i|.
    pub fn calculate_mae(residuals: &[T]) -> T {
        let abs: Vec<T> = residuals.iter().map(|&r| r.abs()).collect();
        mean(&abs)
    }

    // ========================================================================
    // Goodness-of-Fit Metrics
    // ========================================================================

    /// R² = 1 − SS_res / SS_tot.
    ///
    /// A response with no variance counts as perfectly explained when the
    /// residuals vanish too, and as unexplained otherwise.
    pub fn calculate_r_squared(target: &[T], residuals: &[T]) -> T {
        let mu = mean(target);
        let ss_tot = target.iter().fold(T::zero(), |acc, &t| {
            let d = t - mu;
            acc + d * d
        });
        let ss_res = residuals.iter().fold(T::zero(), |acc, &r| acc + r * r);

        if ss_tot == T::zero() {
            if ss_res == T::zero() {
                T::one()
            } else {
                T::zero()
            }
        } else {
            T::one() - ss_res / ss_tot
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for Diagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "ACE Diagnostics:")?;
        writeln!(f, "  RMSE:         {:.6}", self.rmse)?;
        writeln!(f, "  MAE:          {:.6}", self.mae)?;
        writeln!(f, "  R²:           {:.6}", self.r_squared)?;
        writeln!(f, "  Correlation:  {:.6}", self.correlation)?;
        writeln!(f, "  Residual SD:  {:.6}", self.residual_sd)?;
        Ok(())
    }
}
