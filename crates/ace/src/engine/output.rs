//! Output types and result structures for ACE fits.
//!
//! ## Purpose
//!
//! This module defines the `AceResult` struct which holds everything a
//! finished ACE solve produced: the transformed response, one transform per
//! predictor, the error trajectory, the stopping reason, and diagnostics.
//!
//! ## Design notes
//!
//! * **Observation order**: Transform values are aligned with the input rows.
//! * **Generics**: Results are generic over `Float` types.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//! * **Non-fatal stops**: Hitting an iteration cap or stalling is recorded
//!   in `convergence`, never returned as an error.
//!
//! ## Invariants
//!
//! * `theta` and every `phis[i]` have one value per observation.
//! * `error_history` is non-increasing.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization (see the model layer).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::evaluation::diagnostics::Diagnostics;

/// Transform columns shown by `Display` before the table is abbreviated.
const MAX_DISPLAY_PHIS: usize = 4;

// ============================================================================
// Convergence
// ============================================================================

/// Why the alternating solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The relative decrease of the error fell below the outer tolerance.
    Converged,

    /// An outer iteration increased the error; the best state was restored.
    Stalled,

    /// The outer iteration cap was reached.
    IterationLimit,

    /// The response has no variance; θ is identically zero.
    ConstantResponse,
}

impl Convergence {
    /// Whether the solver met its convergence criterion.
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged)
    }

    /// Short name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            Convergence::Converged => "Converged",
            Convergence::Stalled => "Stalled",
            Convergence::IterationLimit => "Iteration limit",
            Convergence::ConstantResponse => "Constant response",
        }
    }
}

// ============================================================================
// Result Structure
// ============================================================================

/// Comprehensive ACE output containing transforms and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct AceResult<T> {
    /// θ(y_k) for each observation; mean zero, unit variance.
    pub theta: Vec<T>,

    /// φ_i(x_ik) for each predictor i and observation k; each mean zero.
    pub phis: Vec<Vec<T>>,

    /// Correlation between θ and Σφ at the final state.
    pub correlation: T,

    /// Error E[(θ − Σφ)²] after each accepted outer iteration.
    pub error_history: Vec<T>,

    /// Error after every outer iteration, including a final rejected one.
    pub outer_errors: Vec<T>,

    /// Number of outer iterations performed (including a rejected one).
    pub outer_iterations: usize,

    /// Total number of inner backfitting sweeps.
    pub inner_sweeps: usize,

    /// Stopping reason.
    pub convergence: Convergence,

    /// Fit-quality metrics of the final state.
    pub diagnostics: Diagnostics<T>,

    /// Number of smoother calls that fell back to the global line.
    pub smoother_fallbacks: usize,
}

impl<T: Float> AceResult<T> {
    /// Number of predictors.
    pub fn n_predictors(&self) -> usize {
        self.phis.len()
    }

    /// Number of observations.
    pub fn n_observations(&self) -> usize {
        self.theta.len()
    }

    /// Final value of the error criterion.
    pub fn final_error(&self) -> Option<T> {
        self.error_history.last().copied()
    }

    /// Σφ_i(x_ik) for each observation.
    pub fn sum_phi(&self) -> Vec<T> {
        let mut sum = vec![T::zero(); self.theta.len()];
        for phi in &self.phis {
            for (s, &v) in sum.iter_mut().zip(phi.iter()) {
                *s = *s + v;
            }
        }
        sum
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for AceResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Observations: {}", self.n_observations())?;
        writeln!(f, "  Predictors:   {}", self.n_predictors())?;
        writeln!(f, "  Status:       {}", self.convergence.name())?;
        writeln!(f, "  Outer iters:  {}", self.outer_iterations)?;
        writeln!(f, "  Inner sweeps: {}", self.inner_sweeps)?;
        if let Some(err) = self.final_error() {
            writeln!(f, "  Final error:  {:.6}", err)?;
        }
        if self.smoother_fallbacks > 0 {
            writeln!(f, "  Fallbacks:    {}", self.smoother_fallbacks)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.diagnostics)?;

        writeln!(f, "Transforms:")?;

        let shown = self.phis.len().min(MAX_DISPLAY_PHIS);
        write!(f, "{:>6} {:>12}", "Row", "Theta")?;
        for i in 0..shown {
            write!(f, " {:>12}", format!("Phi_{i}"))?;
        }
        if self.phis.len() > shown {
            write!(f, " {:>6}", "...")?;
        }
        writeln!(f)?;
        writeln!(f, "{:-<width$}", "", width = 19 + 13 * shown)?;

        // Data rows (show first 10 and last 10 if more than 20 points)
        let n = self.theta.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>6}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>6} {:>12.6}", idx, self.theta[idx])?;
            for phi in self.phis.iter().take(shown) {
                write!(f, " {:>12.6}", phi[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
