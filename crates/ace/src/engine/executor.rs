//! Execution engine for ACE fits.
//!
//! ## Purpose
//!
//! This module provides the alternating conditional expectation solver. It
//! estimates a transform θ of the response and a transform φ_i of every
//! predictor so that E[(θ(y) − Σφ_i(x_i))²] is minimal subject to θ having
//! unit variance, by alternating two smoothing steps:
//!
//! * **Backfitting (inner loop)**: each φ_i is replaced by the smooth of the
//!   partial residual θ − Σ_{j≠i} φ_j against x_i, then centered.
//! * **Response update (outer loop)**: θ is replaced by the smooth of Σφ_i
//!   against y, centered and scaled to unit variance.
//!
//! ## Design notes
//!
//! * Every column is sorted once per fit; smooths gather into and scatter
//!   out of the sorted order through `AceBuffer`.
//! * The smoother is an explicit `SmootherKind` chosen at construction.
//! * Sequential sweeps use each new φ_i immediately (Gauss-Seidel). Jacobi
//!   sweeps compute all φ_i from the same residual and may run in parallel.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * θ has mean zero and unit population variance after every update.
//! * Every φ_i has mean zero.
//! * Accepted outer errors never increase; an increase ends the solve and
//!   restores the best state.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration (handled by `validator`).
//! * This module does not evaluate transforms at new points (model layer).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use log::{debug, info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::regression::WLSSolver;
use crate::algorithms::smoother::{SmootherFallback, SmootherKind};
use crate::engine::output::{AceResult, Convergence};
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::Diagnostics;
use crate::math::moments::{center, correlation, mean_squared_difference, std_dev};
use crate::primitives::buffer::AceBuffer;
use crate::primitives::errors::AceError;
use crate::primitives::sorting::{gather_into, unsort_into};

// ============================================================================
// Configuration
// ============================================================================

/// Order in which predictor transforms are updated within a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepOrder {
    /// Update φ_1, …, φ_p in turn, each seeing the previous updates.
    #[default]
    Sequential,

    /// Update all φ_i from the same partial residual.
    ///
    /// With the `parallel` feature the p smooths run on the rayon pool.
    Jacobi,
}

/// Configuration for an ACE solve.
#[derive(Debug, Clone, PartialEq)]
pub struct AceConfig<T> {
    /// Smoother used for every transform update.
    pub smoother: SmootherKind<T>,

    /// Fractional error decrease below which backfitting stops.
    pub inner_tolerance: T,

    /// Fractional error decrease below which the solver has converged.
    pub outer_tolerance: T,

    /// Maximum backfitting sweeps per outer iteration.
    pub max_inner_iterations: usize,

    /// Maximum outer iterations.
    pub max_outer_iterations: usize,

    /// Update order within a sweep.
    pub sweep: SweepOrder,
}

impl<T: WLSSolver> Default for AceConfig<T> {
    fn default() -> Self {
        Self {
            smoother: SmootherKind::default(),
            inner_tolerance: T::from(1e-4).unwrap(),
            outer_tolerance: T::from(1e-5).unwrap(),
            max_inner_iterations: 50,
            max_outer_iterations: 200,
            sweep: SweepOrder::default(),
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

// Counters accumulated over one solve.
#[derive(Debug, Default)]
struct SolveStats {
    inner_sweeps: usize,
    fallbacks: usize,
}

/// The alternating solver.
#[derive(Debug, Clone)]
pub struct AceExecutor<T> {
    /// Solver configuration.
    pub config: AceConfig<T>,
}

impl<T> AceExecutor<T>
where
    T: WLSSolver + Send + Sync + 'static,
{
    /// Create an executor from a configuration.
    pub fn new(config: AceConfig<T>) -> Self {
        Self { config }
    }

    // ========================================================================
    // Main Entry Points
    // ========================================================================

    /// Validate inputs and configuration, then solve.
    ///
    /// `x[i]` is the i-th predictor column; all columns and `y` share the
    /// observation order.
    pub fn run(&self, x: &[Vec<T>], y: &[T]) -> Result<AceResult<T>, AceError> {
        Validator::validate_config(&self.config)?;
        Validator::validate_inputs(x, y)?;
        Ok(self.solve(x, y))
    }

    /// Solve on validated inputs.
    pub fn solve(&self, x: &[Vec<T>], y: &[T]) -> AceResult<T> {
        let n = y.len();
        let p = x.len();
        let mut buffer = AceBuffer::new(x, y);
        let mut stats = SolveStats::default();

        // θ starts as the standardized response.
        let mut theta = y.to_vec();
        let offset = center(&mut theta);
        let scale = std_dev(&theta);
        if scale <= T::epsilon() * offset.abs().max(T::one()) {
            warn!("ace: response has zero variance over {n} observations; θ is constant");
            return Self::constant_result(n, p);
        }
        for t in theta.iter_mut() {
            *t = *t / scale;
        }

        let mut phis = vec![vec![T::zero(); n]; p];

        let mut best_error = T::one();
        let mut best_theta = theta.clone();
        let mut best_phis = phis.clone();
        let mut history = Vec::new();
        let mut outer_errors = Vec::new();
        let mut last_decrease = T::zero();
        let mut convergence = Convergence::IterationLimit;
        let mut outer = 0;

        for iter in 0..self.config.max_outer_iterations {
            outer = iter + 1;

            let inner_error = self.backfit(&mut buffer, &theta, &mut phis, &mut stats);
            debug!(
                "ace: backfitting finished at error {:.6e}",
                inner_error.to_f64().unwrap_or(f64::NAN)
            );
            Self::sum_into(&phis, &mut buffer.sum_phi);
            self.update_theta(&mut buffer, &mut theta, &mut stats);

            let error = mean_squared_difference(&theta, &buffer.sum_phi);
            info!(
                "ace: outer iteration {outer}: error {:.6e}",
                error.to_f64().unwrap_or(f64::NAN)
            );

            outer_errors.push(error);

            if error > best_error {
                convergence = Self::rise_status(
                    best_error,
                    error,
                    last_decrease,
                    self.config.outer_tolerance,
                );
                if convergence == Convergence::Stalled {
                    warn!(
                        "ace: error rose from {:.6e} to {:.6e}; restoring iteration {}",
                        best_error.to_f64().unwrap_or(f64::NAN),
                        error.to_f64().unwrap_or(f64::NAN),
                        history.len()
                    );
                } else {
                    info!(
                        "ace: error settled at {:.6e}; restoring iteration {}",
                        best_error.to_f64().unwrap_or(f64::NAN),
                        history.len()
                    );
                }
                theta = best_theta;
                phis = best_phis;
                break;
            }

            let decrease = if best_error > T::zero() {
                (best_error - error) / best_error
            } else {
                T::zero()
            };

            history.push(error);
            last_decrease = best_error - error;
            best_error = error;
            best_theta.clone_from(&theta);
            best_phis.clone_from(&phis);

            if decrease <= self.config.outer_tolerance {
                convergence = Convergence::Converged;
                break;
            }
        }

        if convergence == Convergence::IterationLimit {
            warn!(
                "ace: stopped after {} outer iterations without converging",
                self.config.max_outer_iterations
            );
        }

        Self::sum_into(&phis, &mut buffer.sum_phi);
        let sum_phi: &[T] = &buffer.sum_phi;

        AceResult {
            correlation: correlation(&theta, sum_phi),
            diagnostics: Diagnostics::compute(&theta, sum_phi),
            theta,
            phis,
            error_history: history,
            outer_errors,
            outer_iterations: outer,
            inner_sweeps: stats.inner_sweeps,
            convergence,
            smoother_fallbacks: stats.fallbacks,
        }
    }

    /// Stopping reason for an outer iteration that raised the error from
    /// `best` to `error`.
    ///
    /// Near a fixed point the supersmoother's own noise moves the error by
    /// about as much as the iterations still gain, so a rise no larger than
    /// the last accepted decrease (or the outer tolerance) is convergence.
    /// Anything larger is a stall.
    pub fn rise_status(best: T, error: T, last_decrease: T, tolerance: T) -> Convergence {
        let rise = error - best;
        if rise <= last_decrease || rise <= tolerance * best {
            Convergence::Converged
        } else {
            Convergence::Stalled
        }
    }

    // ========================================================================
    // Inner Loop
    // ========================================================================

    /// Backfit the predictor transforms against the current θ.
    ///
    /// Returns the error E[(θ − Σφ)²] after the last sweep.
    fn backfit(
        &self,
        buffer: &mut AceBuffer<T>,
        theta: &[T],
        phis: &mut [Vec<T>],
        stats: &mut SolveStats,
    ) -> T {
        Self::sum_into(phis, &mut buffer.sum_phi);
        Self::residual_into(theta, &buffer.sum_phi, &mut buffer.residual);
        let mut previous = Self::mean_square(&buffer.residual);

        for sweep in 0..self.config.max_inner_iterations {
            stats.inner_sweeps += 1;
            match self.config.sweep {
                SweepOrder::Sequential => self.sequential_sweep(buffer, phis, stats),
                SweepOrder::Jacobi => {
                    self.jacobi_sweep(buffer, phis, stats);
                    Self::sum_into(phis, &mut buffer.sum_phi);
                    Self::residual_into(theta, &buffer.sum_phi, &mut buffer.residual);
                }
            }

            let error = Self::mean_square(&buffer.residual);
            debug!(
                "ace: sweep {}: error {:.6e}",
                sweep + 1,
                error.to_f64().unwrap_or(f64::NAN)
            );

            if previous <= T::zero() || error >= previous {
                break;
            }
            let decrease = (previous - error) / previous;
            previous = error;
            if decrease <= self.config.inner_tolerance {
                break;
            }
        }

        Self::mean_square(&buffer.residual)
    }

    // Gauss-Seidel: the residual is refreshed after every predictor.
    fn sequential_sweep(&self, buffer: &mut AceBuffer<T>, phis: &mut [Vec<T>], stats: &mut SolveStats) {
        for (i, phi) in phis.iter_mut().enumerate() {
            for ((t, &r), &f) in buffer.target.iter_mut().zip(buffer.residual.iter()).zip(phi.iter()) {
                *t = r + f;
            }

            let fallback = Self::smooth_along(
                &self.config.smoother,
                &buffer.orders[i],
                &buffer.sorted_x[i],
                &buffer.target,
                buffer.sorted_target.as_vec_mut(),
                phi,
            );
            if fallback.is_some() {
                stats.fallbacks += 1;
                debug!("ace: predictor {i}: smoother fell back to the global line");
            }

            for ((r, &t), &f) in buffer.residual.iter_mut().zip(buffer.target.iter()).zip(phi.iter()) {
                *r = t - f;
            }
        }
    }

    // Jacobi: every predictor is smoothed against the same residual.
    fn jacobi_sweep(&self, buffer: &AceBuffer<T>, phis: &mut [Vec<T>], stats: &mut SolveStats) {
        let residual: &[T] = &buffer.residual;
        let current: &[Vec<T>] = &*phis;

        let update = |i: usize| -> (Vec<T>, Option<SmootherFallback>) {
            let target: Vec<T> = residual
                .iter()
                .zip(current[i].iter())
                .map(|(&r, &f)| r + f)
                .collect();
            let mut scratch = Vec::with_capacity(target.len());
            let mut out = vec![T::zero(); target.len()];
            let fallback = Self::smooth_along(
                &self.config.smoother,
                &buffer.orders[i],
                &buffer.sorted_x[i],
                &target,
                &mut scratch,
                &mut out,
            );
            (out, fallback)
        };

        #[cfg(feature = "parallel")]
        let updates: Vec<(Vec<T>, Option<SmootherFallback>)> =
            (0..current.len()).into_par_iter().map(update).collect();
        #[cfg(not(feature = "parallel"))]
        let updates: Vec<(Vec<T>, Option<SmootherFallback>)> =
            (0..current.len()).map(update).collect();

        for (i, (phi, (new_phi, fallback))) in phis.iter_mut().zip(updates).enumerate() {
            if fallback.is_some() {
                stats.fallbacks += 1;
                debug!("ace: predictor {i}: smoother fell back to the global line");
            }
            *phi = new_phi;
        }
    }

    // ========================================================================
    // Outer Step
    // ========================================================================

    /// Replace θ by the normalized smooth of Σφ against y.
    ///
    /// A smooth with no variance leaves θ unchanged.
    fn update_theta(&self, buffer: &mut AceBuffer<T>, theta: &mut [T], stats: &mut SolveStats) {
        let fallback = Self::smooth_along(
            &self.config.smoother,
            &buffer.y_order,
            &buffer.sorted_y,
            &buffer.sum_phi,
            buffer.sorted_target.as_vec_mut(),
            &mut buffer.target,
        );
        if fallback.is_some() {
            stats.fallbacks += 1;
            debug!("ace: response: smoother fell back to the global line");
        }

        let scale = std_dev(&buffer.target);
        if scale <= T::epsilon().sqrt() {
            warn!("ace: smoothed response has no variance; keeping previous θ");
            return;
        }
        for (t, &v) in theta.iter_mut().zip(buffer.target.iter()) {
            *t = v / scale;
        }
    }

    // ========================================================================
    // Utility Methods
    // ========================================================================

    /// Smooth `target` against a sorted axis and write the centered result
    /// back in observation order.
    fn smooth_along(
        smoother: &SmootherKind<T>,
        order: &[usize],
        sorted_axis: &[T],
        target: &[T],
        scratch: &mut Vec<T>,
        out: &mut [T],
    ) -> Option<SmootherFallback> {
        gather_into(target, order, scratch);
        let fit = smoother.run(sorted_axis, scratch);
        unsort_into(&fit.fitted, order, out);
        center(out);
        fit.fallback
    }

    /// Σφ_i for each observation.
    fn sum_into(phis: &[Vec<T>], out: &mut [T]) {
        out.fill(T::zero());
        for phi in phis {
            for (s, &v) in out.iter_mut().zip(phi.iter()) {
                *s = *s + v;
            }
        }
    }

    /// θ − Σφ for each observation.
    fn residual_into(theta: &[T], sum_phi: &[T], out: &mut [T]) {
        for ((r, &t), &s) in out.iter_mut().zip(theta.iter()).zip(sum_phi.iter()) {
            *r = t - s;
        }
    }

    fn mean_square(values: &[T]) -> T {
        if values.is_empty() {
            return T::zero();
        }
        let ss = values.iter().fold(T::zero(), |acc, &v| acc + v * v);
        ss / T::from(values.len()).unwrap()
    }

    /// Result for a response without variance.
    fn constant_result(n: usize, p: usize) -> AceResult<T> {
        let theta = vec![T::zero(); n];
        let phis = vec![vec![T::zero(); n]; p];
        AceResult {
            correlation: T::zero(),
            diagnostics: Diagnostics::compute(&theta, &theta),
            theta,
            phis,
            error_history: Vec::new(),
            outer_errors: Vec::new(),
            outer_iterations: 0,
            inner_sweeps: 0,
            convergence: Convergence::ConstantResponse,
            smoother_fallbacks: 0,
        }
    }
}
