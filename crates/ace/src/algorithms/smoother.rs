//! Scatterplot smoothers.
//!
//! ## Purpose
//!
//! This module defines the `Smoother` capability the ACE solver depends on
//! and its fixed-span implementation: a running-lines smoother that fits a
//! least-squares line in a window of the ⌈span·n⌉ nearest ranks around each
//! point.
//!
//! ## Design notes
//!
//! * **Sorted input**: `smooth_sorted` expects x ascending; `smooth` sorts,
//!   smooths and restores the input order.
//! * **Rolling statistics**: With the uniform kernel the window's moments
//!   are updated incrementally as it slides, so a pass is O(n).
//! * **Tapered windows**: Other kernels recompute weighted sums per window.
//! * **Ties**: Equal x-values form one group; the window always covers
//!   whole groups and every member receives the same fitted value.
//! * **Boundaries**: Windows near the ends are shifted inward (asymmetric),
//!   never wrapped or padded.
//!
//! ## Key concepts
//!
//! * **Leave-one-out residual**: (y_k − ŷ_k) / (1 − h_k) with h_k the
//!   leverage of point k in its window; exact for a local least-squares line.
//! * **Degenerate window**: no spread in x; the fit falls back to the
//!   window mean and the window is counted in `SmoothFit::degenerate_windows`.
//!
//! ## Invariants
//!
//! * Output vectors have the same length and order as the input.
//! * A span of 1 reproduces the global least-squares line.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::{LinearFit, WLSSolver};
use crate::algorithms::supersmoother::SuperSmoother;
use crate::math::kernel::WeightFunction;
use crate::math::moments::WindowMoments;
use crate::primitives::errors::AceError;
use crate::primitives::sorting::{sort_by_x, unsort};
use crate::primitives::window::{Window, tie_groups};

// ============================================================================
// Smoother Capability
// ============================================================================

/// Fallback taken by a smoother instead of its normal procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmootherFallback {
    /// Every candidate span produced only degenerate windows; the global
    /// (span 1) line was used.
    LargestSpan,
}

/// Output of one smoothing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothFit<T> {
    /// Fitted values, aligned with the input.
    pub fitted: Vec<T>,

    /// Leave-one-out residuals, when the smoother computes them.
    pub cv_residuals: Option<Vec<T>>,

    /// Number of tie groups whose window had no spread in x.
    pub degenerate_windows: usize,

    /// Fallback taken, if any.
    pub fallback: Option<SmootherFallback>,
}

/// A scatterplot smoother: estimates E[y | x] at every sample point.
pub trait Smoother<T: WLSSolver> {
    /// Smooth data whose x-values are already in ascending order.
    fn smooth_sorted(&self, x: &[T], y: &[T]) -> Result<SmoothFit<T>, AceError>;

    /// Smooth data in any order; results are returned in input order.
    fn smooth(&self, x: &[T], y: &[T]) -> Result<SmoothFit<T>, AceError> {
        check_input(x, y)?;
        let sorted = sort_by_x(x, y);
        let fit = self.smooth_sorted(&sorted.x, &sorted.y)?;
        Ok(SmoothFit {
            fitted: unsort(&fit.fitted, &sorted.indices),
            cv_residuals: fit.cv_residuals.map(|r| unsort(&r, &sorted.indices)),
            degenerate_windows: fit.degenerate_windows,
            fallback: fit.fallback,
        })
    }
}

// ============================================================================
// Fixed-Span Smoother
// ============================================================================

/// Local linear smoother over a fixed fraction of the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpanSmoother<T> {
    /// Neighborhood width as a fraction of n, in (0, 1].
    pub span: T,

    /// Taper applied inside each window.
    pub weight_function: WeightFunction,

    /// Whether to compute leave-one-out residuals.
    pub cross_validate: bool,
}

impl<T: WLSSolver> FixedSpanSmoother<T> {
    /// Uniform-weight smoother without cross-validation.
    pub fn new(span: T) -> Self {
        Self {
            span,
            weight_function: WeightFunction::Uniform,
            cross_validate: false,
        }
    }

    /// Set the window taper.
    pub fn weight_function(mut self, weight_function: WeightFunction) -> Self {
        self.weight_function = weight_function;
        self
    }

    /// Request leave-one-out residuals.
    pub fn cross_validate(mut self, enabled: bool) -> Self {
        self.cross_validate = enabled;
        self
    }

    /// Smooth sorted data without validating it.
    pub(crate) fn run(&self, x: &[T], y: &[T]) -> SmoothFit<T> {
        let n = x.len();
        let mut fitted = vec![T::zero(); n];
        let mut residuals = if self.cross_validate {
            vec![T::zero(); n]
        } else {
            Vec::new()
        };

        let degenerate_windows = if n == 0 {
            0
        } else if self.weight_function.is_uniform() {
            self.rolling_pass(x, y, &mut fitted, &mut residuals)
        } else {
            self.tapered_pass(x, y, &mut fitted, &mut residuals)
        };

        SmoothFit {
            fitted,
            cv_residuals: self.cross_validate.then_some(residuals),
            degenerate_windows,
            fallback: None,
        }
    }

    // Uniform weights: slide the window and update moments in O(1) per step.
    fn rolling_pass(&self, x: &[T], y: &[T], fitted: &mut [T], residuals: &mut [T]) -> usize {
        let n = x.len();
        let window_size = Window::size_for_span(n, self.span);
        let (group_start, group_end) = tie_groups(x);

        let mut moments = WindowMoments::new();
        let mut left = 0;
        let mut next = 0;
        let mut degenerate = 0;

        let mut a = 0;
        while a < n {
            let b = group_end[a];
            let window =
                Window::initialize((a + b) / 2, window_size, n).cover_ties(&group_start, &group_end);

            while next <= window.right {
                moments.add(x[next], y[next]);
                next += 1;
            }
            while left < window.left {
                moments.remove(x[left], y[left]);
                left += 1;
            }

            let range = x[window.right] - x[window.left];
            if moments.has_drifted(range) {
                moments = WindowMoments::from_slices(
                    &x[window.left..=window.right],
                    &y[window.left..=window.right],
                );
            }
            if moments.is_degenerate(range) {
                degenerate += 1;
            }

            let value = moments.predict(x[a], range);
            let leverage = moments.leverage(x[a], range);
            for k in a..=b {
                fitted[k] = value;
                if !residuals.is_empty() {
                    residuals[k] = loo_residual(y[k] - value, leverage);
                }
            }

            a = b + 1;
        }

        degenerate
    }

    // Tapered weights: weighted sums are recomputed for every tie group, in
    // coordinates centered on the group so the sums do not carry x's offset.
    fn tapered_pass(&self, x: &[T], y: &[T], fitted: &mut [T], residuals: &mut [T]) -> usize {
        let n = x.len();
        let window_size = Window::size_for_span(n, self.span);
        let (group_start, group_end) = tie_groups(x);
        let mut weights = vec![T::zero(); n];
        let mut local = vec![T::zero(); n];
        let mut degenerate = 0;

        let mut a = 0;
        while a < n {
            let b = group_end[a];
            let window =
                Window::initialize((a + b) / 2, window_size, n).cover_ties(&group_start, &group_end);
            let (lo, hi) = (window.left, window.right);
            let x0 = x[a];
            let radius = (x0 - x[lo]).max(x[hi] - x0);

            self.weight_function
                .compute_window_weights(x, lo, hi, x0, radius, &mut weights);
            for k in lo..=hi {
                local[k] = x[k] - x0;
            }

            let (fit, sums) =
                match LinearFit::fit_wls(&local[lo..=hi], &y[lo..=hi], &weights[lo..=hi]) {
                    Some(solved) => solved,
                    None => {
                        // All weights vanished; fall back to the plain window line.
                        let fit = LinearFit::fit_ols(&local[lo..=hi], &y[lo..=hi]);
                        weights[lo..=hi].fill(T::one());
                        let sums =
                            T::accumulate_wls(&local[lo..=hi], &y[lo..=hi], &weights[lo..=hi]);
                        (fit, sums)
                    }
                };

            if sums.is_degenerate() {
                degenerate += 1;
            }

            let value = fit.predict(T::zero());
            for k in a..=b {
                fitted[k] = value;
                if !residuals.is_empty() {
                    let leverage = sums.leverage(local[k], weights[k]);
                    residuals[k] = loo_residual(y[k] - value, leverage);
                }
            }

            a = b + 1;
        }

        degenerate
    }

    /// Number of tie groups in sorted data.
    pub(crate) fn group_count(x: &[T]) -> usize {
        if x.is_empty() {
            return 0;
        }
        1 + x.windows(2).filter(|w| w[1] != w[0]).count()
    }
}

impl<T: WLSSolver> Smoother<T> for FixedSpanSmoother<T> {
    fn smooth_sorted(&self, x: &[T], y: &[T]) -> Result<SmoothFit<T>, AceError> {
        check_span(self.span)?;
        check_input(x, y)?;
        Ok(self.run(x, y))
    }
}

// ============================================================================
// Input Checks
// ============================================================================

/// Reject empty, mismatched or non-finite smoother input.
pub fn check_input<T: Float>(x: &[T], y: &[T]) -> Result<(), AceError> {
    if x.is_empty() || y.is_empty() {
        return Err(AceError::EmptyInput);
    }
    if x.len() != y.len() {
        return Err(AceError::MismatchedInputs {
            predictor: 0,
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(AceError::InvalidNumericValue(format!("x[{i}] is not finite")));
    }
    if let Some(i) = y.iter().position(|v| !v.is_finite()) {
        return Err(AceError::InvalidNumericValue(format!("y[{i}] is not finite")));
    }
    Ok(())
}

/// Reject a span outside (0, 1].
pub fn check_span<T: Float>(span: T) -> Result<(), AceError> {
    if !span.is_finite() || span <= T::zero() || span > T::one() {
        return Err(AceError::InvalidSpan(span.to_f64().unwrap_or(f64::NAN)));
    }
    Ok(())
}

/// Leave-one-out residual from an ordinary residual and its leverage.
///
/// A leverage at (or numerically past) one leaves nothing to predict the
/// point from; the ordinary residual is returned unchanged.
#[inline]
pub fn loo_residual<T: Float>(residual: T, leverage: T) -> T {
    let denom = T::one() - leverage;
    if denom <= T::epsilon().sqrt() {
        residual
    } else {
        residual / denom
    }
}

// ============================================================================
// Smoother Selection
// ============================================================================

/// Smoother used by the ACE solver, chosen at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SmootherKind<T> {
    /// One fixed span everywhere.
    FixedSpan(FixedSpanSmoother<T>),

    /// Friedman's variable-span supersmoother.
    Adaptive(SuperSmoother<T>),
}

impl<T: WLSSolver> Default for SmootherKind<T> {
    fn default() -> Self {
        SmootherKind::Adaptive(SuperSmoother::default())
    }
}

impl<T: WLSSolver> SmootherKind<T> {
    /// Short name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            SmootherKind::FixedSpan(_) => "Fixed span",
            SmootherKind::Adaptive(_) => "Supersmoother",
        }
    }

    /// Smooth sorted, already-validated data.
    pub(crate) fn run(&self, x: &[T], y: &[T]) -> SmoothFit<T> {
        match self {
            SmootherKind::FixedSpan(s) => s.run(x, y),
            SmootherKind::Adaptive(s) => s.run(x, y),
        }
    }
}

impl<T: WLSSolver> Smoother<T> for SmootherKind<T> {
    fn smooth_sorted(&self, x: &[T], y: &[T]) -> Result<SmoothFit<T>, AceError> {
        match self {
            SmootherKind::FixedSpan(s) => s.smooth_sorted(x, y),
            SmootherKind::Adaptive(s) => s.smooth_sorted(x, y),
        }
    }
}
