//! Kernel (weight) functions for the window smoother.
//!
//! ## Purpose
//!
//! This module provides the distance tapers that may be applied inside a
//! smoothing window. The default `Uniform` kernel weights every neighbor
//! equally, which is what allows the window smoother to update its sums
//! incrementally as the window slides.
//!
//! ## Design notes
//!
//! * **Normalization**: Maps distances u = |x - x_i| / radius to weights.
//! * **Support**: All kernels here are bounded on [-1, 1].
//! * **Radius**: The window radius is inflated by a small margin so the
//!   farthest neighbor keeps a positive weight.
//!
//! ## Invariants
//!
//! * Kernels are non-negative (K(u) >= 0) and symmetric (K(u) = K(-u)).
//! * Weights are exactly zero outside the support.
//!
//! ## Non-goals
//!
//! * This module does not perform weight normalization.
//! * This module does not handle span selection logic.

// External dependencies
use num_traits::Float;

/// Relative inflation of the window radius before weights are evaluated.
const RADIUS_MARGIN: f64 = 1e-3;

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Weight function (kernel) applied within a smoothing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightFunction {
    /// Uniform (rectangular) kernel: K(u) = 1 for |u| < 1.
    ///
    /// This is the default; it is Friedman's running-lines smoother and the
    /// only kernel that supports rolling window updates.
    #[default]
    Uniform,

    /// Triangular (linear) kernel: K(u) = (1 - |u|) for |u| < 1.
    Triangle,

    /// Epanechnikov kernel: K(u) = (1 - u^2) for |u| < 1.
    Epanechnikov,

    /// Biweight (quartic) kernel: K(u) = (1 - u^2)^2 for |u| < 1.
    Biweight,

    /// Tricube kernel: K(u) = (1 - |u|^3)^3 for |u| < 1.
    Tricube,
}

impl WeightFunction {
    /// Get the name of the weight function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Uniform => "Uniform",
            WeightFunction::Triangle => "Triangle",
            WeightFunction::Epanechnikov => "Epanechnikov",
            WeightFunction::Biweight => "Biweight",
            WeightFunction::Tricube => "Tricube",
        }
    }

    /// Whether every point in a window receives the same weight.
    #[inline]
    pub const fn is_uniform(&self) -> bool {
        matches!(self, WeightFunction::Uniform)
    }

    /// Compute the unnormalized weight K(u) for a given normalized distance.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let abs_u = u.abs();

        if abs_u >= T::one() {
            return T::zero();
        }

        match self {
            WeightFunction::Uniform => T::one(),

            WeightFunction::Triangle => T::one() - abs_u,

            WeightFunction::Epanechnikov => T::one() - abs_u * abs_u,

            WeightFunction::Biweight => {
                let tmp = T::one() - abs_u * abs_u;
                tmp * tmp
            }

            WeightFunction::Tricube => {
                let tmp = T::one() - abs_u * abs_u * abs_u;
                tmp * tmp * tmp
            }
        }
    }

    /// Fill `weights[left..=right]` for a fit centered at `x_current`.
    ///
    /// Returns the sum of the weights. A zero `radius` (all points tied with
    /// the center) gives every point weight one.
    pub fn compute_window_weights<T: Float>(
        &self,
        x: &[T],
        left: usize,
        right: usize,
        x_current: T,
        radius: T,
        weights: &mut [T],
    ) -> T {
        let mut sum = T::zero();

        if radius <= T::zero() {
            for w in &mut weights[left..=right] {
                *w = T::one();
                sum = sum + T::one();
            }
            return sum;
        }

        let bandwidth = radius * (T::one() + T::from(RADIUS_MARGIN).unwrap());
        for j in left..=right {
            let w = self.compute_weight((x[j] - x_current) / bandwidth);
            weights[j] = w;
            sum = sum + w;
        }

        sum
    }
}
