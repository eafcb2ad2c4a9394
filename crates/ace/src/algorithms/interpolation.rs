//! Clamped piecewise-linear interpolation.
//!
//! ## Purpose
//!
//! This module turns a table of sorted (abscissa, value) pairs into a
//! function defined everywhere. It is used to evaluate fitted transforms at
//! new points, to invert θ, and to blend the supersmoother's primary
//! smooths across neighboring spans.
//!
//! ## Design notes
//!
//! * **Search**: Binary search for each query.
//! * **Clamping**: Queries outside the table return the boundary value; the
//!   line is never extended.
//! * **Ties**: A bracket whose two abscissae coincide yields the average of
//!   its two values.
//!
//! ## Invariants
//!
//! * Table abscissae are in ascending order.
//! * Results at the table abscissae reproduce the table values (up to the
//!   averaging of exact ties).
//!
//! ## Non-goals
//!
//! * This module does not provide higher-order interpolation.
//! * This module does not sort the table.

// External dependencies
use num_traits::Float;

// ============================================================================
// Bracketing
// ============================================================================

/// Bracket of a query inside a sorted table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket<T> {
    /// Lower table index.
    pub left: usize,

    /// Upper table index (equal to `left` when clamped).
    pub right: usize,

    /// Fractional position between `left` and `right`, in [0, 1].
    pub alpha: T,
}

impl<T: Float> Bracket<T> {
    /// Locate `x_new` in the ascending table `xs` (which must be non-empty).
    pub fn locate(xs: &[T], x_new: T) -> Self {
        let n = xs.len();
        debug_assert!(n > 0, "Bracket::locate: empty table");

        if n == 1 || x_new <= xs[0] {
            return Self::at(0);
        }
        if x_new >= xs[n - 1] {
            return Self::at(n - 1);
        }

        let mut left = 0;
        let mut right = n - 1;
        while right - left > 1 {
            let mid = (left + right) / 2;
            if xs[mid] <= x_new {
                left = mid;
            } else {
                right = mid;
            }
        }

        Self::between(xs, left, right, x_new)
    }

    #[inline]
    fn at(idx: usize) -> Self {
        Self {
            left: idx,
            right: idx,
            alpha: T::zero(),
        }
    }

    #[inline]
    fn between(xs: &[T], left: usize, right: usize, x_new: T) -> Self {
        let denom = xs[right] - xs[left];
        let alpha = if denom <= T::zero() {
            T::from(0.5).unwrap()
        } else {
            (x_new - xs[left]) / denom
        };
        Self { left, right, alpha }
    }

    /// Blend two values at this bracket's position.
    #[inline]
    pub fn blend(&self, lo: T, hi: T) -> T {
        lo + self.alpha * (hi - lo)
    }

    /// Apply the bracket to a value table aligned with the abscissae.
    #[inline]
    pub fn apply(&self, ys: &[T]) -> T {
        self.blend(ys[self.left], ys[self.right])
    }
}

// ============================================================================
// Interpolation
// ============================================================================

/// Interpolate the table (`xs`, `ys`) at `x_new`, clamping outside its range.
///
/// An empty table yields zero.
pub fn interpolate<T: Float>(xs: &[T], ys: &[T], x_new: T) -> T {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return T::zero();
    }
    Bracket::locate(&xs[..n], x_new).apply(ys)
}
