//! Moment statistics for smoothing windows and transform normalization.
//!
//! ## Purpose
//!
//! This module provides the first and second moments the rest of the crate
//! is built on:
//! - `WindowMoments`: running means and centered co-moments of a sliding
//!   window, updated in O(1) as points enter and leave.
//! - Whole-sample mean, population standard deviation, centering, and
//!   Pearson correlation, used to normalize θ, center φ, and report fit quality.
//!
//! ## Design notes
//!
//! * **Centered updates**: The window keeps means plus centered sums
//!   (Σ(x−x̄)², Σ(x−x̄)(y−ȳ)) rather than raw Σx², Σxy; they carry the same
//!   information but do not cancel catastrophically.
//! * **Population scale**: Standard deviations divide by n, not n − 1.
//!
//! ## Invariants
//!
//! * `sxx` is clamped at zero after removals.
//! * Degeneracy is judged from the window's x-range, never from a tolerance
//!   on raw moments, so offsetting x does not change it.
//! * An emptied window resets to all zeros.
//!
//! ## Non-goals
//!
//! * This module does not choose window bounds.

// External dependencies
use num_traits::Float;

// ============================================================================
// Rolling Window Moments
// ============================================================================

/// Sufficient statistics of the points currently inside a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMoments<T> {
    /// Number of points in the window.
    pub count: usize,

    /// Mean of x over the window.
    pub mean_x: T,

    /// Mean of y over the window.
    pub mean_y: T,

    /// Centered sum of squares Σ(x − x̄)².
    pub sxx: T,

    /// Centered cross product Σ(x − x̄)(y − ȳ).
    pub sxy: T,
}

impl<T: Float> Default for WindowMoments<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> WindowMoments<T> {
    /// Create an empty window.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean_x: T::zero(),
            mean_y: T::zero(),
            sxx: T::zero(),
            sxy: T::zero(),
        }
    }

    /// Compute moments of a full slice directly.
    ///
    /// Used to rebuild a rolling window whose sums have drifted.
    pub fn from_slices(x: &[T], y: &[T]) -> Self {
        let mut m = Self::new();
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            m.add(xi, yi);
        }
        m
    }

    /// Add one observation.
    #[inline]
    pub fn add(&mut self, x: T, y: T) {
        self.count += 1;
        let n = T::from(self.count).unwrap();
        let dx = x - self.mean_x;
        self.mean_x = self.mean_x + dx / n;
        self.mean_y = self.mean_y + (y - self.mean_y) / n;
        self.sxx = self.sxx + dx * (x - self.mean_x);
        self.sxy = self.sxy + dx * (y - self.mean_y);
    }

    /// Remove one observation that was previously added.
    #[inline]
    pub fn remove(&mut self, x: T, y: T) {
        debug_assert!(self.count > 0, "remove: window is empty");
        if self.count <= 1 {
            *self = Self::new();
            return;
        }

        let n = T::from(self.count).unwrap();
        let m = n - T::one();
        let old_mean_y = self.mean_y;
        self.mean_x = self.mean_x - (x - self.mean_x) / m;
        self.mean_y = self.mean_y - (y - self.mean_y) / m;

        let dx = x - self.mean_x;
        self.sxx = (self.sxx - dx * dx * m / n).max(T::zero());
        self.sxy = self.sxy - dx * (y - old_mean_y);
        self.count -= 1;
    }

    /// Whether the window has no spread in x.
    ///
    /// `range` is the distance between the window's smallest and largest
    /// x. Tie groups are exact, so a zero range is the only true degeneracy;
    /// a non-positive `sxx` with a positive range means the rolling sums
    /// must be refreshed first (see [`Self::has_drifted`]).
    #[inline]
    pub fn is_degenerate(&self, range: T) -> bool {
        self.count < 2 || range <= T::zero() || self.sxx <= T::zero()
    }

    /// Whether rounding in the rolling updates has eroded `sxx`.
    ///
    /// Any window whose x-values span `range` has Sxx ≥ range²/2, so a value
    /// below range²/4 can only come from accumulated cancellation.
    #[inline]
    pub fn has_drifted(&self, range: T) -> bool {
        let quarter = T::from(0.25).unwrap();
        self.count >= 2 && range > T::zero() && self.sxx < quarter * range * range
    }

    /// Fitted value of the window's least-squares line at `x`.
    ///
    /// A degenerate window falls back to the window mean of y.
    #[inline]
    pub fn predict(&self, x: T, range: T) -> T {
        if self.is_degenerate(range) {
            return self.mean_y;
        }
        self.mean_y + self.sxy / self.sxx * (x - self.mean_x)
    }

    /// Leverage of a window member at `x`: 1/m + (x − x̄)² / Sxx.
    #[inline]
    pub fn leverage(&self, x: T, range: T) -> T {
        let n = T::from(self.count.max(1)).unwrap();
        if self.is_degenerate(range) {
            return T::one() / n;
        }
        let dx = x - self.mean_x;
        T::one() / n + dx * dx / self.sxx
    }
}

// ============================================================================
// Whole-Sample Statistics
// ============================================================================

/// Arithmetic mean (zero for an empty slice).
#[inline]
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from(values.len()).unwrap()
}

/// Population standard deviation.
#[inline]
pub fn std_dev<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let mu = mean(values);
    let ss = values.iter().fold(T::zero(), |acc, &v| {
        let d = v - mu;
        acc + d * d
    });
    (ss / T::from(values.len()).unwrap()).sqrt()
}

/// Subtract the mean in place; returns the mean that was removed.
#[inline]
pub fn center<T: Float>(values: &mut [T]) -> T {
    let mu = mean(values);
    for v in values.iter_mut() {
        *v = *v - mu;
    }
    mu
}

/// Pearson correlation; zero when either side has no variance.
pub fn correlation<T: Float>(a: &[T], b: &[T]) -> T {
    let n = a.len().min(b.len());
    if n < 2 {
        return T::zero();
    }
    let (a, b) = (&a[..n], &b[..n]);
    let ma = mean(a);
    let mb = mean(b);

    let mut sab = T::zero();
    let mut saa = T::zero();
    let mut sbb = T::zero();
    for (&ai, &bi) in a.iter().zip(b.iter()) {
        let da = ai - ma;
        let db = bi - mb;
        sab = sab + da * db;
        saa = saa + da * da;
        sbb = sbb + db * db;
    }

    let denom = (saa * sbb).sqrt();
    if denom <= T::zero() {
        return T::zero();
    }
    sab / denom
}

/// Mean squared difference E[(a − b)²].
#[inline]
pub fn mean_squared_difference<T: Float>(a: &[T], b: &[T]) -> T {
    let n = a.len().min(b.len());
    if n == 0 {
        return T::zero();
    }
    let ss = a.iter().zip(b.iter()).fold(T::zero(), |acc, (&ai, &bi)| {
        let d = ai - bi;
        acc + d * d
    });
    ss / T::from(n).unwrap()
}
