//! Regression Logic
//!
//! ## Purpose
//!
//! This module provides the least-squares line fits the smoothers are built on:
//! - `LinearFit`: slope/intercept with an ordinary least-squares constructor.
//! - `WeightedSums`: weighted sufficient statistics for a tapered window,
//!   accumulated through the SIMD-specialised `WLSSolver` trait.
//! - Leverage of a window member, needed for leave-one-out residuals.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use wide::{f32x4, f64x2};

// ============================================================================
// Weighted Sufficient Statistics
// ============================================================================

/// Raw weighted sums Σw, Σwx, Σwy, Σwx², Σwxy over a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSums<T> {
    /// Σw
    pub sum_w: T,
    /// Σwx
    pub sum_wx: T,
    /// Σwy
    pub sum_wy: T,
    /// Σwx²
    pub sum_wxx: T,
    /// Σwxy
    pub sum_wxy: T,
}

impl<T: Float> WeightedSums<T> {
    /// Centered weighted sum of squares Σw(x − x̄_w)².
    #[inline]
    pub fn sxx(&self) -> T {
        if self.sum_w <= T::zero() {
            return T::zero();
        }
        (self.sum_wxx - self.sum_wx * self.sum_wx / self.sum_w).max(T::zero())
    }

    /// Whether the weighted spread of x is numerically zero.
    ///
    /// The test is relative to Σwx², so x must be measured from a point
    /// inside the window (the smoothers center it on the target point);
    /// raw sums of offset data lose the spread to cancellation.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let tol = T::epsilon() * T::from(64.0).unwrap() * self.sum_wxx.abs();
        self.sum_w <= T::zero() || self.sxx() <= tol
    }

    /// Solve for the weighted least-squares line.
    ///
    /// A degenerate window yields a flat line through the weighted mean of y.
    /// Returns `None` only when all weights are zero.
    pub fn solve(&self) -> Option<LinearFit<T>> {
        if self.sum_w <= T::zero() {
            return None;
        }

        let x_mean = self.sum_wx / self.sum_w;
        let y_mean = self.sum_wy / self.sum_w;

        if self.is_degenerate() {
            return Some(LinearFit {
                slope: T::zero(),
                intercept: y_mean,
                x_mean,
                y_mean,
            });
        }

        let covariance = self.sum_wxy - self.sum_wx * self.sum_wy / self.sum_w;
        let slope = covariance / self.sxx();
        Some(LinearFit {
            slope,
            intercept: y_mean - slope * x_mean,
            x_mean,
            y_mean,
        })
    }

    /// Leverage of a member with abscissa `x` and weight `w`:
    /// w/Σw + w(x − x̄_w)²/Sxx_w.
    #[inline]
    pub fn leverage(&self, x: T, w: T) -> T {
        if self.sum_w <= T::zero() {
            return T::zero();
        }
        let base = w / self.sum_w;
        if self.is_degenerate() {
            return base;
        }
        let dx = x - self.sum_wx / self.sum_w;
        base + w * dx * dx / self.sxx()
    }
}

// ============================================================================
// Generic Accumulation
// ============================================================================

/// Scalar accumulation of weighted sums (generic Float).
#[inline]
pub fn accumulate_wls_scalar<T: Float>(x: &[T], y: &[T], weights: &[T]) -> WeightedSums<T> {
    let mut sums = WeightedSums {
        sum_w: T::zero(),
        sum_wx: T::zero(),
        sum_wy: T::zero(),
        sum_wxx: T::zero(),
        sum_wxy: T::zero(),
    };

    for ((&w, &xi), &yi) in weights.iter().zip(x.iter()).zip(y.iter()) {
        let wx = w * xi;
        sums.sum_w = sums.sum_w + w;
        sums.sum_wx = sums.sum_wx + wx;
        sums.sum_wy = sums.sum_wy + w * yi;
        sums.sum_wxx = sums.sum_wxx + wx * xi;
        sums.sum_wxy = sums.sum_wxy + wx * yi;
    }

    sums
}

// ============================================================================
// Specialized Accumulation (SIMD)
// ============================================================================

/// SIMD-optimized accumulation of weighted sums (f64).
#[inline]
pub fn accumulate_wls_simd_f64(x: &[f64], y: &[f64], weights: &[f64]) -> WeightedSums<f64> {
    let n = x.len().min(y.len()).min(weights.len());

    let mut s_w = f64x2::splat(0.0);
    let mut s_wx = f64x2::splat(0.0);
    let mut s_wy = f64x2::splat(0.0);
    let mut s_wxx = f64x2::splat(0.0);
    let mut s_wxy = f64x2::splat(0.0);

    let lanes = n / 2 * 2;
    for i in (0..lanes).step_by(2) {
        let w = f64x2::new([weights[i], weights[i + 1]]);
        let xv = f64x2::new([x[i], x[i + 1]]);
        let yv = f64x2::new([y[i], y[i + 1]]);
        let wx = w * xv;

        s_w += w;
        s_wx += wx;
        s_wy += w * yv;
        s_wxx += wx * xv;
        s_wxy += wx * yv;
    }

    let head = WeightedSums {
        sum_w: s_w.reduce_add(),
        sum_wx: s_wx.reduce_add(),
        sum_wy: s_wy.reduce_add(),
        sum_wxx: s_wxx.reduce_add(),
        sum_wxy: s_wxy.reduce_add(),
    };
    let tail = accumulate_wls_scalar(&x[lanes..n], &y[lanes..n], &weights[lanes..n]);

    head.merge(&tail)
}

/// SIMD-optimized accumulation of weighted sums (f32).
#[inline]
pub fn accumulate_wls_simd_f32(x: &[f32], y: &[f32], weights: &[f32]) -> WeightedSums<f32> {
    let n = x.len().min(y.len()).min(weights.len());

    let mut s_w = f32x4::splat(0.0);
    let mut s_wx = f32x4::splat(0.0);
    let mut s_wy = f32x4::splat(0.0);
    let mut s_wxx = f32x4::splat(0.0);
    let mut s_wxy = f32x4::splat(0.0);

    let lanes = n / 4 * 4;
    for i in (0..lanes).step_by(4) {
        let w = f32x4::new([weights[i], weights[i + 1], weights[i + 2], weights[i + 3]]);
        let xv = f32x4::new([x[i], x[i + 1], x[i + 2], x[i + 3]]);
        let yv = f32x4::new([y[i], y[i + 1], y[i + 2], y[i + 3]]);
        let wx = w * xv;

        s_w += w;
        s_wx += wx;
        s_wy += w * yv;
        s_wxx += wx * xv;
        s_wxy += wx * yv;
    }

    let head = WeightedSums {
        sum_w: s_w.reduce_add(),
        sum_wx: s_wx.reduce_add(),
        sum_wy: s_wy.reduce_add(),
        sum_wxx: s_wxx.reduce_add(),
        sum_wxy: s_wxy.reduce_add(),
    };
    let tail = accumulate_wls_scalar(&x[lanes..n], &y[lanes..n], &weights[lanes..n]);

    head.merge(&tail)
}

impl<T: Float> WeightedSums<T> {
    #[inline]
    fn merge(&self, other: &Self) -> Self {
        Self {
            sum_w: self.sum_w + other.sum_w,
            sum_wx: self.sum_wx + other.sum_wx,
            sum_wy: self.sum_wy + other.sum_wy,
            sum_wxx: self.sum_wxx + other.sum_wxx,
            sum_wxy: self.sum_wxy + other.sum_wxy,
        }
    }
}

// ============================================================================
// Solver Trait
// ============================================================================

/// Trait for type-specific weighted least squares accumulation.
pub trait WLSSolver: Float + Debug {
    /// Accumulate weighted statistics.
    #[inline]
    fn accumulate_wls(x: &[Self], y: &[Self], weights: &[Self]) -> WeightedSums<Self> {
        accumulate_wls_scalar(x, y, weights)
    }
}

impl WLSSolver for f64 {
    #[inline]
    fn accumulate_wls(x: &[f64], y: &[f64], weights: &[f64]) -> WeightedSums<f64> {
        accumulate_wls_simd_f64(x, y, weights)
    }
}

impl WLSSolver for f32 {
    #[inline]
    fn accumulate_wls(x: &[f32], y: &[f32], weights: &[f32]) -> WeightedSums<f32> {
        accumulate_wls_simd_f32(x, y, weights)
    }
}

// ============================================================================
// LinearFit
// ============================================================================

/// Linear regression fit result (slope and intercept).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit<T: Float> {
    /// Slope (beta_1)
    pub slope: T,

    /// Intercept (beta_0)
    pub intercept: T,

    /// Mean of x-values
    pub x_mean: T,

    /// Mean of y-values
    pub y_mean: T,
}

impl<T: Float> LinearFit<T> {
    /// Create a zero-initialized fit.
    pub fn zero() -> Self {
        Self {
            slope: T::zero(),
            intercept: T::zero(),
            x_mean: T::zero(),
            y_mean: T::zero(),
        }
    }

    /// Predict y-value for a given x using the model.
    #[inline]
    pub fn predict(&self, x: T) -> T {
        self.intercept + self.slope * x
    }

    /// Fit Ordinary Least Squares (OLS) regression in two passes.
    pub fn fit_ols(x: &[T], y: &[T]) -> Self {
        let n = x.len().min(y.len());
        if n == 0 {
            return Self::zero();
        }

        let n_t = T::from(n).unwrap_or(T::one());
        let x_mean = x[..n].iter().fold(T::zero(), |acc, &v| acc + v) / n_t;
        let y_mean = y[..n].iter().fold(T::zero(), |acc, &v| acc + v) / n_t;

        let mut variance = T::zero();
        let mut covariance = T::zero();
        for i in 0..n {
            let dx = x[i] - x_mean;
            variance = variance + dx * dx;
            covariance = covariance + dx * (y[i] - y_mean);
        }

        if variance <= T::zero() {
            return Self {
                slope: T::zero(),
                intercept: y_mean,
                x_mean,
                y_mean,
            };
        }

        let slope = covariance / variance;
        Self {
            slope,
            intercept: y_mean - slope * x_mean,
            x_mean,
            y_mean,
        }
    }
}

impl<T: WLSSolver> LinearFit<T> {
    /// Fit weighted least squares, returning the fit and the sums behind it.
    pub fn fit_wls(x: &[T], y: &[T], weights: &[T]) -> Option<(Self, WeightedSums<T>)> {
        let sums = T::accumulate_wls(x, y, weights);
        sums.solve().map(|fit| (fit, sums))
    }
}
