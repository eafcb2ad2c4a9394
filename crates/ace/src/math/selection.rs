//! Cross-validated span selection.
//!
//! ## Purpose
//!
//! This module turns the leave-one-out residuals of the supersmoother's
//! primary fits into a per-point choice of span. It provides the error
//! measure applied to each residual and the per-point selection rule,
//! including Friedman's bass enhancement toward the largest span.
//!
//! ## Design notes
//!
//! * **Local errors**: Residual curves are smoothed by the caller before
//!   selection, so each point's error is a neighborhood average.
//! * **Selection**: At each point the candidate with the smallest error wins;
//!   ties go to the smaller span.
//! * **Bass enhancement**: With α > 0 the winning span is pulled toward the
//!   largest span by (e_best / e_bass)^(10 − α), which is close to 1 when the
//!   largest span predicts almost as well as the best one.
//!
//! ## Key concepts
//!
//! * **Tweeter / midrange / woofer**: The small, middle and large candidate
//!   spans.
//! * **Bass span**: The largest candidate span.
//!
//! ## Invariants
//!
//! * Selected spans lie in [smallest, largest] candidate span.
//! * α = 0 leaves the raw selection untouched.
//!
//! ## Non-goals
//!
//! * This module does not perform the smoothing itself.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use num_traits::Float;

/// Exponent base for bass enhancement; α = 10 means "always pick the bass span".
const BASS_MAX: f64 = 10.0;

// ============================================================================
// Error Measure
// ============================================================================

/// How a leave-one-out residual is turned into a local prediction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CvError {
    /// Squared residual r².
    #[default]
    Squared,

    /// Absolute residual |r| (Friedman's original supsmu).
    Absolute,
}

impl CvError {
    /// Get the name of the error measure.
    pub const fn name(&self) -> &'static str {
        match self {
            CvError::Squared => "Squared",
            CvError::Absolute => "Absolute",
        }
    }

    /// Apply the measure to one residual.
    #[inline]
    pub fn measure<T: Float>(&self, residual: T) -> T {
        match self {
            CvError::Squared => residual * residual,
            CvError::Absolute => residual.abs(),
        }
    }

    /// Apply the measure to every residual.
    pub fn curve<T: Float>(&self, residuals: &[T]) -> Vec<T> {
        residuals.iter().map(|&r| self.measure(r)).collect()
    }
}

// ============================================================================
// Span Selection
// ============================================================================

/// Per-point span selection over a set of candidate spans.
#[derive(Debug, Clone, Copy)]
pub struct SpanSelector<'a, T> {
    /// Candidate spans, strictly increasing.
    pub spans: &'a [T],

    /// Bass enhancement α in [0, 10].
    pub bass_enhancement: T,
}

impl<'a, T: Float> SpanSelector<'a, T> {
    /// Create a selector.
    pub fn new(spans: &'a [T], bass_enhancement: T) -> Self {
        Self {
            spans,
            bass_enhancement,
        }
    }

    /// Choose a span for every point.
    ///
    /// `errors[j][i]` is the smoothed local error of candidate `j` at point `i`.
    pub fn select(&self, errors: &[Vec<T>], out: &mut [T]) {
        let Some(bass) = self.spans.len().checked_sub(1) else {
            return;
        };
        debug_assert_eq!(errors.len(), self.spans.len());

        for (i, slot) in out.iter_mut().enumerate() {
            let mut best = 0;
            let mut best_err = errors[0][i];
            for (j, curve) in errors.iter().enumerate().skip(1) {
                if curve[i] < best_err {
                    best = j;
                    best_err = curve[i];
                }
            }

            *slot = self.enhance(self.spans[best], best_err, errors[bass][i]);
        }
    }

    /// Pull a selected span toward the bass span.
    #[inline]
    pub fn enhance(&self, span: T, best_err: T, bass_err: T) -> T {
        let alpha = self.bass_enhancement;
        if alpha <= T::zero() || best_err <= T::zero() || best_err >= bass_err {
            return span;
        }

        let bass_span = match self.spans.last() {
            Some(&s) => s,
            None => return span,
        };
        let exponent = T::from(BASS_MAX).unwrap() - alpha;
        let ratio = (best_err / bass_err).powf(exponent);
        span + (bass_span - span) * ratio
    }

    /// Clip a span to the candidate range.
    #[inline]
    pub fn clip(&self, span: T) -> T {
        match (self.spans.first(), self.spans.last()) {
            (Some(&lo), Some(&hi)) => span.max(lo).min(hi),
            _ => span,
        }
    }
}
