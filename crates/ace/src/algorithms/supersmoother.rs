//! Friedman's variable-span supersmoother.
//!
//! ## Purpose
//!
//! This module chooses a smoothing span per point. It runs the fixed-span
//! smoother at a few candidate spans, estimates each span's local prediction
//! error from leave-one-out residuals, and blends the two candidate fits that
//! bracket the locally best span.
//!
//! ## Design notes
//!
//! * **Primaries**: One cross-validated fixed-span fit per candidate span.
//! * **Error curves**: Each span's measured residuals are smoothed twice with
//!   the middle span, so the selection follows the trend of the error rather
//!   than its noise.
//! * **Span curve**: The per-point selection (after optional bass
//!   enhancement) is smoothed with the middle span and clipped to the
//!   candidate range before blending.
//! * **Final pass**: The blended fit is smoothed once more with the smallest
//!   span unless disabled.
//! * **Fallback**: If every candidate produces only degenerate windows the
//!   global line (span 1) is returned and flagged.
//!
//! ## Invariants
//!
//! * All smoothing happens in x-sorted order; tie groups share one value.
//! * Small n shrinks every window proportionally (see `Window::size_for_span`).
//!
//! ## Non-goals
//!
//! * This module does not compute leave-one-out residuals of its own output.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use log::debug;

// Internal dependencies
use crate::algorithms::interpolation::Bracket;
use crate::algorithms::regression::WLSSolver;
use crate::algorithms::smoother::{
    FixedSpanSmoother, SmoothFit, Smoother, SmootherFallback, check_input, check_span,
};
use crate::math::kernel::WeightFunction;
use crate::math::selection::{CvError, SpanSelector};
use crate::primitives::errors::AceError;

// ============================================================================
// Configuration
// ============================================================================

/// Immutable configuration of the supersmoother.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperSmootherConfig<T> {
    /// Candidate spans, strictly increasing, each in (0, 1].
    pub spans: Vec<T>,

    /// Bass enhancement α in [0, 10]; 0 disables it.
    pub bass_enhancement: T,

    /// Measure applied to leave-one-out residuals.
    pub cv_error: CvError,

    /// Taper used by every fixed-span pass.
    pub weight_function: WeightFunction,

    /// Whether to smooth the blended fit once more with the smallest span.
    pub final_pass: bool,
}

impl<T: WLSSolver> Default for SuperSmootherConfig<T> {
    fn default() -> Self {
        Self {
            spans: vec![
                T::from(0.05).unwrap(),
                T::from(0.2).unwrap(),
                T::from(0.5).unwrap(),
            ],
            bass_enhancement: T::zero(),
            cv_error: CvError::default(),
            weight_function: WeightFunction::default(),
            final_pass: true,
        }
    }
}

impl<T: WLSSolver> SuperSmootherConfig<T> {
    /// Check the span set and bass enhancement.
    pub fn validate(&self) -> Result<(), AceError> {
        if self.spans.len() < 2 || self.spans.windows(2).any(|w| w[1] <= w[0]) {
            return Err(AceError::UnorderedSpans);
        }
        for &span in &self.spans {
            check_span(span)?;
        }

        let alpha = self.bass_enhancement;
        if !alpha.is_finite() || alpha < T::zero() || alpha > T::from(10.0).unwrap() {
            return Err(AceError::InvalidBassEnhancement(
                alpha.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SuperSmoother
// ============================================================================

/// Variable-span smoother.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperSmoother<T> {
    /// Smoother configuration.
    pub config: SuperSmootherConfig<T>,
}

impl<T: WLSSolver> Default for SuperSmoother<T> {
    fn default() -> Self {
        Self::new(SuperSmootherConfig::default())
    }
}

impl<T: WLSSolver> SuperSmoother<T> {
    /// Create a supersmoother from a configuration.
    pub fn new(config: SuperSmootherConfig<T>) -> Self {
        Self { config }
    }

    fn fixed(&self, span: T) -> FixedSpanSmoother<T> {
        FixedSpanSmoother::new(span).weight_function(self.config.weight_function)
    }

    /// Smooth sorted data without validating it.
    pub(crate) fn run(&self, x: &[T], y: &[T]) -> SmoothFit<T> {
        let spans = &self.config.spans;
        let n = x.len();
        if n == 0 || spans.is_empty() {
            return SmoothFit {
                fitted: y.to_vec(),
                cv_residuals: None,
                degenerate_windows: 0,
                fallback: None,
            };
        }

        // Primary fits at every candidate span.
        let primaries: Vec<SmoothFit<T>> = spans
            .iter()
            .map(|&s| self.fixed(s).cross_validate(true).run(x, y))
            .collect();

        let groups = FixedSpanSmoother::<T>::group_count(x);
        if primaries.iter().all(|p| p.degenerate_windows >= groups) {
            debug!(
                "supersmoother: all {} candidate spans degenerate over {n} points; using span 1",
                spans.len()
            );
            let mut fit = self.fixed(T::one()).run(x, y);
            fit.fallback = Some(SmootherFallback::LargestSpan);
            return fit;
        }

        let midrange = self.fixed(spans[(spans.len() - 1) / 2]);

        // Local error of every span, smoothed twice with the middle span.
        let errors: Vec<Vec<T>> = primaries
            .iter()
            .map(|p| {
                let raw = match &p.cv_residuals {
                    Some(r) => self.config.cv_error.curve(r),
                    None => vec![T::zero(); n],
                };
                let once = midrange.run(x, &raw).fitted;
                midrange.run(x, &once).fitted
            })
            .collect();

        // Per-point span, then smooth the span curve itself.
        let selector = SpanSelector::new(spans, self.config.bass_enhancement);
        let mut chosen = vec![T::zero(); n];
        selector.select(&errors, &mut chosen);
        let chosen = midrange.run(x, &chosen).fitted;

        // Blend the two primaries bracketing each chosen span.
        let mut blended: Vec<T> = chosen
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let bracket = Bracket::locate(spans, selector.clip(s));
                bracket.blend(
                    primaries[bracket.left].fitted[i],
                    primaries[bracket.right].fitted[i],
                )
            })
            .collect();

        if self.config.final_pass {
            blended = self.fixed(spans[0]).run(x, &blended).fitted;
        }

        let degenerate_windows = primaries
            .last()
            .map(|p| p.degenerate_windows)
            .unwrap_or(0);

        SmoothFit {
            fitted: blended,
            cv_residuals: None,
            degenerate_windows,
            fallback: None,
        }
    }
}

impl<T: WLSSolver> Smoother<T> for SuperSmoother<T> {
    fn smooth_sorted(&self, x: &[T], y: &[T]) -> Result<SmoothFit<T>, AceError> {
        self.config.validate()?;
        check_input(x, y)?;
        Ok(self.run(x, y))
    }
}
