//! High-level API for ACE regression.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements
//! a fluent builder for configuring the smoother and the alternating
//! solver, ending in an [`AceModel`] ready to fit.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Strict**: Setting a parameter twice is reported as an error at build time.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`AceBuilder`] via `Ace::new()`.
//! 2. Chain configuration methods (`.spans()`, `.max_outer_iterations()`, etc.).
//! 3. Call `.build()` to get an [`AceModel`], then `.fit()` it.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::regression::WLSSolver;
pub use crate::algorithms::smoother::{
    FixedSpanSmoother, SmoothFit, Smoother, SmootherFallback, SmootherKind,
};
pub use crate::algorithms::supersmoother::{SuperSmoother, SuperSmootherConfig};
pub use crate::algorithms::transform::Transform;
pub use crate::engine::executor::{AceConfig, SweepOrder};
pub use crate::engine::output::{AceResult, Convergence};
pub use crate::evaluation::diagnostics::Diagnostics;
pub use crate::math::kernel::WeightFunction;
pub use crate::math::selection::CvError;
pub use crate::model::AceModel;
pub use crate::primitives::errors::AceError;

/// Fluent builder for configuring an ACE model.
#[derive(Debug, Clone)]
pub struct AceBuilder<T> {
    /// Candidate spans of the supersmoother.
    pub spans: Option<Vec<T>>,

    /// Bass enhancement α in [0, 10].
    pub bass_enhancement: Option<T>,

    /// Measure applied to leave-one-out residuals.
    pub cv_error: Option<CvError>,

    /// Window taper.
    pub weight_function: Option<WeightFunction>,

    /// Whether the supersmoother runs its final small-span pass.
    pub final_pass: Option<bool>,

    /// Use one fixed span instead of the supersmoother.
    pub fixed_span: Option<T>,

    /// Fractional decrease ending backfitting.
    pub inner_tolerance: Option<T>,

    /// Fractional decrease ending the outer loop.
    pub outer_tolerance: Option<T>,

    /// Cap on backfitting sweeps per outer iteration.
    pub max_inner_iterations: Option<usize>,

    /// Cap on outer iterations.
    pub max_outer_iterations: Option<usize>,

    /// Update order within a sweep.
    pub sweep: Option<SweepOrder>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: WLSSolver> Default for AceBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WLSSolver> AceBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            spans: None,
            bass_enhancement: None,
            cv_error: None,
            weight_function: None,
            final_pass: None,
            fixed_span: None,
            inner_tolerance: None,
            outer_tolerance: None,
            max_inner_iterations: None,
            max_outer_iterations: None,
            sweep: None,
            duplicate_param: None,
        }
    }

    /// Set the supersmoother's candidate spans (strictly increasing, in (0, 1]).
    pub fn spans(mut self, spans: &[T]) -> Self {
        if self.spans.is_some() {
            self.duplicate_param = Some("spans");
        }
        self.spans = Some(spans.to_vec());
        self
    }

    /// Set the bass enhancement α in [0, 10]; larger values favor smoother fits.
    pub fn bass_enhancement(mut self, alpha: T) -> Self {
        if self.bass_enhancement.is_some() {
            self.duplicate_param = Some("bass_enhancement");
        }
        self.bass_enhancement = Some(alpha);
        self
    }

    /// Set the cross-validation error measure.
    pub fn cv_error(mut self, measure: CvError) -> Self {
        if self.cv_error.is_some() {
            self.duplicate_param = Some("cv_error");
        }
        self.cv_error = Some(measure);
        self
    }

    /// Set the kernel weight function applied inside each window.
    pub fn weight_function(mut self, wf: WeightFunction) -> Self {
        if self.weight_function.is_some() {
            self.duplicate_param = Some("weight_function");
        }
        self.weight_function = Some(wf);
        self
    }

    /// Enable or disable the supersmoother's final small-span pass.
    pub fn final_pass(mut self, enabled: bool) -> Self {
        if self.final_pass.is_some() {
            self.duplicate_param = Some("final_pass");
        }
        self.final_pass = Some(enabled);
        self
    }

    /// Smooth with one fixed span instead of the supersmoother.
    ///
    /// Supersmoother-only settings (spans, bass enhancement, error measure,
    /// final pass) are then ignored.
    pub fn fixed_span(mut self, span: T) -> Self {
        if self.fixed_span.is_some() {
            self.duplicate_param = Some("fixed_span");
        }
        self.fixed_span = Some(span);
        self
    }

    /// Set the backfitting convergence threshold.
    pub fn inner_tolerance(mut self, tolerance: T) -> Self {
        if self.inner_tolerance.is_some() {
            self.duplicate_param = Some("inner_tolerance");
        }
        self.inner_tolerance = Some(tolerance);
        self
    }

    /// Set the outer convergence threshold.
    pub fn outer_tolerance(mut self, tolerance: T) -> Self {
        if self.outer_tolerance.is_some() {
            self.duplicate_param = Some("outer_tolerance");
        }
        self.outer_tolerance = Some(tolerance);
        self
    }

    /// Set the maximum number of backfitting sweeps per outer iteration.
    pub fn max_inner_iterations(mut self, iterations: usize) -> Self {
        if self.max_inner_iterations.is_some() {
            self.duplicate_param = Some("max_inner_iterations");
        }
        self.max_inner_iterations = Some(iterations);
        self
    }

    /// Set the maximum number of outer iterations.
    pub fn max_outer_iterations(mut self, iterations: usize) -> Self {
        if self.max_outer_iterations.is_some() {
            self.duplicate_param = Some("max_outer_iterations");
        }
        self.max_outer_iterations = Some(iterations);
        self
    }

    /// Set the update order within a backfitting sweep.
    pub fn sweep(mut self, order: SweepOrder) -> Self {
        if self.sweep.is_some() {
            self.duplicate_param = Some("sweep");
        }
        self.sweep = Some(order);
        self
    }

    /// Assemble the solver configuration without validating it.
    pub fn to_config(&self) -> AceConfig<T> {
        let defaults = AceConfig::default();
        let weight_function = self.weight_function.unwrap_or_default();

        let smoother = match self.fixed_span {
            Some(span) => SmootherKind::FixedSpan(
                FixedSpanSmoother::new(span).weight_function(weight_function),
            ),
            None => {
                let base = SuperSmootherConfig::default();
                SmootherKind::Adaptive(SuperSmoother::new(SuperSmootherConfig {
                    spans: self.spans.clone().unwrap_or(base.spans),
                    bass_enhancement: self.bass_enhancement.unwrap_or(base.bass_enhancement),
                    cv_error: self.cv_error.unwrap_or(base.cv_error),
                    weight_function,
                    final_pass: self.final_pass.unwrap_or(base.final_pass),
                }))
            }
        };

        AceConfig {
            smoother,
            inner_tolerance: self.inner_tolerance.unwrap_or(defaults.inner_tolerance),
            outer_tolerance: self.outer_tolerance.unwrap_or(defaults.outer_tolerance),
            max_inner_iterations: self
                .max_inner_iterations
                .unwrap_or(defaults.max_inner_iterations),
            max_outer_iterations: self
                .max_outer_iterations
                .unwrap_or(defaults.max_outer_iterations),
            sweep: self.sweep.unwrap_or(defaults.sweep),
        }
    }

    /// Validate the configuration and create an unfitted model.
    pub fn build(self) -> Result<AceModel<T>, AceError>
    where
        T: Send + Sync + 'static,
    {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let config = self.to_config();
        Validator::validate_config(&config)?;

        Ok(AceModel::new(config))
    }
}
