//! # ACE: Alternating Conditional Expectations for Rust
//!
//! Nonparametric transformation regression with Friedman's variable-span
//! supersmoother, generic over `f32`/`f64` and usable without the standard
//! library.
//!
//! ## What is ACE?
//!
//! ACE (Breiman & Friedman, 1985) looks for a transform θ of the response
//! and transforms φ₁…φₚ of the predictors that make
//!
//! ```text
//! θ(y) ≈ φ₁(x₁) + φ₂(x₂) + … + φₚ(xₚ)
//! ```
//!
//! as closely as possible in mean square, with θ standardized to mean 0 and
//! variance 1. No functional form is assumed: every transform is learned by
//! repeatedly smoothing partial residuals against one variable at a time.
//! The fitted transforms are tabulated at the observations and can be
//! inspected, exported, or used for prediction.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use ace::prelude::*;
//!
//! let x0: Vec<f64> = (0..60).map(|i| i as f64 / 59.0).collect();
//! let x1: Vec<f64> = (0..60).map(|i| ((i * 7) % 60) as f64 / 59.0).collect();
//! let y: Vec<f64> = x0
//!     .iter()
//!     .zip(&x1)
//!     .map(|(a, b)| (a + b * b).exp())
//!     .collect();
//!
//! // Build the model
//! let mut model = Ace::new()
//!     .spans(&[0.05, 0.2, 0.5])   // Supersmoother candidate spans
//!     .max_outer_iterations(100)  // Cap on alternating iterations
//!     .build()?;
//!
//! // Fit the transforms
//! let result = model.fit(&[x0, x1], &y)?;
//! println!("{}", result);
//!
//! // Predict at a new point: θ⁻¹(φ₀(0.5) + φ₁(0.5))
//! let y_hat = model.evaluate(&[0.5, 0.5])?;
//! # assert!(y_hat.is_finite());
//! # Result::<(), AceError>::Ok(())
//! ```
//!
//! The printed result summarizes the fit, then lists the transforms at each
//! observation:
//!
//! ```text
//! Summary:
//!   Observations: 60
//!   Predictors:   2
//!   Status:       Converged
//!   ...
//!
//! ACE Diagnostics:
//!   RMSE:         ...
//!   R²:           ...
//!
//! Transforms:
//!    Row        Theta        Phi_0        Phi_1
//!   ...
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use ace::prelude::*;
//!
//! # let x0: Vec<f64> = (0..40).map(|i| i as f64).collect();
//! # let y: Vec<f64> = x0.iter().map(|v| v.sqrt()).collect();
//! let mut model = Ace::new()
//!     .spans(&[0.05, 0.2, 0.5])   // Candidate spans (tweeter, midrange, woofer)
//!     .bass_enhancement(2.0)      // Push toward the largest span
//!     .cv_error(Absolute)         // Cross-validation error measure
//!     .weight_function(Uniform)   // Window taper
//!     .final_pass(true)           // Smooth the blended fit once more
//!     .inner_tolerance(1e-4)      // Backfitting convergence threshold
//!     .outer_tolerance(1e-5)      // Outer convergence threshold
//!     .max_inner_iterations(50)   // Sweeps per outer iteration
//!     .max_outer_iterations(200)  // Outer iterations
//!     .sweep(Sequential)          // Update order within a sweep
//!     .build()?;
//!
//! let result = model.fit(&[x0], &y)?;
//! println!("{} after {} iterations", result.convergence.name(), result.outer_iterations);
//! # Result::<(), AceError>::Ok(())
//! ```
//!
//! A single fixed span replaces the supersmoother entirely:
//!
//! ```rust
//! use ace::prelude::*;
//!
//! let model = Ace::<f64>::new().fixed_span(0.3).build()?;
//! assert!(!model.is_fitted());
//! # Result::<(), AceError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `fit` returns a `Result<&AceResult<T>, AceError>`; the model keeps the
//! fitted state for later evaluation.
//!
//! - **`Ok(&AceResult<T>)`**: Transforms, error history, and diagnostics.
//! - **`Err(AceError)`**: Invalid input (e.g. mismatched column lengths,
//!   non-finite values) or configuration.
//!
//! ```rust
//! use ace::prelude::*;
//!
//! let mut model = Ace::new().build()?;
//!
//! match model.fit(&[vec![1.0, 2.0, 3.0]], &[1.0, 2.0]) {
//!     Ok(result) => println!("θ: {:?}", result.theta),
//!     Err(e) => eprintln!("Fitting failed: {}", e),
//! }
//!
//! // Evaluating before a successful fit is an error
//! assert_eq!(model.evaluate(&[1.0]), Err(AceError::NotFitted));
//! # Result::<(), AceError>::Ok(())
//! ```
//!
//! ### Files
//!
//! With the `std` feature, a model can be fitted from a whitespace-delimited
//! table whose last column is the response, and its transforms written back
//! out as two-column text files:
//!
//! ```rust,no_run
//! use ace::prelude::*;
//!
//! let mut model = Ace::<f64>::new().build()?;
//! model.fit_from_file("data.txt")?;
//! model.write_transforms("transforms")?;
//! # Result::<(), AceError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! Disable default features to remove the standard library dependency.
//! File input and export are unavailable in that configuration.
//!
//! ```toml
//! [dependencies]
//! ace = { version = "0.1", default-features = false }
//! ```
//!
//! ## Parallel Execution
//!
//! The `parallel` feature enables [`rayon`](https://docs.rs/rayon) for the
//! `Jacobi` sweep order, which updates every predictor transform from the
//! same residual and therefore smooths all predictors concurrently.
//!
//! ## References
//!
//! - Breiman, L. & Friedman, J. H. (1985). "Estimating Optimal Transformations
//!   for Multiple Regression and Correlation"
//! - Friedman, J. H. (1984). "A Variable Span Smoother"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - smoothers and transforms.
mod algorithms;

// Layer 4: Evaluation - fit quality metrics.
mod evaluation;

// Layer 5: Engine - the alternating solver.
mod engine;

// Layer 6: Model - fitting, prediction, and file I/O.
mod model;

// High-level fluent API for ACE regression.
mod api;

// Standard ACE prelude.
pub mod prelude {
    pub use crate::api::{
        AceBuilder as Ace, AceConfig, AceError, AceModel, AceResult, Convergence, CvError,
        CvError::Absolute,
        CvError::Squared,
        Diagnostics, FixedSpanSmoother, SmoothFit, Smoother, SmootherFallback, SmootherKind,
        SuperSmoother,
        SuperSmootherConfig, SweepOrder,
        SweepOrder::Jacobi,
        SweepOrder::Sequential,
        Transform, WeightFunction,
        WeightFunction::Biweight,
        WeightFunction::Epanechnikov,
        WeightFunction::Triangle,
        WeightFunction::Tricube,
        WeightFunction::Uniform,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod model {
        pub use crate::model::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
