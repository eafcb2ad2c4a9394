//! Layer 3: Algorithms
//!
//! This layer implements the smoothers the ACE solver is built on: local
//! least-squares lines over sliding windows, Friedman's variable-span
//! supersmoother, and the interpolated transform tables a fit produces. It
//! contains the numerical core but is orchestrated by the engine layer.

// Local least-squares lines and weighted sums.
pub mod regression;

// The `Smoother` capability and the fixed-span window smoother.
pub mod smoother;

// Variable-span smoothing by local cross-validation.
pub mod supersmoother;

// Clamped piecewise-linear interpolation.
pub mod interpolation;

// Fitted transform tables.
pub mod transform;
