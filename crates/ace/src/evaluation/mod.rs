//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer calculates fit-quality metrics from the transforms an ACE fit
//! produces: residual error, explained variance and correlation between the
//! transformed response and the sum of predictor transforms.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Model
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Diagnostic metrics for fit quality assessment.
pub mod diagnostics;
