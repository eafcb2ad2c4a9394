//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates an ACE fit by coordinating the smoothers of the
//! algorithms layer. It owns the alternating inner/outer iteration, the
//! convergence and stall detection, input validation, and the result type.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Model
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// The alternating conditional expectation solver.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for ACE fits.
pub mod output;
