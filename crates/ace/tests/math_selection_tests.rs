#![cfg(feature = "dev")]
//! Tests for cross-validated span selection.
//!
//! These tests verify:
//! - Error measures applied to leave-one-out residuals
//! - Per-point selection of the best candidate span
//! - Bass enhancement toward the largest span
//!
//! ## Test Organization
//!
//! 1. **Error Measures** - Squared and absolute residual errors
//! 2. **Selection** - Argmin and tie handling
//! 3. **Bass Enhancement** - Strength and guard conditions

use approx::assert_relative_eq;

use ace::internals::math::selection::{CvError, SpanSelector};

const SPANS: [f64; 3] = [0.05, 0.2, 0.5];

// ============================================================================
// Error Measure Tests
// ============================================================================

/// Test both error measures.
#[test]
fn test_error_measures() {
    assert_relative_eq!(CvError::Squared.measure(-2.0), 4.0);
    assert_relative_eq!(CvError::Absolute.measure(-2.0), 2.0);
    assert_eq!(CvError::Absolute.curve(&[1.0, -3.0]), vec![1.0, 3.0]);
    assert_eq!(CvError::default(), CvError::Squared);
    assert_eq!(CvError::Absolute.name(), "Absolute");
}

// ============================================================================
// Selection Tests
// ============================================================================

/// Test that each point picks the span with the smallest error.
///
/// Ties go to the smaller span.
#[test]
fn test_select_argmin() {
    let errors = vec![vec![1.0, 3.0, 2.0], vec![2.0, 1.0, 2.0], vec![3.0, 2.0, 2.0]];
    let selector = SpanSelector::new(&SPANS, 0.0);

    let mut out = [0.0; 3];
    selector.select(&errors, &mut out);

    assert_eq!(out, [0.05, 0.2, 0.05]);
}

/// Test clipping to the candidate range.
#[test]
fn test_clip() {
    let selector = SpanSelector::new(&SPANS, 0.0);

    assert_eq!(selector.clip(0.01), 0.05);
    assert_eq!(selector.clip(0.3), 0.3);
    assert_eq!(selector.clip(0.9), 0.5);
}

// ============================================================================
// Bass Enhancement Tests
// ============================================================================

/// Test the strength of bass enhancement.
#[test]
fn test_enhance_strength() {
    let mid = SpanSelector::new(&SPANS, 5.0);
    assert_relative_eq!(
        mid.enhance(0.05, 0.5, 1.0),
        0.05 + 0.45 * 0.5f64.powi(5),
        epsilon = 1e-12
    );

    let full = SpanSelector::new(&SPANS, 10.0);
    assert_relative_eq!(full.enhance(0.05, 0.5, 1.0), 0.5, epsilon = 1e-12);
}

/// Test the conditions under which enhancement does nothing.
#[test]
fn test_enhance_guards() {
    let off = SpanSelector::new(&SPANS, 0.0);
    assert_eq!(off.enhance(0.05, 0.5, 1.0), 0.05);

    let on = SpanSelector::new(&SPANS, 5.0);
    assert_eq!(on.enhance(0.05, 1.0, 1.0), 0.05, "best equals bass");
    assert_eq!(on.enhance(0.05, 0.0, 1.0), 0.05, "zero error");
}

/// Test that enhancement applies during selection.
#[test]
fn test_select_with_enhancement() {
    let errors = vec![vec![0.5], vec![0.8], vec![1.0]];
    let selector = SpanSelector::new(&SPANS, 10.0);

    let mut out = [0.0];
    selector.select(&errors, &mut out);

    assert_relative_eq!(out[0], 0.5, epsilon = 1e-12);
}
