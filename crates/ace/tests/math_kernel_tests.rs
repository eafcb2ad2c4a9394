#![cfg(feature = "dev")]
//! Tests for window weight functions.
//!
//! These tests verify the kernels used by tapered smoothing windows:
//! - Kernel values at known distances
//! - Compact support
//! - Window weight computation
//!
//! ## Test Organization
//!
//! 1. **Kernel Values** - Closed-form values and support
//! 2. **Window Weights** - Weights over a window of sorted points

use approx::assert_relative_eq;

use ace::internals::math::kernel::WeightFunction;

const ALL: [WeightFunction; 5] = [
    WeightFunction::Uniform,
    WeightFunction::Triangle,
    WeightFunction::Epanechnikov,
    WeightFunction::Biweight,
    WeightFunction::Tricube,
];

// ============================================================================
// Kernel Value Tests
// ============================================================================

/// Test that every kernel peaks at one at the center.
#[test]
fn test_kernels_at_center() {
    for wf in ALL {
        assert_relative_eq!(wf.compute_weight(0.0), 1.0);
    }
}

/// Test that every kernel vanishes outside the unit interval.
#[test]
fn test_kernels_compact_support() {
    for wf in ALL {
        assert_eq!(wf.compute_weight(1.0), 0.0, "{}", wf.name());
        assert_eq!(wf.compute_weight(-1.5), 0.0, "{}", wf.name());
    }
}

/// Test kernel values at half the bandwidth.
#[test]
fn test_kernel_values() {
    assert_relative_eq!(WeightFunction::Uniform.compute_weight(0.5), 1.0);
    assert_relative_eq!(WeightFunction::Triangle.compute_weight(0.5), 0.5);
    assert_relative_eq!(WeightFunction::Epanechnikov.compute_weight(0.5), 0.75);
    assert_relative_eq!(WeightFunction::Biweight.compute_weight(-0.5), 0.5625);
    assert_relative_eq!(WeightFunction::Tricube.compute_weight(0.5), 0.669921875);
}

/// Test kernel metadata.
#[test]
fn test_kernel_metadata() {
    assert_eq!(WeightFunction::default(), WeightFunction::Uniform);
    assert!(WeightFunction::Uniform.is_uniform());
    assert!(!WeightFunction::Tricube.is_uniform());
    assert_eq!(WeightFunction::Epanechnikov.name(), "Epanechnikov");
}

// ============================================================================
// Window Weight Tests
// ============================================================================

/// Test that tapered window weights are symmetric and peak at the center.
#[test]
fn test_window_weights_symmetric() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let mut weights = [0.0; 7];

    let sum = WeightFunction::Tricube.compute_window_weights(&x, 1, 5, 3.0, 2.0, &mut weights);

    assert_eq!(weights[0], 0.0, "outside the window is untouched");
    assert_eq!(weights[6], 0.0, "outside the window is untouched");
    assert_relative_eq!(weights[1], weights[5], epsilon = 1e-15);
    assert_relative_eq!(weights[2], weights[4], epsilon = 1e-15);
    assert_relative_eq!(weights[3], 1.0);
    assert!(weights[1] > 0.0, "window edges keep a small weight");
    assert!(weights[2] > weights[1]);
    assert_relative_eq!(sum, weights.iter().sum::<f64>(), epsilon = 1e-12);
}

/// Test that a zero radius gives every point weight one.
#[test]
fn test_window_weights_zero_radius() {
    let x = [2.0, 2.0, 2.0];
    let mut weights = [0.0; 3];

    let sum = WeightFunction::Biweight.compute_window_weights(&x, 0, 2, 2.0, 0.0, &mut weights);

    assert_eq!(weights, [1.0, 1.0, 1.0]);
    assert_relative_eq!(sum, 3.0);
}
