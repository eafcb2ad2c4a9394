//! Tests for the scatterplot smoothers.
//!
//! These tests exercise the public smoothing API used by the ACE solver:
//! - The fixed-span local linear window smoother
//! - The variable-span supersmoother
//! - Input validation shared by both
//!
//! ## Test Organization
//!
//! 1. **Fixed Span** - Exactness, ties, ordering, offsets, leave-one-out residuals
//! 2. **Tapered Windows** - Non-uniform weight functions
//! 3. **Supersmoother** - Noise reduction, bass enhancement, fallbacks
//! 4. **Validation** - Rejected inputs and configurations

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use ace::prelude::*;

/// Noisy sine wave on [0, 1], returned sorted by x with the noiseless truth.
fn noisy_sine(n: usize, sd: f64, seed: u64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, sd).unwrap();

    let mut x: Vec<f64> = (0..n).map(|_| rng.random_range(0.0..1.0)).collect();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let truth: Vec<f64> = x
        .iter()
        .map(|&v| (2.0 * std::f64::consts::PI * v).sin())
        .collect();
    let y = truth.iter().map(|&t| t + noise.sample(&mut rng)).collect();
    (x, y, truth)
}

fn mse(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(u, v)| (u - v) * (u - v)).sum::<f64>() / a.len() as f64
}

// ============================================================================
// Fixed Span Tests
// ============================================================================

/// Test that span 1 reproduces ordinary least squares.
///
/// Every window covers the whole sample, so each fitted value lies on the
/// global regression line.
#[test]
fn test_full_span_reproduces_ols() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let y = vec![2.3, 3.9, 6.4, 7.7, 10.2, 12.1, 13.8, 16.3, 18.1, 19.6];

    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let sxy: f64 = x.iter().zip(&y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let sxx: f64 = x.iter().map(|a| (a - mx) * (a - mx)).sum();
    let slope = sxy / sxx;
    let intercept = my - slope * mx;

    let fit = FixedSpanSmoother::new(1.0).smooth(&x, &y).unwrap();

    for (xi, fi) in x.iter().zip(&fit.fitted) {
        assert_relative_eq!(*fi, intercept + slope * xi, epsilon = 1e-10);
    }
    assert_eq!(fit.degenerate_windows, 0);
    assert!(fit.cv_residuals.is_none());
}

/// Test that any span reproduces a straight line exactly.
///
/// Local linear fits have no bias on linear data.
#[test]
fn test_local_line_reproduces_linear_data() {
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 2.0).collect();

    for span in [0.2, 0.3, 0.5, 1.0] {
        let fit = FixedSpanSmoother::new(span).smooth(&x, &y).unwrap();
        for (fi, yi) in fit.fitted.iter().zip(&y) {
            assert_relative_eq!(*fi, *yi, epsilon = 1e-8);
        }
    }
}

/// Test that tied x-values receive identical fitted values.
#[test]
fn test_ties_share_fitted_value() {
    let x = vec![1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 4.0, 4.0, 5.0, 6.0];
    let y = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 5.0, 9.0, 8.0, 7.0];

    let fit = FixedSpanSmoother::new(0.3).smooth(&x, &y).unwrap();

    assert_eq!(fit.fitted[0], fit.fitted[1]);
    assert_eq!(fit.fitted[2], fit.fitted[3]);
    assert_eq!(fit.fitted[3], fit.fitted[4]);
    assert_eq!(fit.fitted[6], fit.fitted[7]);
}

/// Test that unsorted input is smoothed and returned in input order.
#[test]
fn test_unsorted_input_returns_input_order() {
    let (x, y, _) = noisy_sine(40, 0.2, 7);

    // Reverse-interleave the sorted sample.
    let order: Vec<usize> = (0..40).map(|k| (k * 17) % 40).collect();
    let xu: Vec<f64> = order.iter().map(|&k| x[k]).collect();
    let yu: Vec<f64> = order.iter().map(|&k| y[k]).collect();

    let smoother = FixedSpanSmoother::new(0.3);
    let sorted = smoother.smooth_sorted(&x, &y).unwrap();
    let unsorted = smoother.smooth(&xu, &yu).unwrap();

    for (pos, &k) in order.iter().enumerate() {
        assert_relative_eq!(unsorted.fitted[pos], sorted.fitted[k], epsilon = 1e-12);
    }
}

/// Test that leave-one-out residuals are at least as large as residuals.
///
/// Dividing by 1 − h with leverage h in (0, 1) can only inflate a residual.
#[test]
fn test_cross_validation_residuals_inflate() {
    let (x, y, _) = noisy_sine(60, 0.3, 11);

    let fit = FixedSpanSmoother::new(0.2)
        .cross_validate(true)
        .smooth(&x, &y)
        .unwrap();
    let cv = fit.cv_residuals.expect("cross-validation was requested");

    assert_eq!(cv.len(), y.len());
    for ((r, yi), fi) in cv.iter().zip(&y).zip(&fit.fitted) {
        assert!(r.abs() + 1e-12 >= (yi - fi).abs());
        assert_eq!(r.signum(), (yi - fi).signum());
    }
}

/// Test that a constant predictor yields the mean and a degenerate window.
#[test]
fn test_constant_x_uses_window_mean() {
    let x = vec![2.0; 6];
    let y = vec![1.0, 2.0, 3.0, 4.0, 5.0, 9.0];

    let fit = FixedSpanSmoother::new(0.5).smooth(&x, &y).unwrap();

    for fi in &fit.fitted {
        assert_relative_eq!(*fi, 4.0, epsilon = 1e-12);
    }
    assert_eq!(fit.degenerate_windows, 1);
}

/// Test that very small samples still produce a finite fit.
///
/// Windows never shrink below three points, or the whole sample.
#[test]
fn test_small_sample() {
    let x: Vec<f64> = vec![0.0, 1.0, 2.0];
    let y = vec![1.0, 0.0, 2.0];

    let fit = FixedSpanSmoother::new(0.05)
        .cross_validate(true)
        .smooth(&x, &y)
        .unwrap();

    assert!(fit.fitted.iter().all(|v| v.is_finite()));
    assert!(fit.cv_residuals.unwrap().iter().all(|v| v.is_finite()));
}

/// Test that x far from the origin smooths like the same spacing near zero.
///
/// Minute-spaced Unix timestamps keep every window's spread.
#[test]
fn test_offset_x_matches_shifted_x() {
    let far: Vec<f64> = (0..200).map(|k| 1.7e9 + 60.0 * k as f64).collect();
    let near: Vec<f64> = (0..200).map(|k| 60.0 * k as f64).collect();
    let y: Vec<f64> = (0..200).map(|k| (k as f64 / 20.0).sin()).collect();

    for wf in [Uniform, Tricube] {
        let smoother = FixedSpanSmoother::new(0.05)
            .weight_function(wf)
            .cross_validate(true);
        let at_offset = smoother.smooth(&far, &y).unwrap();
        let at_zero = smoother.smooth(&near, &y).unwrap();

        assert_eq!(at_offset.degenerate_windows, 0, "{}", wf.name());
        for (a, b) in at_offset.fitted.iter().zip(&at_zero.fitted) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }
}

// ============================================================================
// Tapered Window Tests
// ============================================================================

/// Test that tapered kernels still reproduce straight lines.
#[test]
fn test_tapered_windows_reproduce_line() {
    let x: Vec<f64> = (0..30).map(|i| i as f64 * 0.5).collect();
    let y: Vec<f64> = x.iter().map(|v| 1.5 - 0.25 * v).collect();

    for wf in [Triangle, Epanechnikov, Biweight, Tricube] {
        let fit = FixedSpanSmoother::new(0.3)
            .weight_function(wf)
            .smooth(&x, &y)
            .unwrap();
        for (fi, yi) in fit.fitted.iter().zip(&y) {
            assert_relative_eq!(*fi, *yi, epsilon = 1e-8);
        }
    }
}

/// Test that tapered kernels produce finite cross-validation residuals.
#[test]
fn test_tapered_cross_validation() {
    let (x, y, _) = noisy_sine(80, 0.2, 5);

    let fit = FixedSpanSmoother::new(0.2)
        .weight_function(Tricube)
        .cross_validate(true)
        .smooth(&x, &y)
        .unwrap();

    let cv = fit.cv_residuals.unwrap();
    assert!(cv.iter().all(|v| v.is_finite()));
}

// ============================================================================
// Supersmoother Tests
// ============================================================================

/// Test that the supersmoother reproduces a straight line.
#[test]
fn test_supersmoother_linear_data() {
    let x: Vec<f64> = (0..50).map(|i| i as f64 / 49.0).collect();
    let y: Vec<f64> = x.iter().map(|v| 4.0 * v + 1.0).collect();

    let fit = SuperSmoother::default().smooth(&x, &y).unwrap();

    for (fi, yi) in fit.fitted.iter().zip(&y) {
        assert_relative_eq!(*fi, *yi, epsilon = 1e-8);
    }
    assert!(fit.fallback.is_none());
}

/// Test that the supersmoother removes most of the noise.
#[test]
fn test_supersmoother_reduces_noise() {
    let (x, y, truth) = noisy_sine(200, 0.3, 42);

    let fit = SuperSmoother::default().smooth(&x, &y).unwrap();

    let raw = mse(&y, &truth);
    let smoothed = mse(&fit.fitted, &truth);
    assert!(
        smoothed < 0.5 * raw,
        "smoothed error {smoothed} should be well below raw error {raw}"
    );
}

/// Test that full bass enhancement reduces to the largest span.
///
/// With α = 10 every point whose best error is below the bass error is moved
/// all the way to the bass span.
#[test]
fn test_full_bass_enhancement_selects_bass_span() {
    let (x, y, _) = noisy_sine(120, 0.4, 3);

    let config = SuperSmootherConfig {
        bass_enhancement: 10.0,
        final_pass: false,
        ..SuperSmootherConfig::default()
    };
    let woofer = *config.spans.last().unwrap();

    let fit = SuperSmoother::new(config).smooth(&x, &y).unwrap();
    let bass = FixedSpanSmoother::new(woofer).smooth(&x, &y).unwrap();

    for (a, b) in fit.fitted.iter().zip(&bass.fitted) {
        assert_relative_eq!(*a, *b, epsilon = 1e-6);
    }
}

/// Test that absolute and squared error measures both give finite fits.
#[test]
fn test_supersmoother_error_measures() {
    let (x, y, _) = noisy_sine(100, 0.3, 9);

    for measure in [Squared, Absolute] {
        let config = SuperSmootherConfig {
            cv_error: measure,
            ..SuperSmootherConfig::default()
        };
        let fit = SuperSmoother::new(config).smooth(&x, &y).unwrap();
        assert_eq!(fit.fitted.len(), y.len());
        assert!(fit.fitted.iter().all(|v| v.is_finite()));
    }
}

/// Test that a sample with no spread falls back to the largest span.
#[test]
fn test_supersmoother_degenerate_fallback() {
    let x = vec![1.0; 8];
    let y = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];

    let fit = SuperSmoother::default().smooth(&x, &y).unwrap();

    assert_eq!(fit.fallback, Some(SmootherFallback::LargestSpan));
    for fi in &fit.fitted {
        assert_relative_eq!(*fi, 3.5, epsilon = 1e-12);
    }
}

/// Test that the smoother variant dispatches to the wrapped smoother.
#[test]
fn test_smoother_kind_dispatch() {
    let (x, y, _) = noisy_sine(50, 0.2, 21);

    let fixed = FixedSpanSmoother::new(0.4);
    let kind = SmootherKind::FixedSpan(fixed);

    assert_eq!(kind.name(), "Fixed span");
    assert_eq!(SmootherKind::<f64>::default().name(), "Supersmoother");
    assert_eq!(
        kind.smooth(&x, &y).unwrap().fitted,
        fixed.smooth(&x, &y).unwrap().fitted
    );
}

/// Test that smoothing works in single precision.
#[test]
fn test_supersmoother_f32() {
    let x: Vec<f32> = (0..40).map(|i| i as f32 / 39.0).collect();
    let y: Vec<f32> = x.iter().map(|v| v * v).collect();

    let fit = SuperSmoother::<f32>::default().smooth(&x, &y).unwrap();

    assert!(fit.fitted.iter().all(|v| v.is_finite()));
    for (fi, yi) in fit.fitted.iter().zip(&y) {
        assert!((fi - yi).abs() < 0.05);
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Test that empty input is rejected.
#[test]
fn test_empty_input() {
    let empty: Vec<f64> = Vec::new();
    let result = FixedSpanSmoother::new(0.5).smooth(&empty, &empty);
    assert_eq!(result, Err(AceError::EmptyInput));
}

/// Test that mismatched lengths are rejected.
#[test]
fn test_mismatched_lengths() {
    let result = FixedSpanSmoother::new(0.5).smooth(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
    assert_eq!(
        result,
        Err(AceError::MismatchedInputs {
            predictor: 0,
            x_len: 3,
            y_len: 2
        })
    );
}

/// Test that non-finite values are rejected.
#[test]
fn test_non_finite_values() {
    let result = SuperSmoother::default().smooth(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]);
    assert!(matches!(result, Err(AceError::InvalidNumericValue(_))));

    let result = SuperSmoother::default().smooth(&[1.0, 2.0, 3.0], &[1.0, f64::INFINITY, 3.0]);
    assert!(matches!(result, Err(AceError::InvalidNumericValue(_))));
}

/// Test that spans outside (0, 1] are rejected.
#[test]
fn test_invalid_fixed_span() {
    let x = [1.0, 2.0, 3.0];
    assert_eq!(
        FixedSpanSmoother::new(0.0).smooth(&x, &x),
        Err(AceError::InvalidSpan(0.0))
    );
    assert_eq!(
        FixedSpanSmoother::new(1.5).smooth(&x, &x),
        Err(AceError::InvalidSpan(1.5))
    );
}

/// Test that invalid supersmoother configurations are rejected.
#[test]
fn test_invalid_supersmoother_config() {
    let x = [1.0, 2.0, 3.0, 4.0];

    let unordered = SuperSmoother::new(SuperSmootherConfig {
        spans: vec![0.5, 0.2],
        ..SuperSmootherConfig::default()
    });
    assert_eq!(unordered.smooth(&x, &x), Err(AceError::UnorderedSpans));

    let single = SuperSmoother::new(SuperSmootherConfig {
        spans: vec![0.3],
        ..SuperSmootherConfig::default()
    });
    assert_eq!(single.smooth(&x, &x), Err(AceError::UnorderedSpans));

    let bass = SuperSmoother::new(SuperSmootherConfig {
        bass_enhancement: 11.0,
        ..SuperSmootherConfig::default()
    });
    assert_eq!(
        bass.smooth(&x, &x),
        Err(AceError::InvalidBassEnhancement(11.0))
    );
}
