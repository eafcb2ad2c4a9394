//! Tests for the fluent builder and the prelude.
//!
//! These tests verify that configuration flows from the builder into the
//! solver and that invalid configurations are rejected at build time.
//!
//! ## Test Organization
//!
//! 1. **Defaults** - An empty builder yields the default configuration
//! 2. **Configuration** - Each setter reaches the solver configuration
//! 3. **Validation** - Invalid and duplicated parameters

use ace::prelude::*;

// ============================================================================
// Default Tests
// ============================================================================

/// Test that an empty builder produces the default configuration.
#[test]
fn test_default_config() {
    let model = Ace::<f64>::new().build().unwrap();
    let config = model.config();

    assert_eq!(*config, AceConfig::default());
    assert_eq!(config.max_outer_iterations, 200);
    assert_eq!(config.max_inner_iterations, 50);
    assert_eq!(config.sweep, Sequential);

    match &config.smoother {
        SmootherKind::Adaptive(s) => {
            assert_eq!(s.config.spans, vec![0.05, 0.2, 0.5]);
            assert_eq!(s.config.bass_enhancement, 0.0);
            assert_eq!(s.config.cv_error, Squared);
            assert_eq!(s.config.weight_function, Uniform);
            assert!(s.config.final_pass);
        }
        other => panic!("expected the supersmoother, got {}", other.name()),
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test that supersmoother settings reach the smoother.
#[test]
fn test_supersmoother_settings() {
    let config = Ace::<f64>::new()
        .spans(&[0.1, 0.3, 0.6, 0.9])
        .bass_enhancement(4.0)
        .cv_error(Absolute)
        .weight_function(Tricube)
        .final_pass(false)
        .to_config();

    let SmootherKind::Adaptive(s) = config.smoother else {
        panic!("expected the supersmoother");
    };
    assert_eq!(s.config.spans, vec![0.1, 0.3, 0.6, 0.9]);
    assert_eq!(s.config.bass_enhancement, 4.0);
    assert_eq!(s.config.cv_error, Absolute);
    assert_eq!(s.config.weight_function, Tricube);
    assert!(!s.config.final_pass);
}

/// Test that a fixed span replaces the supersmoother.
#[test]
fn test_fixed_span_setting() {
    let model = Ace::<f64>::new()
        .fixed_span(0.4)
        .weight_function(Epanechnikov)
        .build()
        .unwrap();

    assert_eq!(
        model.config().smoother,
        SmootherKind::FixedSpan(FixedSpanSmoother::new(0.4).weight_function(Epanechnikov))
    );
}

/// Test that solver settings reach the configuration.
#[test]
fn test_solver_settings() {
    let model = Ace::<f64>::new()
        .inner_tolerance(1e-3)
        .outer_tolerance(1e-6)
        .max_inner_iterations(10)
        .max_outer_iterations(30)
        .sweep(Jacobi)
        .build()
        .unwrap();
    let config = model.config();

    assert_eq!(config.inner_tolerance, 1e-3);
    assert_eq!(config.outer_tolerance, 1e-6);
    assert_eq!(config.max_inner_iterations, 10);
    assert_eq!(config.max_outer_iterations, 30);
    assert_eq!(config.sweep, Jacobi);
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Test that setting a parameter twice is rejected.
#[test]
fn test_duplicate_parameter() {
    let result = Ace::<f64>::new().spans(&[0.1, 0.5]).spans(&[0.2, 0.6]).build();
    assert_eq!(
        result.err(),
        Some(AceError::DuplicateParameter { parameter: "spans" })
    );

    let result = Ace::<f64>::new()
        .max_outer_iterations(10)
        .sweep(Jacobi)
        .max_outer_iterations(20)
        .build();
    assert_eq!(
        result.err(),
        Some(AceError::DuplicateParameter {
            parameter: "max_outer_iterations"
        })
    );
}

/// Test that invalid spans are rejected.
#[test]
fn test_invalid_spans() {
    let result = Ace::<f64>::new().spans(&[0.0, 0.5]).build();
    assert_eq!(result.err(), Some(AceError::InvalidSpan(0.0)));

    let result = Ace::<f64>::new().spans(&[0.5, 0.2]).build();
    assert_eq!(result.err(), Some(AceError::UnorderedSpans));

    let result = Ace::<f64>::new().spans(&[0.2, 0.2]).build();
    assert_eq!(result.err(), Some(AceError::UnorderedSpans));

    let result = Ace::<f64>::new().fixed_span(1.5).build();
    assert_eq!(result.err(), Some(AceError::InvalidSpan(1.5)));
}

/// Test that bass enhancement outside [0, 10] is rejected.
#[test]
fn test_invalid_bass_enhancement() {
    let result = Ace::<f64>::new().bass_enhancement(-1.0).build();
    assert_eq!(result.err(), Some(AceError::InvalidBassEnhancement(-1.0)));

    assert!(Ace::<f64>::new().bass_enhancement(10.0).build().is_ok());
}

/// Test that non-positive tolerances are rejected.
#[test]
fn test_invalid_tolerances() {
    let result = Ace::<f64>::new().inner_tolerance(0.0).build();
    assert_eq!(result.err(), Some(AceError::InvalidTolerance(0.0)));

    let result = Ace::<f64>::new().outer_tolerance(-1e-3).build();
    assert_eq!(result.err(), Some(AceError::InvalidTolerance(-1e-3)));
}

/// Test that iteration caps outside [1, 10000] are rejected.
#[test]
fn test_invalid_iterations() {
    let result = Ace::<f64>::new().max_inner_iterations(0).build();
    assert_eq!(result.err(), Some(AceError::InvalidIterations(0)));

    let result = Ace::<f64>::new().max_outer_iterations(10_001).build();
    assert_eq!(result.err(), Some(AceError::InvalidIterations(10_001)));
}

/// Test that error messages name the offending value.
#[test]
fn test_error_display() {
    let err = Ace::<f64>::new().spans(&[0.3, 2.0]).build().err().unwrap();
    assert!(err.to_string().contains('2'));

    let err = AceError::DimensionMismatch {
        expected: 3,
        got: 1,
    };
    let text = err.to_string();
    assert!(text.contains('3') && text.contains('1'));
}
