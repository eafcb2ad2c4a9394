//! Sorting utilities for smoother and solver inputs.
//!
//! ## Purpose
//!
//! Every smoothing step works on data ordered along one axis, while the ACE
//! solver keeps its transforms in observation order. This module provides
//! the permutations that move values between the two orders.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting to preserve the relative order of equal values.
//! * **Reuse**: A variable's permutation is computed once per fit and applied many times.
//! * **Efficiency**: Maintains an O(n) index mapping for restoring original order.
//!
//! ## Key concepts
//!
//! ### Sort-Process-Unsort Pattern
//! 1. **Sort**: Input data is sorted by x-coordinates, creating an index mapping.
//! 2. **Process**: Smoothing operates on the sorted sequence.
//! 3. **Unsort**: Results are mapped back to original indices in O(n) time.
//!
//! ## Invariants
//!
//! * The index mapping is a valid permutation of `0..n`.
//! * `indices[sorted_pos] = original_pos`.
//!
//! ## Non-goals
//!
//! * This module does not validate data; inputs are finite by the time they get here.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Data Structures
// ============================================================================

/// Result of sorting input data by x-coordinates.
pub struct SortedData<T> {
    /// Sorted x-coordinates.
    pub x: Vec<T>,

    /// Y-coordinates reordered to match sorted x-coordinates.
    pub y: Vec<T>,

    /// Index mapping where `indices[sorted_pos] = original_pos`.
    pub indices: Vec<usize>,
}

// ============================================================================
// Sorting Functions
// ============================================================================

/// Stable ascending permutation of `values`.
#[inline]
pub fn argsort<T: Float>(values: &[T]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    if values.windows(2).all(|w| w[0] <= w[1]) {
        return indices;
    }
    indices.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
    });
    indices
}

/// Sort input data by x-coordinates in ascending order.
#[inline]
pub fn sort_by_x<T: Float>(x: &[T], y: &[T]) -> SortedData<T> {
    let indices = argsort(x);
    SortedData {
        x: gather(x, &indices),
        y: gather(y, &indices),
        indices,
    }
}

/// Reorder `values` by a permutation: `out[k] = values[indices[k]]`.
#[inline]
pub fn gather<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i]).collect()
}

/// Reorder `values` into a preallocated buffer.
#[inline]
pub fn gather_into<T: Copy>(values: &[T], indices: &[usize], out: &mut Vec<T>) {
    out.clear();
    out.extend(indices.iter().map(|&i| values[i]));
}

/// Map sorted results back to the original input order in O(n) time.
#[inline]
pub fn unsort<T: Float>(sorted_values: &[T], indices: &[usize]) -> Vec<T> {
    let mut result = vec![T::zero(); indices.len()];
    unsort_into(sorted_values, indices, &mut result);
    result
}

/// Map sorted results back to the original order into an existing slice.
#[inline]
pub fn unsort_into<T: Copy>(sorted_values: &[T], indices: &[usize], out: &mut [T]) {
    for (sorted_idx, &orig_idx) in indices.iter().enumerate() {
        out[orig_idx] = sorted_values[sorted_idx];
    }
}
