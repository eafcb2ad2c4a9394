//! Memory management and buffer recycling for the ACE solver.
//!
//! ## Purpose
//!
//! The alternating solver smooths every variable dozens of times. Each
//! smooth needs the variable's values in sorted order, the partial residual
//! gathered into that order, and somewhere to put the result. This module
//! owns those allocations so that one fit allocates them once.
//!
//! ## Design notes
//!
//! * **Centralized Ownership**: `AceBuffer` holds the sort permutations and
//!   sorted copies of every column plus the scratch vectors of one solver.
//! * **Lazy Expansion**: Scratch slots are resized on demand and never shrunk.
//! * **Per-solver**: Buffers are not shared between solver instances, so
//!   independent fits can run on separate threads.
//!
//! ## Key concepts
//!
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **AceBuffer**: Sort orders, sorted columns, and residual/target scratch space.
//!
//! ## Invariants
//!
//! * `orders[i]` is a permutation of `0..n` sorting predictor `i` ascending.
//! * `sorted_x[i][k] == x[i][orders[i][k]]`.
//!
//! ## Non-goals
//!
//! * Thread-local automatic caching (Jacobi sweeps allocate per-task scratch).
//! * Dynamic shrinking or aggressive memory reclamation.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Deref, DerefMut};
use num_traits::{Float, Zero};

// Internal dependencies
use crate::primitives::sorting::{argsort, gather};

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Get a mutable reference to the underlying vector.
    #[inline]
    pub fn as_vec_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Helper trait to simplify resizing and filling vectors.
pub trait VecExt<T> {
    /// Resize the vector to `n` and fill with `val`.
    fn assign(&mut self, n: usize, val: T);
}

impl<T: Clone> VecExt<T> for Vec<T> {
    fn assign(&mut self, n: usize, val: T) {
        if self.len() != n {
            self.clear();
            self.resize(n, val);
        } else {
            self.fill(val);
        }
    }
}

// ============================================================================
// AceBuffer - Working Memory for the ACE Solver
// ============================================================================

/// Working memory for one ACE fit.
#[derive(Debug, Clone)]
pub struct AceBuffer<T> {
    /// Ascending permutation of each predictor column.
    pub orders: Vec<Vec<usize>>,

    /// Each predictor column in ascending order.
    pub sorted_x: Vec<Vec<T>>,

    /// Ascending permutation of the response.
    pub y_order: Vec<usize>,

    /// Response in ascending order.
    pub sorted_y: Vec<T>,

    /// Partial residual θ(y) − Σφ in observation order.
    pub residual: Slot<T>,

    /// Smoothing target for the current variable in observation order.
    pub target: Slot<T>,

    /// Smoothing target gathered into the current variable's sorted order.
    pub sorted_target: Slot<T>,

    /// Σφ_i(x_i) in observation order.
    pub sum_phi: Slot<T>,
}

impl<T: Float> AceBuffer<T> {
    /// Sort every column once and allocate scratch space for `n` observations.
    pub fn new(x: &[Vec<T>], y: &[T]) -> Self {
        let n = y.len();
        let orders: Vec<Vec<usize>> = x.iter().map(|col| argsort(col)).collect();
        let sorted_x = x
            .iter()
            .zip(orders.iter())
            .map(|(col, order)| gather(col, order))
            .collect();
        let y_order = argsort(y);
        let sorted_y = gather(y, &y_order);

        let mut buffer = Self {
            orders,
            sorted_x,
            y_order,
            sorted_y,
            residual: Slot::new(n),
            target: Slot::new(n),
            sorted_target: Slot::new(n),
            sum_phi: Slot::new(n),
        };
        buffer.prepare(n);
        buffer
    }

    /// Reset all scratch slots to `n` zeros.
    pub fn prepare(&mut self, n: usize)
    where
        T: Zero + Clone,
    {
        self.residual.as_vec_mut().assign(n, T::zero());
        self.target.as_vec_mut().assign(n, T::zero());
        self.sorted_target.as_vec_mut().assign(n, T::zero());
        self.sum_phi.as_vec_mut().assign(n, T::zero());
    }
}
