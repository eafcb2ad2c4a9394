//! Windowing primitives for the fixed-span smoother.
//!
//! This module provides the sliding neighborhood used by the local linear
//! smoother: a fixed number of nearest ranks around each point, truncated
//! (shifted inward) at the ends of the data rather than wrapped or padded.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use num_traits::Float;

/// Smallest window that still supports a local line plus a left-out point.
pub const MIN_WINDOW: usize = 3;

// Inclusive window bounds `[left, right]` for a local fit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    // Left boundary index (inclusive).
    pub left: usize,

    // Right boundary index (inclusive).
    pub right: usize,
}

impl Window {
    // Place a window of `window_size` ranks symmetrically around `idx`,
    // shifting it inward where it would cross either end.
    #[inline]
    pub fn initialize(idx: usize, window_size: usize, n: usize) -> Self {
        debug_assert!(
            window_size >= 1,
            "initialize_window: window_size must be at least 1"
        );

        if window_size >= n {
            return Self {
                left: 0,
                right: n.saturating_sub(1),
            };
        }

        let half = window_size / 2;
        let mut left = idx.saturating_sub(half);
        let max_left = n - window_size;
        if left > max_left {
            left = max_left;
        }

        let right = left + window_size - 1;
        Self { left, right }
    }

    // Widen the window so that no tie group is split across its edges.
    #[inline]
    pub fn cover_ties(self, group_start: &[usize], group_end: &[usize]) -> Self {
        Self {
            left: group_start[self.left],
            right: group_end[self.right],
        }
    }

    // Calculate the number of ranks ⌈span·n⌉ for a span, clamped to [MIN_WINDOW, n].
    //
    // Window sizes scale with n, so small datasets get proportionally
    // smaller neighborhoods; the clamp only bites when n is tiny.
    #[inline]
    pub fn size_for_span<T: Float>(n: usize, span: T) -> usize {
        let epsilon = T::from(1e-9).unwrap();
        let span_n = span * T::from(n).unwrap() - epsilon;
        let size = span_n.ceil().to_usize().unwrap_or(0);
        usize::max(MIN_WINDOW.min(n), usize::min(n, size))
    }
}

// Boundaries of runs of equal values in sorted data.
//
// `start[i]` and `end[i]` are the first and last index of the run holding `i`.
pub fn tie_groups<T: Float>(x: &[T]) -> (Vec<usize>, Vec<usize>) {
    let n = x.len();
    let mut start = vec![0; n];
    let mut end = vec![0; n];

    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && x[j + 1] == x[i] {
            j += 1;
        }
        for k in i..=j {
            start[k] = i;
            end[k] = j;
        }
        i = j + 1;
    }

    (start, end)
}
