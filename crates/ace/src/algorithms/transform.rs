//! Fitted transform tables.
//!
//! ## Purpose
//!
//! A fitted ACE transform is only known at the sample points. This module
//! stores such a transform as a table sorted by its argument and evaluates
//! it anywhere by clamped linear interpolation. It also reads and writes the
//! tab-separated text form used for export.
//!
//! ## Invariants
//!
//! * `x` is sorted ascending and has the same length as `values`.
//!
//! ## Non-goals
//!
//! * Extrapolation beyond the fitted range (values are clamped).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::io::{BufRead, Write};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::interpolation::interpolate;
#[cfg(feature = "std")]
use crate::primitives::errors::AceError;
use crate::primitives::sorting::sort_by_x;

/// A one-dimensional transform known at a finite set of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform<T> {
    /// Arguments, ascending.
    pub x: Vec<T>,

    /// Transform values aligned with `x`.
    pub values: Vec<T>,
}

impl<T: Float> Transform<T> {
    /// Build a table from (argument, value) pairs in any order.
    pub fn from_pairs(x: &[T], values: &[T]) -> Self {
        let sorted = sort_by_x(x, values);
        Self {
            x: sorted.x,
            values: sorted.y,
        }
    }

    /// Number of points in the table.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Evaluate at `x_new`, clamping to the end values outside the table.
    pub fn evaluate(&self, x_new: T) -> T {
        interpolate(&self.x, &self.values, x_new)
    }

    /// The table with argument and value swapped, sorted by value.
    ///
    /// This is a generalized inverse: where the transform is not monotone
    /// the result interpolates between whichever points are adjacent in value.
    pub fn inverse(&self) -> Self {
        Self::from_pairs(&self.values, &self.x)
    }

    /// Write one `x<TAB>value` row per point.
    #[cfg(feature = "std")]
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), AceError>
    where
        T: core::fmt::Display,
    {
        for (x, v) in self.x.iter().zip(self.values.iter()) {
            writeln!(out, "{x}\t{v}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Read a table written by `write_to`.
    ///
    /// Rows may be separated by any whitespace; blank lines and lines
    /// starting with `#` are skipped. Rows are re-sorted by argument.
    #[cfg(feature = "std")]
    pub fn read_from<R: BufRead>(input: R) -> Result<Self, AceError> {
        let mut x = Vec::new();
        let mut values = Vec::new();

        for (idx, line) in input.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields = crate::model::io::parse_row::<T>(trimmed, idx + 1)?;
            if fields.len() != 2 {
                return Err(AceError::Parse {
                    line: idx + 1,
                    message: format!("expected 2 columns, found {}", fields.len()),
                });
            }
            x.push(fields[0]);
            values.push(fields[1]);
        }

        if x.is_empty() {
            return Err(AceError::EmptyInput);
        }
        Ok(Self::from_pairs(&x, &values))
    }
}
