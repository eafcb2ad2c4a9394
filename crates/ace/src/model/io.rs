//! Delimited text input and transform export.
//!
//! ## Purpose
//!
//! This module parses whitespace-delimited observation tables into the
//! column arrays the solver takes, and writes fitted transforms as text.
//!
//! ## Design notes
//!
//! * **Layout**: One row per observation; the last column is the response,
//!   every other column is a predictor.
//! * **Comments**: Blank lines and lines starting with `#` are skipped.
//! * **Errors**: Malformed rows report their one-based line number.
//!
//! ## Non-goals
//!
//! * Quoted fields, headers, or delimiters other than whitespace.

// External dependencies
use num_traits::Float;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

// Internal dependencies
use crate::algorithms::transform::Transform;
use crate::primitives::errors::AceError;

/// Columns a data row needs: at least one predictor plus the response.
const MIN_COLUMNS: usize = 2;

/// Predictor columns and response parsed from a text table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    /// Predictor columns; `x[i][k]` is predictor `i` of observation `k`.
    pub x: Vec<Vec<T>>,

    /// Response, one value per observation.
    pub y: Vec<T>,
}

/// Parse one whitespace-delimited row of numbers.
pub fn parse_row<T: Float>(line: &str, line_no: usize) -> Result<Vec<T>, AceError> {
    line.split_whitespace()
        .map(|field| {
            field
                .parse::<f64>()
                .ok()
                .and_then(|v| T::from(v))
                .ok_or_else(|| AceError::Parse {
                    line: line_no,
                    message: format!("'{field}' is not a number"),
                })
        })
        .collect()
}

/// Read an observation table; the last column is the response.
pub fn read_table<T: Float, R: BufRead>(input: R) -> Result<Table<T>, AceError> {
    let mut x: Vec<Vec<T>> = Vec::new();
    let mut y = Vec::new();
    let mut width = None;

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_no = idx + 1;
        let mut row = parse_row::<T>(trimmed, line_no)?;

        match width {
            None => {
                if row.len() < MIN_COLUMNS {
                    return Err(AceError::Parse {
                        line: line_no,
                        message: format!(
                            "need at least {MIN_COLUMNS} columns (predictors then response), found {}",
                            row.len()
                        ),
                    });
                }
                width = Some(row.len());
                x = vec![Vec::new(); row.len() - 1];
            }
            Some(w) if w != row.len() => {
                return Err(AceError::Parse {
                    line: line_no,
                    message: format!("expected {w} columns, found {}", row.len()),
                });
            }
            Some(_) => {}
        }

        if let Some(response) = row.pop() {
            y.push(response);
        }
        for (col, value) in x.iter_mut().zip(row) {
            col.push(value);
        }
    }

    if y.is_empty() {
        return Err(AceError::EmptyInput);
    }
    Ok(Table { x, y })
}

/// Read an observation table from a file.
pub fn read_file<T: Float, P: AsRef<Path>>(path: P) -> Result<Table<T>, AceError> {
    let file = File::open(path)?;
    read_table(BufReader::new(file))
}

/// Write each transform to `dir` as `phi_{i}.txt` and `theta.txt`.
///
/// Returns the paths written, predictors first.
pub fn write_transforms<T: Float + core::fmt::Display, P: AsRef<Path>>(
    dir: P,
    phis: &[Transform<T>],
    theta: &Transform<T>,
) -> Result<Vec<PathBuf>, AceError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(phis.len() + 1);
    for (i, phi) in phis.iter().enumerate() {
        let path = dir.join(format!("phi_{i}.txt"));
        phi.write_to(BufWriter::new(File::create(&path)?))?;
        written.push(path);
    }

    let path = dir.join("theta.txt");
    theta.write_to(BufWriter::new(File::create(&path)?))?;
    written.push(path);

    Ok(written)
}
