//! Core types for grid processing.

use crate::error::{GridError, Result};
use aqi_common::BoundingBox;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Ordered cell-center coordinates of a regular lat/lon grid.
///
/// Both axes are strictly increasing and non-empty. Rows follow
/// `lat_values`, columns follow `lon_values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAxes {
    pub lat_values: Vec<f64>,
    pub lon_values: Vec<f64>,
    /// Latitude spacing in degrees.
    pub lat_step: f64,
    /// Longitude spacing in degrees.
    pub lon_step: f64,
    /// Region the axes were built for.
    pub bbox: BoundingBox,
}

impl GridAxes {
    /// Number of rows (latitude values).
    pub fn rows(&self) -> usize {
        self.lat_values.len()
    }

    /// Number of columns (longitude values).
    pub fn cols(&self) -> usize {
        self.lon_values.len()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row indices whose latitude lies within `[lo, hi]`.
    pub fn row_range(&self, lo: f64, hi: f64) -> Range<usize> {
        index_range(&self.lat_values, lo, hi)
    }

    /// Column indices whose longitude lies within `[lo, hi]`.
    pub fn col_range(&self, lo: f64, hi: f64) -> Range<usize> {
        index_range(&self.lon_values, lo, hi)
    }
}

fn index_range(values: &[f64], lo: f64, hi: f64) -> Range<usize> {
    let start = values.partition_point(|&v| v < lo);
    let end = values.partition_point(|&v| v <= hi);
    start..end.max(start)
}

/// Accumulated scalar values over the grid, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field {
    /// Create a field with every cell set to `baseline`.
    pub fn filled(rows: usize, cols: usize, baseline: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![baseline; rows * cols],
        }
    }

    /// Wrap existing row-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(GridError::ShapeMismatch {
                expected: (rows, cols),
                actual: (data.len(), 1),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major cell values.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Value at `(row, col)`, or `None` if out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Add a point's contribution cell by cell.
    pub fn accumulate(&mut self, contribution: &ContributionGrid) -> Result<()> {
        if contribution.shape() != self.shape() {
            return Err(GridError::ShapeMismatch {
                expected: self.shape(),
                actual: contribution.shape(),
            });
        }

        for row in contribution.window_rows.clone() {
            let start = row * self.cols;
            let cols = contribution.window_cols.clone();
            let dst = &mut self.data[start + cols.start..start + cols.end];
            let src = &contribution.data[start + cols.start..start + cols.end];
            for (d, s) in dst.iter_mut().zip(src) {
                *d += s;
            }
        }
        Ok(())
    }

    /// Minimum and maximum cell values, `None` for an empty field.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), &v| (min.min(v), max.max(v)),
        ))
    }

    /// `(row, col)` of the first cell holding the maximum value.
    pub fn argmax(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, &v) in self.data.iter().enumerate() {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((idx, v)),
            }
        }
        best.map(|(idx, _)| (idx / self.cols, idx % self.cols))
    }
}

/// One point's contribution to every cell of the grid.
///
/// Cells outside `window_rows` x `window_cols` are zero; the window lets
/// [`Field::accumulate`] skip them.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionGrid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    window_rows: Range<usize>,
    window_cols: Range<usize>,
}

impl ContributionGrid {
    /// All-zero grid with an empty window.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
            window_rows: 0..0,
            window_cols: 0..0,
        }
    }

    pub(crate) fn set_window(&mut self, rows: Range<usize>, cols: Range<usize>) {
        self.window_rows = rows;
        self.window_cols = cols;
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Row-major contribution values.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sum of all contributions.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}
