use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Grid coordinate as `(row, col)`.
///
/// A cell is only meaningful together with the raster whose bounds produced
/// it; operations that dereference cells check bounds and report
/// [`Error::OutOfBounds`] on violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular grid of integer elevation samples, stored row-major.
///
/// Immutable once constructed: `rows >= 1`, `cols >= 1`, all rows equal
/// length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationRaster {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl ElevationRaster {
    /// Build a raster from explicit rows of elevation values.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::MalformedRaster {
                message: "raster has no rows".to_string(),
            });
        };
        let cols = first.len();
        if cols == 0 {
            return Err(Error::MalformedRaster {
                message: "raster has no columns".to_string(),
            });
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::MalformedRaster {
                    message: format!(
                        "row {} has {} cells, expected {}",
                        index + 1,
                        row.len(),
                        cols
                    ),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Parse the on-disk raster format: whitespace-separated integers, one
    /// row per line. Blank lines are ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (index, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for token in line.split_whitespace() {
                let value = token.parse::<i64>().map_err(|_| Error::MalformedRaster {
                    message: format!("invalid elevation value {:?} on line {}", token, index + 1),
                })?;
                row.push(value);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Assemble a raster from an already-flattened row-major cell buffer.
    /// Callers guarantee `cells.len() == rows * cols` with both nonzero.
    pub(crate) fn from_flat(rows: usize, cols: usize, cells: Vec<i64>) -> Self {
        debug_assert!(rows >= 1 && cols >= 1 && cells.len() == rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `cell` lies within the raster bounds.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Elevation at `cell`, or `None` when out of bounds.
    pub fn get(&self, cell: Cell) -> Option<i64> {
        if self.contains(cell) {
            Some(self.cells[cell.row * self.cols + cell.col])
        } else {
            None
        }
    }

    /// All cell values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.cells.iter().copied()
    }

    /// Rescale every cell into `[0, 255]` via one min/max pass.
    ///
    /// A flat raster (`max == min`) has no defined scale and is reported as
    /// [`Error::DegenerateRaster`]; callers decide whether to guard or skip.
    pub fn normalize(&self) -> Result<NormalizedRaster> {
        let mut min = self.cells[0];
        let mut max = self.cells[0];
        for &value in &self.cells {
            min = min.min(value);
            max = max.max(value);
        }
        if min == max {
            return Err(Error::DegenerateRaster { value: min });
        }

        let span = max - min;
        let cells = self
            .cells
            .iter()
            .map(|&value| (255 * (value - min) / span) as u8)
            .collect();
        Ok(NormalizedRaster {
            rows: self.rows,
            cols: self.cols,
            cells,
        })
    }

    /// Append a synthetic goal column holding the integer mean of the
    /// current last column, so border-to-border sweeps share one goal
    /// elevation regardless of start row.
    pub fn pad_goal_column(&self) -> ElevationRaster {
        let sum: i64 = (0..self.rows)
            .map(|row| self.cells[row * self.cols + self.cols - 1])
            .sum();
        let mean = sum / self.rows as i64;

        let mut cells = Vec::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            cells.extend_from_slice(&self.cells[row * self.cols..(row + 1) * self.cols]);
            cells.push(mean);
        }
        ElevationRaster {
            rows: self.rows,
            cols: self.cols + 1,
            cells,
        }
    }
}

/// Raster rescaled to the 8-bit display range, for rendering backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRaster {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl NormalizedRaster {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Normalized value at `cell`, or `None` when out of bounds.
    pub fn get(&self, cell: Cell) -> Option<u8> {
        if cell.row < self.rows && cell.col < self.cols {
            Some(self.cells[cell.row * self.cols + cell.col])
        } else {
            None
        }
    }

    /// Copy out the grid as rows, for consumers that render row-major
    /// arrays.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.cols)
            .map(|chunk| chunk.to_vec())
            .collect()
    }
}
