//! Immutable 2D boolean grids.
//!
//! A [`Shape`] is used both for piece layouts (occupied cells) and for boards
//! (active cells). Cells are stored row-major in a flat vector.

use std::fmt;

use crate::error::ConfigError;

/// A rectangular grid of boolean cells.
///
/// Two shapes are equal only if they have the same dimensions and the same
/// cell pattern, which is what layout de-duplication relies on.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Builds a shape from nested rows of cells.
    ///
    /// Fails if there are no rows, if the first row is empty, or if the rows
    /// differ in length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, ConfigError> {
        let first = rows.first().ok_or(ConfigError::EmptyShape)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(ConfigError::EmptyShape);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(ConfigError::RaggedShape {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Builds a shape from rows of `0`/`1` digits, the way piece tables are written.
    pub fn from_bits(rows: &[&[u8]]) -> Result<Self, ConfigError> {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.iter().map(|&bit| bit != 0).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// A `rows` x `cols` shape with every cell set.
    pub fn filled(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyShape);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![true; rows * cols],
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`, or `false` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Returns a copy of this shape with the cell at `(row, col)` changed.
    ///
    /// Out-of-bounds positions leave the shape untouched.
    pub fn with_cell(&self, row: usize, col: usize, value: bool) -> Self {
        let mut cells = self.cells.clone();
        if row < self.rows && col < self.cols {
            cells[row * self.cols + col] = value;
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Iterates over the `(row, col)` coordinates of set cells in reading order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    /// Rotates the shape a quarter turn counter-clockwise.
    ///
    /// The top-right cell becomes the top-left one; a `r` x `c` shape becomes `c` x `r`.
    pub fn rotate_ccw(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..self.cols {
            for col in 0..self.rows {
                cells.push(self.get(col, self.cols - 1 - row));
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Mirrors the shape left to right.
    pub fn flip_horizontal(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for col in (0..self.cols).rev() {
                cells.push(self.get(row, col));
            }
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                f.write_str(if self.get(row, col) { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({}x{}", self.rows, self.cols)?;
        for row in 0..self.rows {
            f.write_str(if row == 0 { ": " } else { "/" })?;
            for col in 0..self.cols {
                f.write_str(if self.get(row, col) { "#" } else { "." })?;
            }
        }
        f.write_str(")")
    }
}
