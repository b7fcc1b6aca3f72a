//! Exact-cover constraint matrix construction.
//!
//! Every valid placement of every layout of every piece becomes one matrix
//! row. Columns `0..pieces` say "this piece is used"; the remaining columns,
//! one per active board cell in reading order, say "this cell is covered".
//! A solution picks rows so that every column holds exactly one `true`.

use std::fmt;

use crate::error::ConfigError;
use crate::grid::{Board, Position};
use crate::pieces::Piece;

/// A rectangular boolean matrix stored row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintMatrix {
    row_count: usize,
    column_count: usize,
    cells: Vec<bool>,
}

impl ConstraintMatrix {
    /// An all-`false` matrix with the given shape.
    pub fn zeros(row_count: usize, column_count: usize) -> Self {
        Self {
            row_count,
            column_count,
            cells: vec![false; row_count * column_count],
        }
    }

    /// An empty matrix with `column_count` columns, ready for [`push_row`](Self::push_row).
    pub fn with_columns(column_count: usize) -> Self {
        Self::zeros(0, column_count)
    }

    /// Builds a matrix from explicit rows.
    ///
    /// The width is taken from the first row; every other row must match it.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, ConfigError> {
        let column_count = rows.first().map_or(0, |row| row.as_ref().len());
        let mut matrix = Self::with_columns(column_count);
        for row in rows {
            matrix.push_row(row.as_ref())?;
        }
        Ok(matrix)
    }

    /// Appends a row, rejecting it if its width differs from the matrix width.
    pub fn push_row(&mut self, row: &[bool]) -> Result<(), ConfigError> {
        if row.len() != self.column_count {
            return Err(ConfigError::NonRectangularMatrix {
                row: self.row_count,
                expected: self.column_count,
                found: row.len(),
            });
        }
        self.cells.extend_from_slice(row);
        self.row_count += 1;
        Ok(())
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> bool {
        row < self.row_count
            && column < self.column_count
            && self.cells[row * self.column_count + column]
    }

    /// The cells of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.column_count;
        &self.cells[start..start + self.column_count]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        (0..self.row_count).map(move |row| self.row(row))
    }

    /// Column indices holding `true` in a row, left to right.
    pub fn row_columns(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(row)
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell)
            .map(|(column, _)| column)
    }

    /// Clears a row so it can never be chosen, keeping row numbering intact.
    pub fn clear_row(&mut self, row: usize) {
        if row < self.row_count {
            let start = row * self.column_count;
            self.cells[start..start + self.column_count].fill(false);
        }
    }
}

/// Describes the placement a matrix row stands for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Linfo {
    /// Name of the placed piece.
    pub name: String,
    /// Index of the piece in the problem's piece list (and its matrix column).
    pub piece_index: usize,
    /// Index into the piece's layouts.
    pub layout_index: usize,
    /// Top-left anchor of the layout on the board.
    pub position: Position,
}

impl fmt::Display for Linfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (piece {}, layout {}) at ({}, {})",
            self.name, self.piece_index, self.layout_index, self.position.0, self.position.1
        )
    }
}

/// A tiling problem in exact-cover form.
#[derive(Clone, Debug)]
pub struct ExactCover {
    pub matrix: ConstraintMatrix,
    /// One descriptor per matrix row.
    pub linfos: Vec<Linfo>,
}

impl ExactCover {
    /// Builds the constraint matrix and placement descriptors for a board and piece list.
    ///
    /// Rows are emitted piece by piece, layout by layout, anchor by anchor in
    /// row-major order, so the same inputs always produce the same row numbering.
    pub fn build(board: &Board, pieces: &[Piece]) -> Result<Self, ConfigError> {
        if pieces.is_empty() {
            return Err(ConfigError::NoPieces);
        }

        let piece_count = pieces.len();
        let column_count = piece_count + board.active_count();
        let mut matrix = ConstraintMatrix::with_columns(column_count);
        let mut linfos = Vec::new();
        let mut row = vec![false; column_count];

        for (piece_index, piece) in pieces.iter().enumerate() {
            for (layout_index, layout) in piece.layouts().iter().enumerate() {
                for position in board.valid_positions(layout) {
                    row.fill(false);
                    row[piece_index] = true;
                    for (i, j) in layout.occupied() {
                        // valid positions only land on active cells
                        if let Some(ordinal) = board.cell_ordinal(position.0 + i, position.1 + j) {
                            row[piece_count + ordinal] = true;
                        }
                    }
                    matrix.push_row(&row)?;
                    linfos.push(Linfo {
                        name: piece.name().to_string(),
                        piece_index,
                        layout_index,
                        position,
                    });
                }
            }
        }

        log::info!(
            "built constraint matrix: {} rows x {} columns ({} pieces, {} cells)",
            matrix.row_count(),
            matrix.column_count(),
            piece_count,
            board.active_count()
        );

        Ok(Self { matrix, linfos })
    }

    /// Clears every row whose descriptor matches `exclude`.
    ///
    /// Cleared rows stay in place so row indices keep matching [`ExactCover::linfos`].
    /// Returns the number of rows cleared.
    pub fn exclude<F>(&mut self, mut exclude: F) -> usize
    where
        F: FnMut(&Linfo) -> bool,
    {
        let mut cleared = 0;
        for (row, linfo) in self.linfos.iter().enumerate() {
            if exclude(linfo) {
                self.matrix.clear_row(row);
                cleared += 1;
            }
        }
        cleared
    }

    /// Looks up the placements a solution is made of.
    pub fn placements<'a>(&'a self, solution: &'a [usize]) -> impl Iterator<Item = &'a Linfo> + 'a {
        solution.iter().filter_map(|&row| self.linfos.get(row))
    }
}
