//! Board representation, placement enumeration and solution rendering.
//!
//! A board is a rectangular grid whose active cells must each be covered by
//! exactly one piece cell; inactive cells are holes. Active cells are numbered
//! in reading order (row-major), which is also their column order in the
//! constraint matrix.

use crate::matrix::Linfo;
use crate::pieces::Piece;
use crate::shape::Shape;

/// A board position as `(row, col)`.
pub type Position = (usize, usize);

/// A rectangular board of active cells and holes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Shape,
    /// Reading-order ordinal of every active cell, `None` for holes.
    ordinals: Vec<Option<usize>>,
    active_count: usize,
}

impl Board {
    pub fn new(cells: Shape) -> Self {
        let mut ordinals = Vec::with_capacity(cells.rows() * cells.cols());
        let mut active_count = 0;
        for row in 0..cells.rows() {
            for col in 0..cells.cols() {
                if cells.get(row, col) {
                    ordinals.push(Some(active_count));
                    active_count += 1;
                } else {
                    ordinals.push(None);
                }
            }
        }
        Self {
            cells,
            ordinals,
            active_count,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    /// Whether `(row, col)` is on the board and must be covered.
    #[inline]
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.cells.get(row, col)
    }

    /// Number of cells that must be covered.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Reading-order ordinal of an active cell.
    #[inline]
    pub fn cell_ordinal(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows() && col < self.cols() {
            self.ordinals[row * self.cols() + col]
        } else {
            None
        }
    }

    pub fn cells(&self) -> &Shape {
        &self.cells
    }

    /// Whether a layout anchored with its top-left corner at `anchor` fits.
    ///
    /// The layout's bounding box must lie inside the board and every occupied
    /// layout cell must land on an active cell. Empty layout cells may sit on holes.
    pub fn fits(&self, layout: &Shape, anchor: Position) -> bool {
        let (row, col) = anchor;
        if row + layout.rows() > self.rows() || col + layout.cols() > self.cols() {
            return false;
        }
        layout
            .occupied()
            .all(|(i, j)| self.is_active(row + i, col + j))
    }

    /// Every anchor at which `layout` fits, in row-major order.
    pub fn valid_positions(&self, layout: &Shape) -> Vec<Position> {
        let mut positions = Vec::new();
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if self.fits(layout, (row, col)) {
                    positions.push((row, col));
                }
            }
        }
        positions
    }
}

/// Paints a solution onto a grid of piece indices, `None` where no piece lies.
///
/// Row indices outside `linfos` are ignored.
pub fn solution_to_grid(
    board: &Board,
    pieces: &[Piece],
    linfos: &[Linfo],
    solution: &[usize],
) -> Vec<Vec<Option<usize>>> {
    let mut grid = vec![vec![None; board.cols()]; board.rows()];

    for linfo in solution.iter().filter_map(|&row| linfos.get(row)) {
        let Some(layout) = pieces
            .get(linfo.piece_index)
            .and_then(|piece| piece.layouts().get(linfo.layout_index))
        else {
            continue;
        };
        let (anchor_row, anchor_col) = linfo.position;
        for (i, j) in layout.occupied() {
            if let Some(cell) = grid
                .get_mut(anchor_row + i)
                .and_then(|line| line.get_mut(anchor_col + j))
            {
                *cell = Some(linfo.piece_index);
            }
        }
    }

    grid
}

/// Formats a solution as a human-readable grid.
///
/// Each covered cell shows the first letter of its piece name, holes show `.`
/// and active cells left uncovered show `?`.
pub fn format_solution(
    board: &Board,
    pieces: &[Piece],
    linfos: &[Linfo],
    solution: &[usize],
) -> String {
    let grid = solution_to_grid(board, pieces, linfos, solution);

    let mut output = String::with_capacity(board.rows() * (board.cols() + 1));
    for (row, line) in grid.iter().enumerate() {
        for (col, cell) in line.iter().enumerate() {
            let display_char = match cell {
                Some(piece_index) => pieces[*piece_index].name().chars().next().unwrap_or('#'),
                None if board.is_active(row, col) => '?',
                None => '.',
            };
            output.push(display_char);
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u8]]) -> Board {
        Board::new(Shape::from_bits(rows).unwrap())
    }

    #[test]
    fn test_single_cell_placement() {
        let board = board(&[&[1]]);
        let cell = Shape::filled(1, 1).unwrap();
        assert_eq!(board.valid_positions(&cell), vec![(0, 0)]);
    }

    #[test]
    fn test_no_placements_without_active_cells() {
        let board = board(&[&[0, 0], &[0, 0]]);
        assert_eq!(board.active_count(), 0);
        for shape in [Shape::filled(1, 1).unwrap(), Shape::filled(1, 2).unwrap()] {
            assert!(board.valid_positions(&shape).is_empty());
        }
    }

    #[test]
    fn test_positions_are_row_major_and_never_clipped() {
        let board = board(&[&[1, 1, 1], &[1, 1, 1]]);
        let domino = Shape::filled(1, 2).unwrap();
        assert_eq!(
            board.valid_positions(&domino),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
        let too_tall = Shape::filled(3, 1).unwrap();
        assert!(board.valid_positions(&too_tall).is_empty());
    }

    #[test]
    fn test_empty_layout_cells_may_cover_holes() {
        // L-tromino whose empty corner sits on the hole
        let board = board(&[&[1, 0], &[1, 1]]);
        let tromino = Shape::from_bits(&[&[1, 0], &[1, 1]]).unwrap();
        assert_eq!(board.valid_positions(&tromino), vec![(0, 0)]);

        let flipped = tromino.flip_horizontal();
        assert!(board.valid_positions(&flipped).is_empty());
    }

    #[test]
    fn test_cell_ordinals_skip_holes() {
        let board = board(&[&[1, 0, 1], &[0, 1, 1]]);
        assert_eq!(board.active_count(), 4);
        assert_eq!(board.cell_ordinal(0, 0), Some(0));
        assert_eq!(board.cell_ordinal(0, 1), None);
        assert_eq!(board.cell_ordinal(0, 2), Some(1));
        assert_eq!(board.cell_ordinal(1, 1), Some(2));
        assert_eq!(board.cell_ordinal(1, 2), Some(3));
        assert_eq!(board.cell_ordinal(2, 0), None);
    }

    #[test]
    fn test_format_solution_marks_holes_and_gaps() {
        let board = board(&[&[1, 1, 0], &[1, 1, 1]]);
        let pieces = vec![Piece::from_bits("D", &[&[1, 1]]).unwrap()];
        let linfos = vec![Linfo {
            name: "D".to_string(),
            piece_index: 0,
            layout_index: 0,
            position: (1, 1),
        }];
        assert_eq!(format_solution(&board, &pieces, &linfos, &[0]), "??.\n?DD\n");
    }
}
