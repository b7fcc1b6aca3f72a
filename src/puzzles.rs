//! Concrete tiling puzzles.
//!
//! A [`Puzzle`] bundles a board, a piece list and an optional placement
//! filter. Two families are provided:
//! - the calendar puzzle: a 7x7 board on which every piece is placed except
//!   over the cells naming a chosen month and day
//! - Dana Scott's chessboard problem: the twelve pentominoes on an 8x8 board
//!   with a 2x2 hole in the centre, plus three sub-problems that pin the X

use crate::error::ConfigError;
use crate::grid::{format_solution, Board};
use crate::matrix::{ExactCover, Linfo};
use crate::pieces::{from_table, pentominoes, pentominoes_named, Piece, CALENDAR_EXTRAS};
use crate::shape::Shape;
use crate::solver::{DancingLinks, SearchResult, SolverConfig};

/// A tiling problem ready to be turned into an exact cover.
#[derive(Clone)]
pub struct Puzzle {
    name: String,
    board: Board,
    pieces: Vec<Piece>,
    /// Placements matching this filter are removed from the matrix.
    exclude: Option<fn(&Linfo) -> bool>,
}

/// A puzzle's exact cover together with the search that ran on it.
#[derive(Clone, Debug)]
pub struct SolvedPuzzle {
    pub cover: ExactCover,
    pub result: SearchResult,
}

impl Puzzle {
    pub fn new(name: impl Into<String>, board: Board, pieces: Vec<Piece>) -> Result<Self, ConfigError> {
        if pieces.is_empty() {
            return Err(ConfigError::NoPieces);
        }
        Ok(Self {
            name: name.into(),
            board,
            pieces,
            exclude: None,
        })
    }

    /// Forbids every placement for which `exclude` returns `true`.
    pub fn excluding(mut self, exclude: fn(&Linfo) -> bool) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Builds the constraint matrix, with excluded placements cleared.
    pub fn exact_cover(&self) -> Result<ExactCover, ConfigError> {
        let mut cover = ExactCover::build(&self.board, &self.pieces)?;
        if let Some(exclude) = self.exclude {
            let cleared = cover.exclude(exclude);
            log::debug!("{}: excluded {} placements", self.name, cleared);
        }
        Ok(cover)
    }

    /// Builds the exact cover and searches it.
    pub fn solve(&self, config: SolverConfig) -> Result<SolvedPuzzle, ConfigError> {
        let cover = self.exact_cover()?;
        log::debug!(
            "{}: solving {} placements over {} constraints",
            self.name,
            cover.matrix.row_count(),
            cover.matrix.column_count()
        );
        let result = DancingLinks::new(&cover.matrix, config).find_solutions();
        Ok(SolvedPuzzle { cover, result })
    }

    /// Renders one solution of this puzzle as text.
    pub fn format_solution(&self, linfos: &[Linfo], solution: &[usize]) -> String {
        format_solution(&self.board, &self.pieces, linfos, solution)
    }
}

/// Three-letter month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Days per month, allowing February 29.
pub const DAYS_PER_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// The calendar board before the date cells are blocked.
///
/// Months fill the first two rows (six per row), days 1-31 fill the rest
/// (seven per row). The remaining `0` cells are off the board.
const CALENDAR_BOARD: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 0, 0, 0, 0],
];

/// Pentominoes used by the calendar puzzle, alongside [`CALENDAR_EXTRAS`].
const CALENDAR_PENTOMINOES: &str = "LNUVYZ";

/// Builds the calendar puzzle for a date. `month` is 1-based (1 = January).
pub fn calendar(month: u32, day: u32) -> Result<Puzzle, ConfigError> {
    let invalid = ConfigError::InvalidDate { month, day };
    if !(1..=12).contains(&month) {
        return Err(invalid);
    }
    let month_index = (month - 1) as usize;
    if !(1..=DAYS_PER_MONTH[month_index]).contains(&day) {
        return Err(invalid);
    }
    let day_index = (day - 1) as usize;

    let cells = Shape::from_bits(CALENDAR_BOARD)?
        .with_cell(month_index / 6, month_index % 6, false)
        .with_cell(2 + day_index / 7, day_index % 7, false);

    let mut pieces = pentominoes_named(CALENDAR_PENTOMINOES)?;
    pieces.extend(from_table(CALENDAR_EXTRAS)?);

    let name = format!("{}{:02}", MONTH_NAMES[month_index], day);
    Puzzle::new(name, Board::new(cells), pieces)
}

/// Every `(month, day)` pair the calendar puzzle accepts, in date order.
pub fn calendar_dates() -> impl Iterator<Item = (u32, u32)> {
    (1..=12u32).flat_map(|month| (1..=DAYS_PER_MONTH[(month - 1) as usize]).map(move |day| (month, day)))
}

/// Variants of Dana Scott's chessboard problem.
///
/// The sub-problems pin the X pentomino so that its centre lies on the given
/// (1-based row, column) square; together they cover every solution up to
/// symmetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChessboardVariant {
    /// No constraint on any placement.
    Full,
    /// X centred on row 2, column 3.
    XAt23,
    /// X centred on row 2, column 4.
    XAt24,
    /// X centred on row 3, column 3, and P restricted to its mirrored layouts.
    XAt33,
}

impl ChessboardVariant {
    pub const ALL: [Self; 4] = [Self::Full, Self::XAt23, Self::XAt24, Self::XAt33];

    /// Published number of solutions.
    pub const fn expected_solutions(self) -> usize {
        match self {
            Self::Full => 520,
            Self::XAt23 => 19,
            Self::XAt24 => 20,
            Self::XAt33 => 26,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "chessboard_full",
            Self::XAt23 => "chessboard_x23",
            Self::XAt24 => "chessboard_x24",
            Self::XAt33 => "chessboard_x33",
        }
    }

    fn exclusion(self) -> Option<fn(&Linfo) -> bool> {
        match self {
            Self::Full => None,
            Self::XAt23 => Some(x_not_at_23),
            Self::XAt24 => Some(x_not_at_24),
            Self::XAt33 => Some(x_not_at_33_or_p_unmirrored),
        }
    }
}

/// Whether `linfo` places the X anywhere but at `anchor`.
fn x_elsewhere(linfo: &Linfo, anchor: (usize, usize)) -> bool {
    linfo.name == "X" && linfo.position != anchor
}

fn x_not_at_23(linfo: &Linfo) -> bool {
    x_elsewhere(linfo, (0, 1))
}

fn x_not_at_24(linfo: &Linfo) -> bool {
    x_elsewhere(linfo, (0, 2))
}

fn x_not_at_33_or_p_unmirrored(linfo: &Linfo) -> bool {
    // the P layouts at even indices are the unmirrored ones
    x_elsewhere(linfo, (1, 1)) || (linfo.name == "P" && linfo.layout_index % 2 == 0)
}

/// Builds a chessboard problem: 8x8 with the central 2x2 squares removed.
pub fn chessboard(variant: ChessboardVariant) -> Result<Puzzle, ConfigError> {
    let mut cells = Shape::filled(8, 8)?;
    for (row, col) in [(3, 3), (3, 4), (4, 3), (4, 4)] {
        cells = cells.with_cell(row, col, false);
    }

    let puzzle = Puzzle::new(variant.name(), Board::new(cells), pentominoes()?)?;
    Ok(match variant.exclusion() {
        Some(exclude) => puzzle.excluding(exclude),
        None => puzzle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{ColumnSelection, Termination};

    fn sorted(mut solutions: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        for solution in &mut solutions {
            solution.sort_unstable();
        }
        solutions.sort();
        solutions
    }

    fn count(puzzle: &Puzzle) -> usize {
        puzzle
            .solve(SolverConfig::default())
            .unwrap()
            .result
            .solutions
            .len()
    }

    #[test]
    fn test_chessboard_subproblem_counts() {
        for variant in [
            ChessboardVariant::XAt23,
            ChessboardVariant::XAt24,
            ChessboardVariant::XAt33,
        ] {
            let puzzle = chessboard(variant).unwrap();
            assert_eq!(
                count(&puzzle),
                variant.expected_solutions(),
                "Wrong solution count for {variant:?}"
            );
        }
    }

    #[test]
    fn test_chessboard_full_count() {
        let solved = chessboard(ChessboardVariant::Full)
            .unwrap()
            .solve(SolverConfig::default())
            .unwrap();
        assert_eq!(solved.result.solutions.len(), 520);
        assert_eq!(solved.result.stats.termination, Termination::Exhausted);
        // every solution places all twelve pentominoes
        for solution in &solved.result.solutions {
            assert_eq!(solution.len(), 12);
        }
    }

    #[test]
    fn test_chessboard_excluded_rows_are_cleared() {
        let puzzle = chessboard(ChessboardVariant::XAt23).unwrap();
        let cover = puzzle.exact_cover().unwrap();
        assert_eq!(cover.matrix.row_count(), 1568);
        for (row, linfo) in cover.linfos.iter().enumerate() {
            let live = cover.matrix.row_columns(row).next().is_some();
            assert_eq!(live, linfo.name != "X" || linfo.position == (0, 1));
        }
    }

    #[test]
    fn test_chessboard_first_solution() {
        let puzzle = chessboard(ChessboardVariant::XAt23).unwrap();
        let solved = puzzle.solve(SolverConfig::default()).unwrap();
        let rendered = puzzle.format_solution(&solved.cover.linfos, &solved.result.solutions[0]);
        insta::assert_snapshot!(rendered);
    }

    #[test]
    fn test_strategies_agree_on_small_rectangle() {
        let board = Board::new(Shape::filled(4, 5).unwrap());
        let puzzle = Puzzle::new("4x5", board, pentominoes_named("LNPU").unwrap()).unwrap();

        let by_size = puzzle.solve(SolverConfig::default()).unwrap().result;
        let leftmost = puzzle
            .solve(SolverConfig {
                selection: ColumnSelection::FirstAvailable,
                max_solutions: None,
            })
            .unwrap()
            .result;

        assert_eq!(by_size.solutions.len(), 8);
        assert_eq!(sorted(by_size.solutions), sorted(leftmost.solutions));
        assert!(by_size.stats.updates < leftmost.stats.updates);
    }

    #[test]
    fn test_calendar_board_leaves_room_for_pieces() {
        let puzzle = calendar(1, 1).unwrap();
        assert_eq!(puzzle.name(), "Jan01");
        assert_eq!(puzzle.pieces().len(), 9);
        let piece_cells: usize = puzzle.pieces().iter().map(Piece::cell_count).sum();
        assert_eq!(puzzle.board().active_count(), piece_cells);
        assert!(!puzzle.board().is_active(0, 0));
        assert!(!puzzle.board().is_active(2, 0));
    }

    #[test]
    fn test_calendar_date_cells() {
        // December sits at the end of the second row, the 31st alone on the last row
        let puzzle = calendar(12, 31).unwrap();
        assert_eq!(puzzle.name(), "Dec31");
        assert!(!puzzle.board().is_active(1, 5));
        assert!(!puzzle.board().is_active(6, 2));
        assert!(puzzle.board().is_active(6, 1));
    }

    #[test]
    fn test_calendar_solution_counts() {
        assert_eq!(count(&calendar(1, 1).unwrap()), 414);
        assert_eq!(count(&calendar(2, 29).unwrap()), 262);
    }

    #[test]
    fn test_calendar_rejects_invalid_dates() {
        for (month, day) in [(0, 1), (13, 1), (2, 30), (4, 31), (6, 0)] {
            assert!(
                matches!(calendar(month, day), Err(ConfigError::InvalidDate { .. })),
                "{month}-{day} should be rejected"
            );
        }
    }

    #[test]
    fn test_calendar_dates_cover_leap_year() {
        let dates: Vec<(u32, u32)> = calendar_dates().collect();
        assert_eq!(dates.len(), 366);
        assert_eq!(dates.first(), Some(&(1, 1)));
        assert!(dates.contains(&(2, 29)));
        assert_eq!(dates.last(), Some(&(12, 31)));
    }

    #[test]
    fn test_puzzle_requires_pieces() {
        let board = Board::new(Shape::filled(1, 1).unwrap());
        assert!(matches!(
            Puzzle::new("empty", board, Vec::new()),
            Err(ConfigError::NoPieces)
        ));
    }
}
