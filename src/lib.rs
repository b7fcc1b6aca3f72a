//! Polyomino Tiling Solver Library
//!
//! Turns a board and a set of polyomino pieces into an exact cover problem and
//! enumerates every tiling with Knuth's dancing links.
//!
//! The pipeline, leaves first:
//! - [`geometry`]: the distinct orientations ("layouts") of each piece
//! - [`grid`]: the anchors at which a layout fits on the board
//! - [`matrix`]: the constraint matrix, one row per placement, and the
//!   [`Linfo`] descriptors that map rows back to placements
//! - [`solver`]: the dancing-links search over the matrix

pub mod error;
pub mod geometry;
pub mod grid;
pub mod matrix;
pub mod persistence;
pub mod pieces;
pub mod puzzles;
pub mod shape;
pub mod solver;

pub use error::{ConfigError, PersistenceError};
pub use grid::Board;
pub use matrix::{ConstraintMatrix, ExactCover, Linfo};
pub use pieces::Piece;
pub use puzzles::{Puzzle, SolvedPuzzle};
pub use shape::Shape;
pub use solver::{ColumnSelection, DancingLinks, SearchResult, SearchStatistics, SolverConfig};
