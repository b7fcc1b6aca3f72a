//! Puzzle piece definitions.
//!
//! Each piece is a named reference shape together with its distinct
//! orientations. Piece tables are written as rows of `0`/`1` cells.

use std::fmt;

use crate::error::ConfigError;
use crate::geometry::all_layouts;
use crate::shape::Shape;

/// A named polyomino and all of its distinct orientations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    name: String,
    reference: Shape,
    layouts: Vec<Shape>,
}

impl Piece {
    /// Creates a piece and derives its layouts.
    ///
    /// A piece must occupy at least one cell.
    pub fn new(name: impl Into<String>, reference: Shape) -> Result<Self, ConfigError> {
        let name = name.into();
        if reference.count() == 0 {
            return Err(ConfigError::EmptyPiece { name });
        }
        let layouts = all_layouts(&reference);
        Ok(Self {
            name,
            reference,
            layouts,
        })
    }

    /// Creates a piece from a `0`/`1` table.
    pub fn from_bits(name: impl Into<String>, rows: &[&[u8]]) -> Result<Self, ConfigError> {
        Self::new(name, Shape::from_bits(rows)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &Shape {
        &self.reference
    }

    /// Distinct orientations, the reference shape first.
    pub fn layouts(&self) -> &[Shape] {
        &self.layouts
    }

    /// Number of cells the piece covers.
    pub fn cell_count(&self) -> usize {
        self.reference.count()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "piece {}: {} layouts", self.name, self.layouts.len())?;
        for (index, layout) in self.layouts.iter().enumerate() {
            writeln!(f, "  layout #{index}:")?;
            for line in layout.to_string().lines() {
                writeln!(f, "    {line}")?;
            }
        }
        Ok(())
    }
}

/// A piece table entry: letter name and reference cells.
pub type PieceTable = (&'static str, &'static [&'static [u8]]);

/// The twelve pentominoes, using Golomb's letter names.
pub const PENTOMINOES: &[PieceTable] = &[
    ("F", &[&[0, 1, 1], &[1, 1, 0], &[0, 1, 0]]),
    ("I", &[&[1], &[1], &[1], &[1], &[1]]),
    ("L", &[&[1, 1], &[0, 1], &[0, 1], &[0, 1]]),
    ("P", &[&[1, 1], &[1, 1], &[1, 0]]),
    ("N", &[&[1, 0], &[1, 1], &[0, 1], &[0, 1]]),
    ("T", &[&[1, 1, 1], &[0, 1, 0], &[0, 1, 0]]),
    ("U", &[&[1, 0, 1], &[1, 1, 1]]),
    ("V", &[&[1, 0, 0], &[1, 0, 0], &[1, 1, 1]]),
    ("W", &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 1]]),
    ("X", &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]),
    ("Y", &[&[0, 1], &[1, 1], &[0, 1], &[0, 1]]),
    ("Z", &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 1]]),
];

/// Extra pieces of the calendar puzzle: a monomino, a square and a 2x3 block.
pub const CALENDAR_EXTRAS: &[PieceTable] = &[
    ("A", &[&[1]]),
    ("B", &[&[1, 1], &[1, 1]]),
    ("C", &[&[1, 1, 1], &[1, 1, 1]]),
];

/// Builds pieces from table entries, keeping table order.
pub fn from_table(table: &[PieceTable]) -> Result<Vec<Piece>, ConfigError> {
    table
        .iter()
        .map(|&(name, rows)| Piece::from_bits(name, rows))
        .collect()
}

/// All twelve pentominoes in `F I L P N T U V W X Y Z` order.
pub fn pentominoes() -> Result<Vec<Piece>, ConfigError> {
    from_table(PENTOMINOES)
}

/// The pentominoes whose names appear in `names`, in table order.
pub fn pentominoes_named(names: &str) -> Result<Vec<Piece>, ConfigError> {
    let selected: Vec<PieceTable> = PENTOMINOES
        .iter()
        .copied()
        .filter(|(name, _)| names.contains(name))
        .collect();
    from_table(&selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pentominoes_have_five_cells() {
        let pieces = pentominoes().unwrap();
        assert_eq!(pieces.len(), 12);
        for piece in &pieces {
            assert_eq!(piece.cell_count(), 5, "Piece {} should have 5 cells", piece.name());
        }
    }

    #[test]
    fn test_pentomino_layout_counts() {
        let counts: Vec<(String, usize)> = pentominoes()
            .unwrap()
            .iter()
            .map(|piece| (piece.name().to_string(), piece.layouts().len()))
            .collect();
        let expected = [
            ("F", 8),
            ("I", 2),
            ("L", 8),
            ("P", 8),
            ("N", 8),
            ("T", 4),
            ("U", 4),
            ("V", 4),
            ("W", 4),
            ("X", 1),
            ("Y", 8),
            ("Z", 4),
        ];
        for ((name, count), (expected_name, expected_count)) in counts.iter().zip(expected) {
            assert_eq!(name, expected_name);
            assert_eq!(*count, expected_count, "Layout count for {name}");
        }
    }

    #[test]
    fn test_pentominoes_named_keeps_table_order() {
        let pieces = pentominoes_named("ZYVUNL").unwrap();
        let names: Vec<&str> = pieces.iter().map(Piece::name).collect();
        assert_eq!(names, ["L", "N", "U", "V", "Y", "Z"]);
    }

    #[test]
    fn test_empty_piece_is_rejected() {
        let result = Piece::from_bits("hollow", &[&[0, 0], &[0, 0]]);
        assert!(matches!(result, Err(ConfigError::EmptyPiece { name }) if name == "hollow"));
    }

    #[test]
    fn test_display_lists_layouts() {
        let piece = Piece::from_bits("I2", &[&[1, 1]]).unwrap();
        assert_eq!(
            piece.to_string(),
            "piece I2: 2 layouts\n  layout #0:\n    11\n  layout #1:\n    1\n    1\n"
        );
    }
}
