//! Rotation and reflection of planar shapes.
//!
//! A polyomino has at most 8 orientations in the plane (the dihedral group of
//! the square): 4 quarter turns, each optionally mirrored left to right.

use rustc_hash::FxHashSet;

use crate::shape::Shape;

/// The 8 plane symmetries as `(quarter_turns, mirrored)` pairs.
///
/// Ordering note: layout indices follow this order, so any filter that refers
/// to a layout by index (see `puzzles::ChessboardVariant`) depends on it.
pub const TRANSFORMS: [(usize, bool); 8] = [
    (0, false),
    (0, true),
    (1, false),
    (1, true),
    (2, false),
    (2, true),
    (3, false),
    (3, true),
];

/// Applies `quarter_turns` counter-clockwise rotations, then an optional mirror.
pub fn orient(shape: &Shape, quarter_turns: usize, mirrored: bool) -> Shape {
    let mut result = shape.clone();
    for _ in 0..quarter_turns % 4 {
        result = result.rotate_ccw();
    }
    if mirrored {
        result = result.flip_horizontal();
    }
    result
}

/// Generates all distinct orientations of a shape.
///
/// The reference shape always comes first; each transform in [`TRANSFORMS`]
/// contributes its result only if an equal orientation has not been seen yet.
/// Symmetric shapes therefore produce fewer than 8 layouts.
pub fn all_layouts(reference: &Shape) -> Vec<Shape> {
    let mut layouts = vec![reference.clone()];
    let mut seen: FxHashSet<Shape> = FxHashSet::default();
    seen.insert(reference.clone());

    for &(quarter_turns, mirrored) in &TRANSFORMS {
        let layout = orient(reference, quarter_turns, mirrored);
        if seen.insert(layout.clone()) {
            layouts.push(layout);
        }
    }

    layouts
}
