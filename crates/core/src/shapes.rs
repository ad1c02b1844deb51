//! Shapes module - static offset table and rotation
//!
//! Every shape starts from one offset set laid out horizontally (the pieces
//! travel sideways). Rotation is a rigid 90° turn of every offset about the
//! piece origin, `(dx, dy) -> (-dy, dx)`. There is no kick table: a blocked
//! rotation simply fails.

use crate::types::ShapeKind;

/// Offset of a single block relative to the piece origin
pub type BlockOffset = (i8, i8);

/// Shape of a piece - 4 block offsets from the piece origin
pub type Blocks = [BlockOffset; 4];

/// Spawn offsets, indexed by [`ShapeKind::index`].
const SHAPE_TABLE: [Blocks; 7] = [
    // I
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    // O
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    // T
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    // S
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    // Z
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    // J
    [(0, 1), (0, 0), (1, 0), (2, 0)],
    // L
    [(2, 1), (0, 0), (1, 0), (2, 0)],
];

/// Get the spawn offsets for a shape
#[inline]
pub fn spawn_blocks(kind: ShapeKind) -> Blocks {
    SHAPE_TABLE[kind.index()]
}

/// Rotate every offset 90° about the origin.
#[inline]
pub fn rotate_blocks(blocks: &Blocks) -> Blocks {
    blocks.map(|(dx, dy)| (-dy, dx))
}

/// All four orientations of a shape, starting with the spawn orientation.
pub fn orientations(kind: ShapeKind) -> [Blocks; 4] {
    let north = spawn_blocks(kind);
    let east = rotate_blocks(&north);
    let south = rotate_blocks(&east);
    let west = rotate_blocks(&south);
    [north, east, south, west]
}

/// Bounding box of a block set: `(min_dx, max_dx, min_dy, max_dy)`.
pub fn bounds(blocks: &Blocks) -> (i8, i8, i8, i8) {
    let mut min_x = i8::MAX;
    let mut max_x = i8::MIN;
    let mut min_y = i8::MAX;
    let mut max_y = i8::MIN;
    for &(dx, dy) in blocks {
        min_x = min_x.min(dx);
        max_x = max_x.max(dx);
        min_y = min_y.min(dy);
        max_y = max_y.max(dy);
    }
    (min_x, max_x, min_y, max_y)
}

/// Horizontal extent measured from the origin (`max_dx + 1`).
pub fn extent_x(blocks: &Blocks) -> i8 {
    bounds(blocks).1 + 1
}

/// Vertical extent measured from the origin (`max_dy + 1`).
pub fn extent_y(blocks: &Blocks) -> i8 {
    bounds(blocks).3 + 1
}
