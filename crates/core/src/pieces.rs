//! Pieces module - block geometry and rotation
//!
//! Every variant has one pivot-centred table of four offsets. The other three orientations are
//! derived from it with the quarter-turn transforms:
//!
//! - clockwise: `(x, y) -> (-y, x)`
//! - counter-clockwise: `(x, y) -> (y, -x)`
//!
//! With `y` growing downwards, the clockwise transform turns "right" into "down", which is a
//! clockwise turn on screen. Orientations are always derived from the base table, never from
//! the previous orientation, so repeated rotation cannot drift.
//!
//! Rotation does not use a kick table. When the rotated shape does not fit, the resolver runs
//! a fixed sequence of corrections (walls, then ceiling, then floor/stack); see [`try_rotate`].

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, RotateDirection, Rotation, HIDDEN_ROWS};

/// Offset of a single mino relative to the block origin
pub type MinoOffset = (i8, i8);

/// Shape of a block - 4 mino offsets from its origin
pub type PieceShape = [MinoOffset; 4];

/// Row every block spawns on. Cells with a negative offset start in the hidden buffer.
pub const SPAWN_Y: i8 = 0;

/// Spawn origin for a board of the given width: centred, on [`SPAWN_Y`]
pub fn spawn_origin(board_width: u8) -> (i8, i8) {
    ((board_width / 2) as i8 - 1, SPAWN_Y)
}

/// Default (North) orientation of each variant, pivot at (0, 0)
pub fn base_shape(kind: PieceKind) -> PieceShape {
    match kind {
        // Flat bar
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::O => [(0, -1), (1, -1), (0, 0), (1, 0)],
        PieceKind::S => [(0, -1), (1, -1), (-1, 0), (0, 0)],
        PieceKind::Z => [(-1, -1), (0, -1), (0, 0), (1, 0)],
        PieceKind::T => [(0, -1), (-1, 0), (0, 0), (1, 0)],
    }
}

#[inline]
fn turn_cw((x, y): MinoOffset) -> MinoOffset {
    (-y, x)
}

#[inline]
fn turn_ccw((x, y): MinoOffset) -> MinoOffset {
    (y, -x)
}

/// Get the shape (mino offsets) for a variant in a given orientation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let base = base_shape(kind);
    if kind == PieceKind::O {
        return base;
    }

    match rotation {
        Rotation::North => base,
        Rotation::East => base.map(turn_cw),
        Rotation::South => base.map(turn_cw).map(turn_cw),
        Rotation::West => base.map(turn_ccw),
    }
}

/// A block: variant, orientation and origin on the board.
///
/// Absolute cells are `origin + get_shape(kind, rotation)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Block {
    /// Create a block in its default orientation at the given origin
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Create a block at the spawn origin of a board with the given width
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let (x, y) = spawn_origin(board_width);
        Self::new(kind, x, y)
    }

    /// Mino offsets for the current orientation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Copy of this block translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Rotate a block, correcting its position if the rotated shape does not fit.
///
/// `width` and `height` are the visible board size; rows `-HIDDEN_ROWS..0` above it are part
/// of the grid too. A placement fits when every cell lies inside
/// `[0, width) x [-HIDDEN_ROWS, height)` and `is_occupied` is false for it. If the plain
/// rotation does not fit, corrections run in this order, testing the placement after every
/// one-cell shift:
///
/// 1. while a cell is left of column 0, shift right; while a cell is past the right wall,
///    shift left (at most `width` shifts)
/// 2. while a cell is above the top hidden row, shift down (at most `height` shifts)
/// 3. while a cell is at/below the floor or on an occupied cell, shift up (at most `height`
///    shifts)
///
/// Returns the new shape, orientation and the applied correction `(dx, dy)`, or `None` if
/// no placement was found. O blocks come back unchanged with a zero correction.
///
/// Board sizes are validated to at most 64, so both dimensions fit `i8`.
pub fn try_rotate(
    block: &Block,
    direction: RotateDirection,
    width: i8,
    height: i8,
    is_occupied: impl Fn(i8, i8) -> bool,
) -> Option<(PieceShape, Rotation, (i8, i8))> {
    debug_assert!(width > 0 && height > 0, "board {width}x{height}");
    if block.kind == PieceKind::O {
        return Some((block.shape(), block.rotation, (0, 0)));
    }

    let top = -(HIDDEN_ROWS as i8);
    let new_rotation = block.rotation.turned(direction);
    let new_shape = get_shape(block.kind, new_rotation);

    let cells_at = |dx: i8, dy: i8| new_shape.map(|(mx, my)| (block.x + mx + dx, block.y + my + dy));
    let fits = |dx: i8, dy: i8| {
        cells_at(dx, dy)
            .iter()
            .all(|&(x, y)| x >= 0 && x < width && y >= top && y < height && !is_occupied(x, y))
    };
    let found = |dx: i8, dy: i8| Some((new_shape, new_rotation, (dx, dy)));

    let (mut dx, mut dy) = (0i8, 0i8);
    if fits(dx, dy) {
        return found(dx, dy);
    }

    // Walls
    for _ in 0..width {
        let cells = cells_at(dx, dy);
        if cells.iter().any(|&(x, _)| x < 0) {
            dx += 1;
        } else if cells.iter().any(|&(x, _)| x >= width) {
            dx -= 1;
        } else {
            break;
        }
        if fits(dx, dy) {
            return found(dx, dy);
        }
    }

    // Ceiling
    for _ in 0..height {
        if !cells_at(dx, dy).iter().any(|&(_, y)| y < top) {
            break;
        }
        dy += 1;
        if fits(dx, dy) {
            return found(dx, dy);
        }
    }

    // Floor and stack
    for _ in 0..height {
        let blocked = cells_at(dx, dy)
            .iter()
            .any(|&(x, y)| y >= height || (y >= top && is_occupied(x, y)));
        if !blocked {
            break;
        }
        dy -= 1;
        if fits(dx, dy) {
            return found(dx, dy);
        }
    }

    None
}
