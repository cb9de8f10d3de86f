//! Pieces module - Tetromino shapes and SRS wall kick tables
//!
//! Pure lookup data: shapes per (kind, rotation) and ordered kick offsets per
//! (kind category, from rotation, to rotation). Reference: https://tetris.wiki/SRS
//!
//! Shapes live inside a square bounding box anchored at the piece origin:
//! 4x4 for I, 2x2 for O, 3x3 for the rest. Offsets are `(dx, dy)` with `dy`
//! growing downward, matching board rows.
//!
//! Kick offsets are authored the way SRS tables are published, with `dy`
//! growing *upward*. [`try_rotate`] flips the vertical component before
//! applying it to board coordinates.

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Kick offset `(dx, dy)` with `dy` pointing up.
pub type KickOffset = (i8, i8);

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => O_SHAPE,
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// Side length of the bounding box a piece kind rotates within.
pub fn matrix_size(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        _ => 3,
    }
}

fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O fills its whole 2x2 box in every rotation
const O_SHAPE: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Boolean matrix view of a shape, sized to the piece's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatrix {
    size: u8,
    rows: [[bool; 4]; 4],
}

impl ShapeMatrix {
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Returns false for coordinates outside the bounding box.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.rows[row][col]
    }

    /// Rows of the matrix, trimmed to the bounding box.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.rows[..self.size()].iter().map(|r| &r[..self.size()])
    }
}

/// Get the shape of a piece as a filled/empty matrix.
pub fn shape_matrix(kind: PieceKind, rotation: Rotation) -> ShapeMatrix {
    let mut rows = [[false; 4]; 4];
    for (dx, dy) in get_shape(kind, rotation) {
        rows[dy as usize][dx as usize] = true;
    }
    ShapeMatrix {
        size: matrix_size(kind),
        rows,
    }
}

/// Which kick table a piece kind uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickCategory {
    /// I piece
    Long,
    /// O piece, never kicks
    Square,
    /// J, L, S, T, Z share one table
    Other,
}

impl KickCategory {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => KickCategory::Long,
            PieceKind::O => KickCategory::Square,
            _ => KickCategory::Other,
        }
    }
}

/// Kick offsets indexed by `[from][to]` rotation index.
pub type KickTable = [[&'static [KickOffset]; 4]; 4];

const NO_KICK: &[KickOffset] = &[(0, 0)];

/// Square piece: every transition is the single zero offset
const SQUARE_KICKS: KickTable = [[NO_KICK; 4]; 4];

/// JLSTZ kick table
const OTHER_KICKS: KickTable = [
    // from North
    [
        NO_KICK,
        &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        NO_KICK,
        &[(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    // from East
    [
        &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        NO_KICK,
        &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        NO_KICK,
    ],
    // from South
    [
        NO_KICK,
        &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        NO_KICK,
        &[(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    // from West
    [
        &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        NO_KICK,
        &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        NO_KICK,
    ],
];

/// I piece kick table
const LONG_KICKS: KickTable = [
    // from North
    [
        NO_KICK,
        &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        NO_KICK,
        &[(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    ],
    // from East
    [
        &[(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        NO_KICK,
        &[(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        NO_KICK,
    ],
    // from South
    [
        NO_KICK,
        &[(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        NO_KICK,
        &[(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    ],
    // from West
    [
        &[(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        NO_KICK,
        &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        NO_KICK,
    ],
];

/// Get the kick table for a piece category
pub fn get_kick_table(category: KickCategory) -> &'static KickTable {
    match category {
        KickCategory::Long => &LONG_KICKS,
        KickCategory::Square => &SQUARE_KICKS,
        KickCategory::Other => &OTHER_KICKS,
    }
}

/// Ordered kick offsets to try for a rotation transition. First match wins.
pub fn kicks(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [KickOffset] {
    get_kick_table(KickCategory::of(kind))[from.index()][to.index()]
}

/// Accepted rotation: new rotation, new position and the kick that got it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub kick: KickOffset,
}

/// Try to rotate a piece with wall kicks
///
/// `fits(rotation, x, y)` reports whether the piece may occupy that placement.
/// Kicks are tried in table order with the vertical component inverted.
/// Returns `None` if every kick is rejected.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    fits: impl Fn(Rotation, i8, i8) -> bool,
) -> Option<RotationResult> {
    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };

    kicks(kind, rotation, new_rotation)
        .iter()
        .map(|&(dx, dy)| (dx, dy, x + dx, y - dy))
        .find(|&(_, _, nx, ny)| fits(new_rotation, nx, ny))
        .map(|(dx, dy, nx, ny)| RotationResult {
            rotation: new_rotation,
            x: nx,
            y: ny,
            kick: (dx, dy),
        })
}

/// Spawn position `(x, y)` for a piece: centered horizontally, top row.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    (((BOARD_WIDTH - matrix_size(kind)) / 2) as i8, 0)
}
