//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions can be used by the rules engine, the terminal renderer, the
//! input mapper and the score history.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Rows above the board (negative row indices) exist only transiently while a
//! piece spawns or rotates; they are never stored.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep used by the terminal runner |
//! | `SOFT_DROP_FACTOR` | 20 | Soft drop divides the gravity interval by this |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `DEFAULT_DAS_MS` | 170 | Delay before horizontal auto-repeat starts |
//! | `DEFAULT_ARR_MS` | 50 | Interval between horizontal auto-repeats |
//!
//! # Gravity by Level
//!
//! `SPEED_TABLE[level - 1]` is the number of milliseconds per row. Levels past
//! the end of the table reuse the last entry.
//!
//! # Examples
//!
//! ```
//! use mr_tet_types::{GameCommand, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.id(), 3);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(-1), Rotation::West);
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval per level in milliseconds (index = level - 1).
pub const SPEED_TABLE: [u32; 20] = [
    800, 720, 630, 550, 470, 380, 300, 220, 150, 100, 80, 70, 60, 50, 40, 30, 20, 15, 10, 8,
];

/// Soft drop divides the current gravity interval by this factor.
pub const SOFT_DROP_FACTOR: u32 = 20;

/// Lock delay when a piece is resting on a surface.
pub const LOCK_DELAY_MS: u32 = 500;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear points indexed by rows cleared (0..=4), multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points awarded per row descended by a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 170;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_table_is_strictly_decreasing() {
        assert!(SPEED_TABLE.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(SPEED_TABLE[0], 800);
        assert_eq!(SPEED_TABLE[SPEED_TABLE.len() - 1], 8);
    }

    #[test]
    fn line_scores_start_at_zero() {
        assert_eq!(LINE_SCORES[0], 0);
        assert_eq!(LINE_SCORES[4], 800);
    }

    #[test]
    fn rotation_index_normalizes() {
        assert_eq!(Rotation::from_index(4), Rotation::North);
        assert_eq!(Rotation::from_index(-1), Rotation::West);
        assert_eq!(Rotation::from_index(-6), Rotation::South);
        for r in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(Rotation::from_index(r.index() as i32), r);
        }
    }

    #[test]
    fn piece_ids_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }
}

/// The seven tetromino piece kinds
///
/// - **I**: long bar, 4x4 bounding box
/// - **O**: square, 2x2 bounding box
/// - **T**, **S**, **Z**, **J**, **L**: 3x3 bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in the order a fresh bag is filled.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Stable numeric identifier (1..=7). Zero is reserved for empty cells.
    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use mr_tet_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states (0 = spawn, 1 = CW, 2 = 180, 3 = CCW)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index in `0..=3`.
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build a rotation from any integer, normalized into `0..=3`.
    pub fn from_index(i: i32) -> Self {
        match i.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (90°)
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() as i32 + 1)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() as i32 - 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// A cell on the game board: `None` is empty, `Some(kind)` is a locked mino.
pub type Cell = Option<PieceKind>;

/// Session lifecycle state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::GameOver => "gameover",
        }
    }
}

/// Discrete commands accepted by the engine.
///
/// Input collaborators translate device events into these; the engine never
/// sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Begin a new session (from idle or game over)
    Start,
    /// Toggle between playing and paused
    TogglePause,
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down
    MoveDown,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece to its ghost row and lock immediately
    HardDrop,
}

impl GameCommand {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use mr_tet_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("togglepause"), Some(GameCommand::TogglePause));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "start" => Some(GameCommand::Start),
            "togglepause" => Some(GameCommand::TogglePause),
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "movedown" => Some(GameCommand::MoveDown),
            "rotatecw" => Some(GameCommand::RotateCw),
            "rotateccw" => Some(GameCommand::RotateCcw),
            "harddrop" => Some(GameCommand::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Start => "start",
            GameCommand::TogglePause => "togglePause",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::MoveDown => "moveDown",
            GameCommand::RotateCw => "rotateCw",
            GameCommand::RotateCcw => "rotateCcw",
            GameCommand::HardDrop => "hardDrop",
        }
    }
}
