//! Shared types - pure data structures and constants
//!
//! Everything here is plain data with no game logic attached, so it can be used by the
//! rules engine, a rendering layer, or anything that ships state over a wire.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Hidden buffer**: [`HIDDEN_ROWS`] stored rows with `y < 0` sit above the visible
//!   playfield. They give blocks spawn headroom and can hold locked cells like any other row.
//!
//! # Scoring
//!
//! | Rows cleared | Points |
//! |--------------|--------|
//! | 1 | 1 |
//! | 2 | 3 |
//! | 3 | 5 |
//! | 4 | 8 |
//! | 4 (back-to-back) | 12 |
//!
//! Level is `score / 10 + 1`.
//!
//! # Examples
//!
//! ```
//! use tetris_rules_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

mod config;

pub use config::{ConfigError, GameConfig};

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 visible rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Stored rows above the visible playfield (`y` in `-3..0`).
/// Tall enough for a vertical I with one cell still on screen.
pub const HIDDEN_ROWS: u8 = 3;

/// Smallest board edge a session accepts (an I piece must fit both ways)
pub const MIN_BOARD_DIMENSION: u8 = 4;

/// Largest board edge a session accepts (coordinates are `i8`)
pub const MAX_BOARD_DIMENSION: u8 = 64;

/// Number of upcoming variants visible in the next queue
pub const NEXT_QUEUE_LEN: usize = 5;

/// Points per line clear, indexed by rows cleared (index 0 is unused)
pub const LINE_SCORES: [u32; 5] = [0, 1, 3, 5, 8];

/// Points for a 4-row clear directly following another 4-row clear
pub const BACK_TO_BACK_TETRIS_SCORE: u32 = 12;

/// Rows a clear must remove to count towards a back-to-back chain
pub const TETRIS_ROWS: u32 = 4;

/// Score needed per level
pub const SCORE_PER_LEVEL: u32 = 10;

/// Gravity base at level 1, in seconds per row
pub const GRAVITY_BASE_SECS: f64 = 0.8;

/// How much the gravity base shrinks per level
pub const GRAVITY_BASE_STEP_SECS: f64 = 0.01;

/// Lock delay at level 1, in seconds
pub const LOCK_DELAY_BASE_SECS: f64 = 0.8;

/// Floor for every timing interval (1ms)
pub const MIN_INTERVAL_SECS: f64 = 0.001;

/// The seven piece variants
///
/// - **I**: straight bar
/// - **J**: hook opening right
/// - **L**: hook opening left
/// - **O**: 2x2 square
/// - **S**: skew
/// - **Z**: skew (mirror of S)
/// - **T**: tee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All variants, in catalog order. A fresh bag starts from this order before shuffling.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }
}

/// Orientation of a block, as a quarter-turn count from its spawn orientation
///
/// The cycle goes: North (0) → East (1) → South (2) → West (3) → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotate one quarter turn in the given direction
    pub fn turned(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Number of clockwise quarter turns from North (0-3)
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`]; wraps modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
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

/// Direction of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Direction of a horizontal move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    /// Column delta for one step in this direction
    pub fn dx(&self) -> i8 {
        match self {
            MoveDirection::Left => -1,
            MoveDirection::Right => 1,
        }
    }
}

/// Commands an input layer can send to a session
///
/// Every variant maps to one public `GameSession` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move the active block one column left
    MoveLeft,
    /// Move the active block one column right
    MoveRight,
    /// Rotate 90° clockwise
    RotateCw,
    /// Rotate 90° counter-clockwise
    RotateCcw,
    /// Move the active block one row down, if unobstructed
    SoftDrop,
    /// Drop to the landing row and lock immediately
    HardDrop,
    /// Stash the active block (once per lock)
    Hold,
    /// One gravity step
    Tick,
    /// Lock the active block where it stands (lock delay expired)
    Lock,
    /// Start a fresh session with the current RNG state
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateccw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "tick" => Some(GameAction::Tick),
            "lock" => Some(GameAction::Lock),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Tick => "tick",
            GameAction::Lock => "lock",
            GameAction::Restart => "restart",
        }
    }

    /// Whether this action is a rotation request
    pub fn is_rotation(&self) -> bool {
        matches!(self, GameAction::RotateCw | GameAction::RotateCcw)
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(PieceKind)`: occupied by a block of that variant
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(LINE_SCORES[1], 1);
        assert_eq!(LINE_SCORES[2], 3);
        assert_eq!(LINE_SCORES[3], 5);
        assert_eq!(LINE_SCORES[4], 8);
        assert!(BACK_TO_BACK_TETRIS_SCORE > LINE_SCORES[4]);
    }

    #[test]
    fn test_piece_kind_str_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_rotation_index() {
        let mut r = Rotation::North;
        for i in 0..8u8 {
            assert_eq!(r.index(), i % 4);
            assert_eq!(Rotation::from_index(i), r);
            r = r.rotate_cw();
        }
        assert_eq!(
            Rotation::East.turned(RotateDirection::CounterClockwise),
            Rotation::North
        );
    }

    #[test]
    fn test_action_names() {
        let all = [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::Hold,
            GameAction::Tick,
            GameAction::Lock,
            GameAction::Restart,
        ];
        for action in all {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert!(GameAction::RotateCw.is_rotation());
        assert!(!GameAction::Hold.is_rotation());
    }

    #[test]
    fn test_piece_kind_serializes_lowercase() {
        let json = serde_json::to_string(&PieceKind::T).unwrap();
        assert_eq!(json, "\"t\"");
        let back: PieceKind = serde_json::from_str("\"z\"").unwrap();
        assert_eq!(back, PieceKind::Z);
    }
}
