//! Core types module - shared data structures and constants
//!
//! This crate defines the vocabulary shared by the engine, the input mapping and
//! the terminal front-end. Everything here is plain data with conversions only.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: row 0, column 4
//!
//! The playfield stores one extra cell of padding on every side. Interior
//! coordinates never include the padding.
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 500 | Descent interval of a fresh game |
//! | `MIN_SPEED_MS` | 100 | Fastest descent interval |
//! | `SPEED_STEP_MS` | 5 | Interval decrease per speed-up |
//! | `SPEED_UP_EVERY_MS` | 10000 | Elapsed play time between speed-ups |
//! | `CLOCK_TICK_MS` | 1000 | Display clock refresh |
//!
//! # Examples
//!
//! ```
//! use tui_mino_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color().index(), 5);
//!
//! assert_eq!(Rotation::from_index(-1), Rotation::West);
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(GameAction::from_str("swap"), Some(GameAction::Swap));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row of the spawn anchor.
pub const SPAWN_ROW: i8 = 0;

/// Column of the spawn anchor.
pub const SPAWN_COL: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Initial descent interval in milliseconds.
pub const INITIAL_SPEED_MS: u32 = 500;

/// Descent interval floor in milliseconds.
pub const MIN_SPEED_MS: u32 = 100;

/// Interval decrease applied at every speed-up.
pub const SPEED_STEP_MS: u32 = 5;

/// Elapsed play time between two speed-ups.
pub const SPEED_UP_EVERY_MS: u64 = 10_000;

/// Refresh cadence of the elapsed-time display.
pub const CLOCK_TICK_MS: u32 = 1000;

/// Points awarded per cleared line (linear, no multi-line bonus).
pub const POINTS_PER_LINE: u32 = 100;

/// Number of distinct piece colors.
pub const PIECE_COLORS: u8 = 7;

/// The seven tetromino piece kinds
///
/// Each piece has a fixed color:
/// - **I**: Cyan
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow
/// - **S**: Green
/// - **T**: Magenta
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in selection order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_mino_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Color identifier of this kind (0-6).
    pub fn color(&self) -> ColorId {
        ColorId(self.index() as u8)
    }
}

/// Color identifier of a locked block, always in `0..PIECE_COLORS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorId(u8);

impl ColorId {
    /// Returns `None` for values outside the piece palette.
    pub fn new(index: u8) -> Option<Self> {
        (index < PIECE_COLORS).then_some(Self(index))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    /// The piece kind that owns this color.
    pub fn kind(&self) -> PieceKind {
        PieceKind::ALL[self.0 as usize]
    }
}

impl From<PieceKind> for ColorId {
    fn from(kind: PieceKind) -> Self {
        kind.color()
    }
}

/// Rotation states, clockwise from the spawn orientation
///
/// - **North**: index 0, spawn orientation
/// - **East**: index 1
/// - **South**: index 2
/// - **West**: index 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation for any integer index, taken modulo 4.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_mino_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(0), Rotation::North);
    /// assert_eq!(Rotation::from_index(5), Rotation::East);
    /// assert_eq!(Rotation::from_index(-2), Rotation::South);
    /// ```
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    pub fn rotate_cw(&self) -> Self {
        self.offset(1)
    }

    /// Rotation reached after `steps` clockwise quarter turns.
    pub fn offset(&self, steps: i32) -> Self {
        Self::from_index((self.index() as i32).wrapping_add(steps))
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

/// A cell of the padded playfield grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Locked(ColorId),
    /// Permanent border cell.
    Wall,
}

impl Cell {
    /// Walls and locked blocks both block movement.
    pub fn is_occupied(&self) -> bool {
        !matches!(self, Cell::Empty)
    }

    pub fn color(&self) -> Option<ColorId> {
        match self {
            Cell::Locked(color) => Some(*color),
            _ => None,
        }
    }
}

/// Commands the presentation layer forwards to the engine
///
/// Every command is parameterless and always valid. Commands that cannot
/// apply (blocked move, used swap, finished game) are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it when blocked
    SoftDrop,
    /// Rotate piece 90° clockwise, no wall kicks
    Rotate,
    /// Exchange the current piece with the next piece (once per spawn)
    Swap,
    /// Start a fresh game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_mino_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softdrop"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "swap" => Some(GameAction::Swap),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Swap => "swap",
            GameAction::Restart => "restart",
        }
    }
}
