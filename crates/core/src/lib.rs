//! Core game logic - deterministic and synchronous
//!
//! This crate holds the rules of the game and nothing else: no terminal, no
//! clock and no global randomness. Time and piece generation are injected, so
//! the same config, seed and command sequence always produce the same game.
//!
//! # Module Structure
//!
//! - [`playfield`]: 20x10 grid inside a wall border, collision queries, line clearing
//! - [`pieces`]: the seven piece kinds with four precomputed rotation states each
//! - [`game_state`]: the engine - active piece, next piece, swap, score, speed, phase
//! - [`rng`]: injectable piece sources (seeded uniform, fixed sequence)
//! - [`scoring`]: linear line-clear points and the speed curve
//! - [`config`]: tunables and their validation
//! - [`snapshot`]: copyable read-only view for renderers
//!
//! # Rules
//!
//! - No wall kicks: a blocked rotation is simply refused
//! - A blocked downward move locks the piece immediately, there is no lock delay
//! - Every cleared line scores the same, regardless of how many clear at once
//! - The current piece may be swapped with the next piece once per spawn
//! - The descent interval shrinks with elapsed play time, down to a floor
//! - The game ends when a lock leaves any cell of the top row occupied
//!
//! # Example
//!
//! ```
//! use tui_mino_core::GameState;
//! use tui_mino_types::GameAction;
//!
//! let mut game = GameState::with_seed(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick();
//! game.advance_time(16);
//!
//! assert_eq!(game.score(), 0);
//! assert!(game.active().is_some());
//! ```

pub mod config;
pub mod game_state;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_mino_types as types;

pub use config::{ConfigError, GameConfig};
pub use game_state::{GameState, LockEvent, Phase, Tetromino};
pub use pieces::{get_shape, shape_at, MinoOffset, Shape};
pub use playfield::Playfield;
pub use rng::{PieceSource, SequenceSource, UniformSource};
pub use scoring::{blocks_per_minute, line_clear_points, SpeedCurve};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
