//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] for play and
//! into [`MenuKey`] for the menu and dialog screens. Key repeat is left to the
//! terminal: every press or repeat event yields one action.

pub mod map;

pub use tui_mino_types as types;

pub use map::{handle_key_event, menu_key, should_quit, MenuKey};
