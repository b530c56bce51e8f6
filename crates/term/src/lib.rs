//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views draw snapshots and screen
//! state into a [`Canvas`], and [`TerminalRenderer`] flushes canvases to the
//! terminal. No widget or layout framework is involved, which keeps exact
//! control over the 2-columns-per-cell aspect ratio.

pub mod canvas;
pub mod renderer;
pub mod views;

pub use tui_mino_core as core;
pub use tui_mino_types as types;

pub use canvas::{Canvas, Glyph, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use views::{
    piece_rgb, ControlsView, DialogChoice, GameOverDialog, MenuItem, MenuView, PlayView, Viewport,
};
