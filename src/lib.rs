//! TUI Mino (workspace facade crate).
//!
//! Re-exports the workspace crates under one name, so the binary and the
//! integration tests can use `tui_mino::{core,input,term,types}`.

pub use tui_mino_core as core;
pub use tui_mino_input as input;
pub use tui_mino_term as term;
pub use tui_mino_types as types;
