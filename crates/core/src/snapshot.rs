//! Snapshot module - read-only view for presentation layers
//!
//! A `GameSnapshot` is a plain `Copy` value. Renderers and tests read it
//! without borrowing the engine, and nothing written into it flows back.

use serde::Serialize;

use crate::game_state::{Phase, Tetromino};
use crate::pieces::{get_shape, MinoOffset};
use crate::playfield::Row;
use crate::scoring::blocks_per_minute;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_SPEED_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl ActiveSnapshot {
    /// Playfield coordinates of the four minos.
    pub fn cells(&self) -> [MinoOffset; 4] {
        let offsets = *get_shape(self.kind, self.rotation).cells();
        offsets.map(|(dr, dc)| (self.row + dr, self.col + dc))
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    /// Locked cells only; the active piece is reported separately.
    pub board: [Row; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub can_swap: bool,
    pub phase: Phase,
    pub score: u32,
    pub lines: u32,
    pub elapsed_ms: u64,
    pub speed_ms: u32,
    pub bpm: u32,
}

impl GameSnapshot {
    /// Commands currently have an effect.
    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whole seconds of play, as shown on the clock label.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// Board cell with the active piece drawn on top.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        if let Some(active) = self.active {
            let hit = active
                .cells()
                .iter()
                .any(|&(r, c)| r >= 0 && c >= 0 && r as usize == row && c as usize == col);
            if hit {
                return Cell::Locked(active.kind.color());
            }
        }
        self.board
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(Cell::Wall)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: PieceKind::I,
            can_swap: true,
            phase: Phase::Spawning,
            score: 0,
            lines: 0,
            elapsed_ms: 0,
            speed_ms: INITIAL_SPEED_MS,
            bpm: blocks_per_minute(INITIAL_SPEED_MS),
        }
    }
}
