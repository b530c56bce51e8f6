//! Game state module - the game engine
//!
//! `GameState` owns the playfield, the active piece, the buffered next piece,
//! the score and the speed. Every mutation goes through one of its entry
//! points: the five commands, `tick` for automatic descent, `advance_time` for
//! the play clock, and `start`/`reset` for the lifecycle. All of them are
//! synchronous and never read a clock or a global generator.
//!
//! A downward move that is blocked locks the piece, clears full lines, scores
//! them and either spawns the next piece or ends the game, all inside the same
//! call. Observers therefore only ever see [`Phase::Spawning`],
//! [`Phase::Falling`] or [`Phase::GameOver`].

use std::fmt;

use log::{debug, info, trace};

use crate::config::{ConfigError, GameConfig};
use crate::pieces::{get_shape, MinoOffset, Shape};
use crate::playfield::Playfield;
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::{blocks_per_minute, line_clear_points, SpeedCurve};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Anchor row (top of the shape's bounding box).
    pub row: i8,
    /// Anchor column (left of the shape's bounding box).
    pub col: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            row: SPAWN_ROW,
            col: SPAWN_COL,
        }
    }

    pub fn shape(&self) -> &'static Shape {
        get_shape(self.kind, self.rotation)
    }

    /// Playfield coordinates of the four minos.
    pub fn cells(&self) -> [MinoOffset; 4] {
        let offsets = *self.shape().cells();
        offsets.map(|(dr, dc)| (self.row + dr, self.col + dc))
    }
}

/// Externally observable lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Phase {
    /// Fresh or reset game waiting for `start`.
    Spawning,
    /// A piece is falling and commands apply.
    Falling,
    /// A lock filled the top row. Terminal until `reset`.
    GameOver,
}

/// Outcome of a single lock, kept until taken by an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    /// Set when this lock ended the game.
    pub game_over: bool,
}

/// Complete game state
pub struct GameState {
    config: GameConfig,
    curve: SpeedCurve,
    source: Box<dyn PieceSource>,
    playfield: Playfield,
    active: Option<Tetromino>,
    next: PieceKind,
    can_swap: bool,
    phase: Phase,
    score: u32,
    lines: u32,
    /// Spawned pieces in this game, swaps excluded.
    pieces: u32,
    elapsed_ms: u64,
    speed_ms: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a game with a validated config and an injected piece source.
    pub fn new(
        config: GameConfig,
        source: impl PieceSource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Box::new(source)))
    }

    /// Standard rules with a seeded uniform source.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            GameConfig::default(),
            Box::new(UniformSource::seeded(seed)),
        )
    }

    fn build(config: GameConfig, mut source: Box<dyn PieceSource>) -> Self {
        let next = source.next_piece();
        Self {
            config,
            curve: config.speed_curve(),
            source,
            playfield: Playfield::new(),
            active: None,
            next,
            can_swap: true,
            phase: Phase::Spawning,
            score: 0,
            lines: 0,
            pieces: 0,
            elapsed_ms: 0,
            speed_ms: config.initial_speed_ms,
            last_event: None,
        }
    }

    /// Replace the playfield, e.g. to start from a prepared position.
    pub fn with_playfield(mut self, playfield: Playfield) -> Self {
        self.playfield = playfield;
        self
    }

    /// Spawn the first piece. No-op unless the game is in [`Phase::Spawning`].
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Spawning {
            return false;
        }
        self.phase = Phase::Falling;
        self.spawn_piece();
        true
    }

    /// Start a fresh game: empty field, score, time and speed back to initial.
    pub fn reset(&mut self) {
        info!(
            "reset: previous game ended with score {} after {}ms",
            self.score, self.elapsed_ms
        );
        self.playfield.clear();
        self.active = None;
        self.next = self.source.next_piece();
        self.can_swap = true;
        self.phase = Phase::Spawning;
        self.score = 0;
        self.lines = 0;
        self.pieces = 0;
        self.elapsed_ms = 0;
        self.speed_ms = self.config.initial_speed_ms;
        self.last_event = None;
        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Final score once the game is over.
    pub fn final_score(&self) -> Option<u32> {
        self.is_game_over().then_some(self.score)
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Playfield coordinates of the active piece (for rendering)
    pub fn active_cells(&self) -> Option<[MinoOffset; 4]> {
        self.active.map(|p| p.cells())
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn can_swap(&self) -> bool {
        self.can_swap
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lines cleared in this game.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Current descent interval in milliseconds.
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn blocks_per_minute(&self) -> u32 {
        blocks_per_minute(self.speed_ms)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.playfield.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.can_swap = self.can_swap;
        out.phase = self.phase;
        out.score = self.score;
        out.lines = self.lines;
        out.elapsed_ms = self.elapsed_ms;
        out.speed_ms = self.speed_ms;
        out.bpm = self.blocks_per_minute();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote next to current and draw a new next.
    fn spawn_piece(&mut self) {
        let kind = self.next;
        self.next = self.source.next_piece();
        self.active = Some(Tetromino::new(kind));
        self.can_swap = true;
        self.pieces = self.pieces.wrapping_add(1);
        debug!("spawn {:?}, next {:?}", kind, self.next);
    }

    /// Check whether the active piece could move by the given deltas
    ///
    /// The candidate rotation is `(rotation + d_rotation) mod 4`. No wall kick
    /// or offset correction is tried.
    pub fn can_move(&self, d_row: i8, d_col: i8, d_rotation: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let shape = get_shape(active.kind, active.rotation.offset(d_rotation));
        shape.cells().iter().all(|&(dr, dc)| {
            !self
                .playfield
                .is_occupied(active.row + dr + d_row, active.col + dc + d_col)
        })
    }

    /// Move or rotate; a blocked downward move locks the piece.
    fn try_move(&mut self, d_row: i8, d_col: i8, d_rotation: i32) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if self.can_move(d_row, d_col, d_rotation) {
            self.active = Some(Tetromino {
                rotation: active.rotation.offset(d_rotation),
                row: active.row + d_row,
                col: active.col + d_col,
                ..active
            });
            return true;
        }

        if d_row > 0 {
            self.lock_piece();
            return true;
        }

        trace!(
            "blocked move ({}, {}, {}) for {:?}",
            d_row,
            d_col,
            d_rotation,
            active.kind
        );
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(0, -1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(0, 1, 0)
    }

    /// Move down one row, locking the piece if it cannot descend.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(1, 0, 0)
    }

    /// Rotate clockwise in place.
    pub fn rotate(&mut self) -> bool {
        self.try_move(0, 0, 1)
    }

    /// One automatic descent step at the current speed.
    pub fn tick(&mut self) -> bool {
        self.soft_drop()
    }

    /// Exchange the current and the next piece, once per spawn
    ///
    /// The incoming piece restarts from the spawn anchor in its spawn rotation.
    pub fn swap(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if !self.can_swap {
            trace!("swap refused: already swapped this piece");
            return false;
        }

        self.active = Some(Tetromino::new(self.next));
        self.next = active.kind;
        self.can_swap = false;
        debug!("swap {:?} -> {:?}", active.kind, self.next);
        true
    }

    /// Advance the play clock and recompute the descent interval.
    ///
    /// Only counts while a piece is falling.
    pub fn advance_time(&mut self, elapsed_ms: u64) {
        if self.phase != Phase::Falling {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let speed = self.curve.interval_at(self.elapsed_ms);
        if speed != self.speed_ms {
            debug!(
                "speed {}ms -> {}ms at {}ms",
                self.speed_ms, speed, self.elapsed_ms
            );
            self.speed_ms = speed;
        }
    }

    /// Write the active piece into the playfield, clear and score lines,
    /// then spawn or end the game.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let color = active.kind.color();
        for (row, col) in active.cells() {
            self.playfield.lock(row, col, color);
        }

        let lines_cleared = self.playfield.clear_full_lines();
        let points = line_clear_points(lines_cleared, self.config.points_per_line);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared);

        let game_over = self.playfield.top_row_occupied();
        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared,
            points,
            game_over,
        });
        debug!(
            "lock {:?} at ({}, {}): {} lines, +{}",
            active.kind, active.row, active.col, lines_cleared, points
        );

        if game_over {
            self.phase = Phase::GameOver;
            info!(
                "game over: score {}, lines {}, {}ms",
                self.score, self.lines, self.elapsed_ms
            );
        } else {
            self.spawn_piece();
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Swap => self.swap(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("can_swap", &self.can_swap)
            .field("score", &self.score)
            .field("lines", &self.lines)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("speed_ms", &self.speed_ms)
            .finish_non_exhaustive()
    }
}
