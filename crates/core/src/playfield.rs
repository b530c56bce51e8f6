//! Playfield module - the grid of locked cells
//!
//! The 20x10 interior is stored inside a one-cell padding of `Wall` cells, as a
//! flat row-major array. The walls on the left, right and bottom stop pieces,
//! the padding row above the interior acts as a ceiling guard.
//!
//! All public coordinates are interior coordinates: `(row, col)` with row 0 at
//! the top and col 0 on the left. Anything outside the padded grid reads as
//! `Wall`, so collision queries never need a bounds check of their own.

use crate::types::{Cell, ColorId, BOARD_HEIGHT, BOARD_WIDTH};

const GRID_WIDTH: usize = BOARD_WIDTH as usize + 2;
const GRID_HEIGHT: usize = BOARD_HEIGHT as usize + 2;
const GRID_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

/// One interior row, left to right.
pub type Row = [Cell; BOARD_WIDTH as usize];

/// The playfield - padded grid with permanent walls
#[derive(Debug, Clone, PartialEq)]
pub struct Playfield {
    cells: [Cell; GRID_SIZE],
}

impl Playfield {
    /// Empty interior surrounded by walls.
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; GRID_SIZE];
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                if y == 0 || y == GRID_HEIGHT - 1 || x == 0 || x == GRID_WIDTH - 1 {
                    cells[y * GRID_WIDTH + x] = Cell::Wall;
                }
            }
        }
        Self { cells }
    }

    /// Padded index of an interior coordinate; `None` outside the padded grid.
    #[inline(always)]
    fn grid_index(row: i8, col: i8) -> Option<usize> {
        let y = row as i16 + 1;
        let x = col as i16 + 1;
        if y < 0 || y >= GRID_HEIGHT as i16 || x < 0 || x >= GRID_WIDTH as i16 {
            return None;
        }
        Some(y as usize * GRID_WIDTH + x as usize)
    }

    /// Whether the coordinate lies inside the playable interior.
    pub fn is_interior(row: i8, col: i8) -> bool {
        row >= 0 && row < BOARD_HEIGHT as i8 && col >= 0 && col < BOARD_WIDTH as i8
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at an interior coordinate. Border and out-of-grid coordinates read as `Wall`.
    pub fn get(&self, row: i8, col: i8) -> Cell {
        match Self::grid_index(row, col) {
            Some(idx) => self.cells[idx],
            None => Cell::Wall,
        }
    }

    /// True for walls and locked blocks.
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        self.get(row, col).is_occupied()
    }

    /// Write a locked block into an interior cell.
    ///
    /// Returns false and writes nothing when the coordinate is not interior.
    /// Callers guarantee the target is empty via collision checks beforehand.
    pub fn lock(&mut self, row: i8, col: i8, color: ColorId) -> bool {
        if !Self::is_interior(row, col) {
            return false;
        }
        match Self::grid_index(row, col) {
            Some(idx) => {
                self.cells[idx] = Cell::Locked(color);
                true
            }
            None => false,
        }
    }

    /// Interior slice of a padded row.
    fn row_cells(&self, row: usize) -> &[Cell] {
        let start = (row + 1) * GRID_WIDTH + 1;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Check if an interior row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row_cells(row).iter().all(|cell| cell.is_occupied())
    }

    /// Scan rows top to bottom and remove every full one.
    ///
    /// Each full row is replaced by the rows above it shifted down by one, and
    /// the top interior row is refilled with `Empty`. The scan then moves on to
    /// the next index, which still holds the unshifted row below, so adjacent
    /// and scattered full rows are each counted once.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut cleared = 0;
        for row in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(row) {
                cleared += 1;
                self.collapse_onto(row);
            }
        }
        cleared
    }

    /// Shift every interior row above `row` down by one, emptying the top row.
    fn collapse_onto(&mut self, row: usize) {
        let width = BOARD_WIDTH as usize;
        for y in (1..=row).rev() {
            let src = y * GRID_WIDTH + 1;
            let dst = (y + 1) * GRID_WIDTH + 1;
            self.cells.copy_within(src..src + width, dst);
        }
        let top = GRID_WIDTH + 1;
        self.cells[top..top + width].fill(Cell::Empty);
    }

    /// Any interior cell of the topmost playable row is occupied.
    pub fn top_row_occupied(&self) -> bool {
        self.row_cells(0).iter().any(|cell| cell.is_occupied())
    }

    /// Empty every interior cell. Walls stay.
    pub fn clear(&mut self) {
        for row in 0..BOARD_HEIGHT as usize {
            let start = (row + 1) * GRID_WIDTH + 1;
            self.cells[start..start + BOARD_WIDTH as usize].fill(Cell::Empty);
        }
    }

    /// Interior rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..BOARD_HEIGHT as usize).map(move |row| {
            let mut out = [Cell::Empty; BOARD_WIDTH as usize];
            out.copy_from_slice(self.row_cells(row));
            out
        })
    }

    /// Copy the interior into a fixed grid.
    pub fn write_grid(&self, out: &mut [Row; BOARD_HEIGHT as usize]) {
        for (dst, row) in out.iter_mut().zip(self.rows()) {
            *dst = row;
        }
    }

    /// Number of locked interior cells.
    pub fn locked_count(&self) -> usize {
        (0..BOARD_HEIGHT as usize)
            .map(|row| {
                self.row_cells(row)
                    .iter()
                    .filter(|c| matches!(c, Cell::Locked(_)))
                    .count()
            })
            .sum()
    }

    /// Raw padded cells, row-major, including walls.
    pub fn padded_cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}
