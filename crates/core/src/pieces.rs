//! Pieces module - the piece catalog
//!
//! Every kind has four precomputed rotation states. A state is stored as the
//! four occupied `(row, col)` offsets inside its tight bounding box, anchored at
//! the box's top-left corner. Rotation `r + 1` is rotation `r` turned clockwise
//! and re-anchored to the top-left. There is no rotation offset correction and
//! no wall kick table.

use crate::types::{ColorId, PieceKind, Rotation};

/// Offset of a single mino from the piece anchor, as `(row, col)`
pub type MinoOffset = (i8, i8);

/// One rotation state of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [MinoOffset; 4],
    width: u8,
    height: u8,
}

impl Shape {
    const fn new(cells: [MinoOffset; 4], width: u8, height: u8) -> Self {
        Self {
            cells,
            width,
            height,
        }
    }

    /// Occupied offsets in row-major order.
    pub fn cells(&self) -> &[MinoOffset; 4] {
        &self.cells
    }

    /// Bounding box width in columns.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Bounding box height in rows.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Occupancy as a 4x4 matrix indexed `[row][col]`.
    pub fn matrix(&self) -> [[bool; 4]; 4] {
        let mut m = [[false; 4]; 4];
        for &(row, col) in &self.cells {
            m[row as usize][col as usize] = true;
        }
        m
    }

    pub fn contains(&self, row: i8, col: i8) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// Get the shape for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static Shape {
    &SHAPES[kind.index()][rotation.index()]
}

/// Same lookup as [`get_shape`] with a raw rotation index, normalized modulo 4.
pub fn shape_at(kind: PieceKind, index: i32) -> &'static Shape {
    get_shape(kind, Rotation::from_index(index))
}

/// Color of a piece kind.
pub fn color_of(kind: PieceKind) -> ColorId {
    kind.color()
}

const I_SHAPES: [Shape; 4] = [
    Shape::new([(0, 0), (0, 1), (0, 2), (0, 3)], 4, 1),
    Shape::new([(0, 0), (1, 0), (2, 0), (3, 0)], 1, 4),
    Shape::new([(0, 0), (0, 1), (0, 2), (0, 3)], 4, 1),
    Shape::new([(0, 0), (1, 0), (2, 0), (3, 0)], 1, 4),
];

// J: hook on the top-left in the spawn state.
const J_SHAPES: [Shape; 4] = [
    Shape::new([(0, 0), (1, 0), (1, 1), (1, 2)], 3, 2),
    Shape::new([(0, 0), (0, 1), (1, 0), (2, 0)], 2, 3),
    Shape::new([(0, 0), (0, 1), (0, 2), (1, 2)], 3, 2),
    Shape::new([(0, 1), (1, 1), (2, 0), (2, 1)], 2, 3),
];

// L: hook on the top-right in the spawn state.
const L_SHAPES: [Shape; 4] = [
    Shape::new([(0, 2), (1, 0), (1, 1), (1, 2)], 3, 2),
    Shape::new([(0, 0), (1, 0), (2, 0), (2, 1)], 2, 3),
    Shape::new([(0, 0), (0, 1), (0, 2), (1, 0)], 3, 2),
    Shape::new([(0, 0), (0, 1), (1, 1), (2, 1)], 2, 3),
];

const O_SHAPES: [Shape; 4] = [
    Shape::new([(0, 0), (0, 1), (1, 0), (1, 1)], 2, 2),
    Shape::new([(0, 0), (0, 1), (1, 0), (1, 1)], 2, 2),
    Shape::new([(0, 0), (0, 1), (1, 0), (1, 1)], 2, 2),
    Shape::new([(0, 0), (0, 1), (1, 0), (1, 1)], 2, 2),
];

const S_SHAPES: [Shape; 4] = [
    Shape::new([(0, 1), (0, 2), (1, 0), (1, 1)], 3, 2),
    Shape::new([(0, 0), (1, 0), (1, 1), (2, 1)], 2, 3),
    Shape::new([(0, 1), (0, 2), (1, 0), (1, 1)], 3, 2),
    Shape::new([(0, 0), (1, 0), (1, 1), (2, 1)], 2, 3),
];

// T: stem up in the spawn state.
const T_SHAPES: [Shape; 4] = [
    Shape::new([(0, 1), (1, 0), (1, 1), (1, 2)], 3, 2),
    Shape::new([(0, 0), (1, 0), (1, 1), (2, 0)], 2, 3),
    Shape::new([(0, 0), (0, 1), (0, 2), (1, 1)], 3, 2),
    Shape::new([(0, 1), (1, 0), (1, 1), (2, 1)], 2, 3),
];

const Z_SHAPES: [Shape; 4] = [
    Shape::new([(0, 0), (0, 1), (1, 1), (1, 2)], 3, 2),
    Shape::new([(0, 1), (1, 0), (1, 1), (2, 0)], 2, 3),
    Shape::new([(0, 0), (0, 1), (1, 1), (1, 2)], 3, 2),
    Shape::new([(0, 1), (1, 0), (1, 1), (2, 0)], 2, 3),
];

/// Indexed `[PieceKind::index()][Rotation::index()]`.
static SHAPES: [[Shape; 4]; 7] = [
    I_SHAPES, J_SHAPES, L_SHAPES, O_SHAPES, S_SHAPES, T_SHAPES, Z_SHAPES,
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Clockwise turn of a shape, re-anchored to the top-left.
    fn turn_cw(shape: &Shape) -> Vec<MinoOffset> {
        let h = shape.height() as i8;
        let mut cells: Vec<MinoOffset> = shape
            .cells()
            .iter()
            .map(|&(row, col)| (col, h - 1 - row))
            .collect();
        cells.sort();
        cells
    }

    #[test]
    fn every_rotation_is_a_clockwise_turn_of_the_previous() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let from = shape_at(kind, r);
                let to = shape_at(kind, r + 1);
                let mut expected: Vec<MinoOffset> = to.cells().to_vec();
                expected.sort();
                assert_eq!(turn_cw(from), expected, "{:?} rotation {}", kind, r);
                assert_eq!(from.width(), to.height());
                assert_eq!(from.height(), to.width());
            }
        }
    }

    #[test]
    fn cells_fit_their_bounding_box() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let shape = shape_at(kind, r);
                let max_row = shape.cells().iter().map(|c| c.0).max().unwrap();
                let max_col = shape.cells().iter().map(|c| c.1).max().unwrap();
                assert_eq!(max_row + 1, shape.height() as i8);
                assert_eq!(max_col + 1, shape.width() as i8);
                assert!(shape.cells().iter().all(|&(row, col)| row >= 0 && col >= 0));
            }
        }
    }

    #[test]
    fn spawn_state_occupies_the_first_row() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind, Rotation::North);
            assert!(shape.cells().iter().any(|&(row, _)| row == 0), "{:?}", kind);
        }
    }

    #[test]
    fn matrix_matches_cells() {
        let m = get_shape(PieceKind::T, Rotation::North).matrix();
        assert_eq!(
            m,
            [
                [false, true, false, false],
                [true, true, true, false],
                [false; 4],
                [false; 4],
            ]
        );
        let count: usize = m.iter().flatten().filter(|&&b| b).count();
        assert_eq!(count, 4);
    }

    #[test]
    fn color_of_uses_kind_color() {
        assert_eq!(color_of(PieceKind::I).index(), 0);
        assert_eq!(color_of(PieceKind::Z).index(), 6);
    }
}
