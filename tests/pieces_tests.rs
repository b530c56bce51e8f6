//! Pieces tests - shape catalog and rotation normalization

use proptest::prelude::*;

use tui_mino::core::{get_shape, shape_at};
use tui_mino::types::{PieceKind, Rotation};

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

#[test]
fn test_every_shape_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        for r in 0..4 {
            let shape = shape_at(kind, r);
            let cells = shape.cells();
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    assert_ne!(a, b, "{:?} rotation {} repeats a cell", kind, r);
                }
            }
        }
    }
}

#[test]
fn test_shapes_fit_bounding_box() {
    for kind in PieceKind::ALL {
        for r in 0..4 {
            let shape = shape_at(kind, r);
            let max_row = shape.cells().iter().map(|c| c.0).max().unwrap();
            let max_col = shape.cells().iter().map(|c| c.1).max().unwrap();
            assert_eq!(max_row as u8 + 1, shape.height(), "{:?} {}", kind, r);
            assert_eq!(max_col as u8 + 1, shape.width(), "{:?} {}", kind, r);
            assert!(shape.cells().iter().all(|&(row, col)| row >= 0 && col >= 0));
        }
    }
}

#[test]
fn test_i_piece_states() {
    let flat = get_shape(PieceKind::I, Rotation::North);
    assert_eq!((flat.width(), flat.height()), (4, 1));
    let tall = get_shape(PieceKind::I, Rotation::East);
    assert_eq!((tall.width(), tall.height()), (1, 4));
}

#[test]
fn test_o_piece_rotation_invariant() {
    let north = get_shape(PieceKind::O, Rotation::North);
    for r in 1..4 {
        assert_eq!(shape_at(PieceKind::O, r), north);
    }
}

#[test]
fn test_t_piece_spawn_state() {
    let t = get_shape(PieceKind::T, Rotation::North);
    assert!(t.contains(0, 1));
    assert!(t.contains(1, 0));
    assert!(t.contains(1, 1));
    assert!(t.contains(1, 2));
    assert!(!t.contains(0, 0));
}

#[test]
fn test_matrix_marks_occupied_cells() {
    let m = get_shape(PieceKind::L, Rotation::North).matrix();
    assert_eq!(m[0], [false, false, true, false]);
    assert_eq!(m[1], [true, true, true, false]);
    assert_eq!(m[2], [false; 4]);
    assert_eq!(m[3], [false; 4]);
}

#[test]
fn test_distinct_colors_per_kind() {
    for (i, a) in PieceKind::ALL.iter().enumerate() {
        for b in &PieceKind::ALL[i + 1..] {
            assert_ne!(a.color(), b.color());
        }
    }
}

proptest! {
    #[test]
    fn prop_rotation_index_normalized(kind in kind_strategy(), index in any::<i32>()) {
        let normalized = index.rem_euclid(4);
        prop_assert_eq!(shape_at(kind, index), shape_at(kind, normalized));
        prop_assert_eq!(Rotation::from_index(index).index() as i32, normalized);
    }

    #[test]
    fn prop_shape_lookup_deterministic(kind in kind_strategy(), index in any::<i32>()) {
        let a = shape_at(kind, index).matrix();
        let b = shape_at(kind, index).matrix();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_four_turns_return_to_start(kind in kind_strategy(), start in 0i32..4, turns in -50i32..50) {
        let from = Rotation::from_index(start);
        prop_assert_eq!(from.offset(turns * 4), from);
        prop_assert_eq!(from.offset(turns).offset(-turns), from);
        prop_assert_eq!(get_shape(kind, from.offset(4)), get_shape(kind, from));
    }
}
