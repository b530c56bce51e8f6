//! Playfield tests - walls, locking and line clearing

use proptest::prelude::*;

use tui_mino::core::Playfield;
use tui_mino::types::{Cell, ColorId, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: i8 = BOARD_WIDTH as i8;
const H: i8 = BOARD_HEIGHT as i8;

fn fill_row(field: &mut Playfield, row: i8, color: ColorId) {
    for col in 0..W {
        field.lock(row, col, color);
    }
}

#[test]
fn test_playfield_new_empty() {
    let field = Playfield::new();
    assert_eq!(field.width(), BOARD_WIDTH);
    assert_eq!(field.height(), BOARD_HEIGHT);

    for row in 0..H {
        for col in 0..W {
            assert_eq!(field.get(row, col), Cell::Empty, "({}, {})", row, col);
            assert!(!field.is_occupied(row, col));
        }
    }
    assert!(!field.top_row_occupied());
}

#[test]
fn test_border_cells_are_walls() {
    let field = Playfield::new();
    for row in -1..=H {
        assert_eq!(field.get(row, -1), Cell::Wall);
        assert_eq!(field.get(row, W), Cell::Wall);
    }
    for col in -1..=W {
        assert_eq!(field.get(-1, col), Cell::Wall);
        assert_eq!(field.get(H, col), Cell::Wall);
    }
    // Far outside the padded grid still reads as wall.
    assert!(field.is_occupied(-10, 3));
    assert!(field.is_occupied(3, 100));
}

#[test]
fn test_lock_refuses_border() {
    let mut field = Playfield::new();
    let color = PieceKind::T.color();
    assert!(!field.lock(-1, 0, color));
    assert!(!field.lock(0, -1, color));
    assert!(!field.lock(H, 0, color));
    assert!(!field.lock(0, W, color));
    assert_eq!(field.get(-1, 0), Cell::Wall);
    assert_eq!(field.locked_count(), 0);

    assert!(field.lock(5, 5, color));
    assert_eq!(field.get(5, 5), Cell::Locked(color));
}

#[test]
fn test_clear_single_bottom_row() {
    let mut field = Playfield::new();
    fill_row(&mut field, H - 1, PieceKind::I.color());

    assert_eq!(field.clear_full_lines(), 1);
    assert_eq!(field.locked_count(), 0);
}

#[test]
fn test_clear_single_row_shifts_rows_above() {
    let mut field = Playfield::new();
    let marker = PieceKind::S.color();
    field.lock(10, 2, marker);
    field.lock(12, 7, marker);
    fill_row(&mut field, 13, PieceKind::I.color());
    field.lock(15, 0, marker);

    assert_eq!(field.clear_full_lines(), 1);
    assert_eq!(field.get(11, 2), Cell::Locked(marker));
    assert_eq!(field.get(13, 7), Cell::Locked(marker));
    assert_eq!(field.get(10, 2), Cell::Empty);
    // Rows below the cleared one do not move.
    assert_eq!(field.get(15, 0), Cell::Locked(marker));
    assert!(field.rows().next().is_some_and(|r| r.iter().all(|c| *c == Cell::Empty)));
}

#[test]
fn test_clear_two_adjacent_rows() {
    let mut field = Playfield::new();
    let marker = PieceKind::Z.color();
    field.lock(17, 4, marker);
    fill_row(&mut field, 18, PieceKind::I.color());
    fill_row(&mut field, 19, PieceKind::O.color());

    assert_eq!(field.clear_full_lines(), 2);
    assert_eq!(field.get(19, 4), Cell::Locked(marker));
    assert_eq!(field.locked_count(), 1);
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut field = Playfield::new();
    let above = PieceKind::J.color();
    let between = PieceKind::L.color();
    field.lock(1, 0, above);
    fill_row(&mut field, 3, PieceKind::I.color());
    field.lock(5, 9, between);
    fill_row(&mut field, 7, PieceKind::I.color());

    assert_eq!(field.clear_full_lines(), 2);
    // Between the two cleared rows: down by one.
    assert_eq!(field.get(6, 9), Cell::Locked(between));
    // Above both: down by two.
    assert_eq!(field.get(3, 0), Cell::Locked(above));
    assert_eq!(field.locked_count(), 2);
    assert!(!field.is_row_full(3));
    assert!(!field.is_row_full(7));
}

#[test]
fn test_clear_four_rows_with_stack() {
    let mut field = Playfield::new();
    let marker = PieceKind::T.color();
    for row in 16..H {
        fill_row(&mut field, row, PieceKind::I.color());
    }
    field.lock(15, 3, marker);

    assert_eq!(field.clear_full_lines(), 4);
    assert_eq!(field.get(19, 3), Cell::Locked(marker));
    assert_eq!(field.locked_count(), 1);
}

#[test]
fn test_row_with_gap_is_not_cleared() {
    let mut field = Playfield::new();
    for col in 1..W {
        field.lock(19, col, PieceKind::I.color());
    }
    assert!(!field.is_row_full(19));
    assert_eq!(field.clear_full_lines(), 0);
    assert_eq!(field.locked_count(), (W - 1) as usize);
}

#[test]
fn test_top_row_occupied() {
    let mut field = Playfield::new();
    field.lock(1, 0, PieceKind::I.color());
    assert!(!field.top_row_occupied());
    field.lock(0, 9, PieceKind::I.color());
    assert!(field.top_row_occupied());
    field.clear();
    assert!(!field.top_row_occupied());
}

proptest! {
    #[test]
    fn prop_locks_never_touch_border(cells in prop::collection::vec((-3i8..24, -3i8..14), 0..200)) {
        let mut field = Playfield::new();
        for (row, col) in cells {
            let inside = Playfield::is_interior(row, col);
            prop_assert_eq!(field.lock(row, col, PieceKind::O.color()), inside);
        }
        field.clear_full_lines();

        for row in -1..=H {
            prop_assert!(field.is_occupied(row, -1));
            prop_assert!(field.is_occupied(row, W));
        }
        for col in -1..=W {
            prop_assert_eq!(field.get(-1, col), Cell::Wall);
            prop_assert_eq!(field.get(H, col), Cell::Wall);
        }
    }

    #[test]
    fn prop_clear_removes_exactly_the_full_rows(full in prop::collection::btree_set(0i8..H, 0..6)) {
        let mut field = Playfield::new();
        for row in 0..H {
            if full.contains(&row) {
                fill_row(&mut field, row, PieceKind::I.color());
            } else {
                // One block per partial row, in a column that encodes the row.
                field.lock(row, row % W, PieceKind::T.color());
                for col in 0..W {
                    if col != row % W && col != (row + 1) % W {
                        field.lock(row, col, PieceKind::T.color());
                    }
                }
            }
        }
        let before = field.locked_count();
        let cleared = field.clear_full_lines();

        prop_assert_eq!(cleared as usize, full.len());
        prop_assert_eq!(field.locked_count(), before - full.len() * W as usize);
        for row in 0..H as usize {
            prop_assert!(!field.is_row_full(row));
        }
    }
}
