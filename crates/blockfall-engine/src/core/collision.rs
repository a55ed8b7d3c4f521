use super::{
    board::{Board, Cell},
    piece::Position,
    shape::Shape,
};

/// Tests whether `shape` placed at `position` overlaps a wall or a filled cell.
///
/// Every occupied mask cell is projected to `(position.x + x, position.y + y)`.
/// The result is `true` if any projected cell lies outside the board or on a
/// filled cell. Empty mask cells are never checked, so the unused corners of a
/// mask may hang past the edges of the board.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Position, ShapeKind, collides};
///
/// let board = Board::EMPTY;
/// let o = ShapeKind::O.shape();
///
/// assert!(!collides(&o, Position::new(0, 0), &board));
/// assert!(collides(&o, Position::new(-1, 0), &board));
/// assert!(collides(&o, Position::new(0, 19), &board));
/// ```
#[must_use]
pub fn collides(shape: &Shape, position: Position, board: &Board) -> bool {
    shape.occupied_cells().any(|(dx, dy)| {
        let cell = board.cell(position.x + dx, position.y + dy);
        !matches!(cell, Some(Cell::Empty))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BOARD_HEIGHT, BOARD_WIDTH, ShapeKind};

    fn board_from_rows(rows: &[&str]) -> Board {
        let mut all = vec![".........."; BOARD_HEIGHT - rows.len()];
        all.extend_from_slice(rows);
        all.join("\n").parse().unwrap()
    }

    #[test]
    fn test_empty_board_inside_bounds() {
        let board = Board::EMPTY;
        for kind in ShapeKind::ALL {
            let shape = kind.shape();
            let pos = Position::spawn_for(&shape);
            assert!(!collides(&shape, pos, &board), "{kind:?} collides at spawn");
        }
    }

    #[test]
    fn test_walls() {
        let board = Board::EMPTY;
        let i = ShapeKind::I.shape();
        assert!(!collides(&i, Position::new(0, 0), &board));
        assert!(!collides(&i, Position::new(6, 0), &board));
        assert!(collides(&i, Position::new(-1, 0), &board));
        assert!(collides(&i, Position::new(7, 0), &board));
        assert!(collides(&i, Position::new(0, -1), &board));
        assert!(!collides(&i, Position::new(0, 19), &board));
        assert!(collides(&i, Position::new(0, 20), &board));
    }

    #[test]
    fn test_filled_cells() {
        let board = board_from_rows(&["....1....."]);
        let o = ShapeKind::O.shape();
        assert!(collides(&o, Position::new(3, 18), &board));
        assert!(collides(&o, Position::new(4, 18), &board));
        assert!(!collides(&o, Position::new(5, 18), &board));
        assert!(!collides(&o, Position::new(4, 17), &board));
    }

    #[test]
    fn test_empty_mask_cells_over_filled_cells() {
        // Rotated T = [[0,1],[1,1],[0,1]]; its top-left mask cell is empty
        let t = ShapeKind::T.shape().rotated_clockwise();
        let board = board_from_rows(&["1.........", "..........", ".........."]);
        assert!(!collides(&t, Position::new(0, 17), &board));
        assert!(collides(&t, Position::new(0, 16), &board));
    }

    #[test]
    fn test_empty_mask_cells_may_overhang() {
        let board = Board::EMPTY;
        let right_bar = Shape::try_from_rows(&[[0_u8, 1], [0, 1]]).unwrap();
        assert!(!collides(&right_bar, Position::new(-1, 0), &board));
        assert!(collides(&right_bar, Position::new(-2, 0), &board));

        let left_bar = Shape::try_from_rows(&[[1_u8, 0], [1, 0]]).unwrap();
        let last_x = i32::try_from(BOARD_WIDTH).unwrap() - 1;
        assert!(!collides(&left_bar, Position::new(last_x, 0), &board));
        assert!(collides(&left_bar, Position::new(last_x + 1, 0), &board));

        let top_bar = Shape::try_from_rows(&[[1_u8, 1], [0, 0]]).unwrap();
        let last_y = i32::try_from(BOARD_HEIGHT).unwrap() - 1;
        assert!(!collides(&top_bar, Position::new(0, last_y), &board));
    }

    #[test]
    fn test_collision_is_pure() {
        let board = board_from_rows(&["1111111111"]);
        let before = board.clone();
        let shape = ShapeKind::L.shape();
        let pos = Position::new(2, 18);

        let first = collides(&shape, pos, &board);
        let second = collides(&shape, pos, &board);
        assert!(first);
        assert_eq!(first, second);
        assert_eq!(board, before);
    }
}
