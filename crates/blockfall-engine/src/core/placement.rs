use super::{
    board::Board,
    piece::{Piece, Shape},
};

impl Board {
    /// Returns whether `shape` anchored at `(x, y)` would collide.
    ///
    /// A cell collides when it falls left of column 0, right of the last
    /// column, below the last row, or onto an occupied cell. Cells above the
    /// top row only collide with the side walls.
    #[must_use]
    pub fn check_collision(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.occupied_cells().any(|(col, row)| {
            let Ok(bx) = usize::try_from(x + i32::from(col)) else {
                return true;
            };
            if bx >= self.width() {
                return true;
            }
            let Ok(by) = usize::try_from(y + i32::from(row)) else {
                return false;
            };
            by >= self.height() || self.is_occupied(bx, by).unwrap_or(true)
        })
    }

    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        self.check_collision(piece.shape(), piece.x(), piece.y())
    }

    /// Merges the piece's cells into the board.
    ///
    /// Cells above the top row are dropped.
    ///
    /// # Panics
    ///
    /// Panics if a cell lies outside the board horizontally or below it.
    /// Only pieces that passed [`Board::is_colliding`] are locked.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_positions() {
            let Ok(y) = usize::try_from(y) else {
                continue;
            };
            let x = usize::try_from(x).expect("locked piece must be inside the side walls");
            self.set_occupied(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::PieceKind;

    use super::*;

    fn board() -> Board {
        Board::new(10, 20).unwrap()
    }

    #[test]
    fn test_no_collision_on_empty_board() {
        let board = board();
        for kind in PieceKind::ALL {
            assert!(!board.is_colliding(&Piece::spawn(kind, board.width())));
        }
    }

    #[test]
    fn test_walls_and_floor_collide() {
        let board = board();
        let o = PieceKind::O.spawn_shape();
        assert!(board.check_collision(o, -1, 5));
        assert!(board.check_collision(o, 9, 5));
        assert!(board.check_collision(o, 4, 19));
        assert!(!board.check_collision(o, 0, 18));
        assert!(!board.check_collision(o, 8, 18));

        let i = PieceKind::I.spawn_shape();
        assert!(board.check_collision(i, 7, 0));
        assert!(!board.check_collision(i, 6, 0));
        assert!(board.check_collision(i, 0, 20));
    }

    #[test]
    fn test_cells_above_top_only_collide_with_walls() {
        let board = Board::from_rows(&[
            "##########",
            "..........",
            "..........",
        ]);
        let vertical_i = PieceKind::I.spawn_shape().rotated_cw();
        // Bottom cell lands on the filled top row.
        assert!(board.check_collision(&vertical_i, 0, -3));
        // Fully above the board: only walls matter.
        assert!(!board.check_collision(&vertical_i, 0, -4));
        assert!(board.check_collision(&vertical_i, -1, -4));
        assert!(board.check_collision(&vertical_i, 10, -4));
    }

    #[test]
    fn test_occupied_cells_collide() {
        let mut board = board();
        board.set_occupied(5, 10);
        let t = PieceKind::T.spawn_shape();
        // T covers (4,9),(5,9),(6,9),(5,10)
        assert!(board.check_collision(t, 4, 9));
        // Shifted left, the stem sits at (4,10)
        assert!(!board.check_collision(t, 3, 9));
    }

    #[test]
    fn test_lock_piece() {
        let mut board = board();
        board.lock_piece(&Piece::new(PieceKind::O, 4, 18));
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(board.is_occupied(x, y), Ok(true));
        }
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_lock_piece_ignores_cells_above_top() {
        let mut board = board();
        let piece = Piece::new(PieceKind::I, 0, -2).rotated_cw();
        board.lock_piece(&piece);
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.is_occupied(0, 0), Ok(true));
        assert_eq!(board.is_occupied(0, 1), Ok(true));
    }
}
