use crate::{Board, GameStats, Piece, PieceKind, SessionState};

/// What a renderer shows for one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    /// Part of a locked piece.
    Locked,
    /// Part of the falling piece.
    Falling(PieceKind),
}

/// Read-only snapshot of a session handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    board: &'a Board,
    falling_piece: Option<Piece>,
    stats: &'a GameStats,
    state: SessionState,
}

impl<'a> SessionView<'a> {
    pub(crate) fn new(
        board: &'a Board,
        falling_piece: Option<Piece>,
        stats: &'a GameStats,
        state: SessionState,
    ) -> Self {
        Self {
            board,
            falling_piece,
            stats,
            state,
        }
    }

    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<Piece> {
        self.falling_piece
    }

    #[must_use]
    pub fn stats(&self) -> &'a GameStats {
        self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the cell at `(x, y)`, with the falling piece drawn over the board.
    ///
    /// Coordinates outside the board read as [`Cell::Empty`].
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if let Some(piece) = self.falling_piece {
            let covered = piece.occupied_positions().any(|(px, py)| {
                usize::try_from(px).is_ok_and(|px| px == x)
                    && usize::try_from(py).is_ok_and(|py| py == y)
            });
            if covered {
                return Cell::Falling(piece.kind());
            }
        }
        if matches!(self.board.is_occupied(x, y), Ok(true)) {
            Cell::Locked
        } else {
            Cell::Empty
        }
    }

    /// Returns the cells row by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Cell> + '_> + '_ {
        (0..self.board.height())
            .map(move |y| (0..self.board.width()).map(move |x| self.cell(x, y)))
    }
}
