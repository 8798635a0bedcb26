use tracing::{debug, info};

use crate::{
    Action, Board, ConfigError, EndReason, GameConfig, GameStats, Piece, PieceCollisionError,
    PieceSource, RandomPieces, SessionOutcome, SessionView,
};

/// Phase of the session state machine.
///
/// ```text
/// Spawning → Falling → Locking → Clearing → Spawning
///     │          │
///     └──────────┴──→ GameOver
/// ```
///
/// `Spawning`, `Locking` and `Clearing` only last for the duration of a
/// single [`GameSession::tick`] call; between calls a session is either
/// `Falling` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

/// One play-through: board, falling piece, statistics and state.
///
/// Every operation either completes fully or leaves the session exactly as
/// it was. Moves are checked on a copy of the falling piece and committed
/// only when the copy does not collide.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    falling_piece: Option<Piece>,
    stats: GameStats,
    state: SessionState,
    end_reason: Option<EndReason>,
    outcome_reported: bool,
    pieces: Box<dyn PieceSource>,
}

impl GameSession {
    /// Creates a session on an empty board and spawns the first piece.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.width, config.height)?;
        let pieces = config
            .seed
            .map_or_else(RandomPieces::new, RandomPieces::with_seed);
        Ok(Self::with_parts(
            board,
            Box::new(pieces),
            config.starting_level,
        ))
    }

    /// Creates a session on an existing board with a custom piece source.
    ///
    /// The first piece spawns immediately. If it collides, the session is
    /// already over.
    ///
    /// # Panics
    ///
    /// Panics if `level` is zero.
    #[must_use]
    pub fn with_parts(board: Board, pieces: Box<dyn PieceSource>, level: usize) -> Self {
        let mut session = Self {
            board,
            falling_piece: None,
            stats: GameStats::new(level),
            state: SessionState::Spawning,
            end_reason: None,
            outcome_reported: false,
            pieces,
        };
        session.spawn();
        session
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<Piece> {
        self.falling_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Changes the scoring multiplier for later line clears.
    ///
    /// # Panics
    ///
    /// Panics if `level` is zero.
    pub fn set_level(&mut self, level: usize) {
        self.stats.set_level(level);
    }

    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        SessionView::new(&self.board, self.falling_piece, &self.stats, self.state)
    }

    /// Returns the final result once the session is over.
    #[must_use]
    pub fn outcome(&self) -> Option<SessionOutcome> {
        let reason = self.end_reason?;
        Some(SessionOutcome {
            score: self.stats.score(),
            lines_cleared: self.stats.total_cleared_lines(),
            pieces_locked: self.stats.completed_pieces(),
            level: self.stats.level(),
            reason,
        })
    }

    /// Marks the outcome as handed to the session-end callback.
    ///
    /// Returns `true` only the first time it is called on a finished session.
    pub(crate) fn mark_outcome_reported(&mut self) -> bool {
        if !self.is_game_over() || self.outcome_reported {
            return false;
        }
        self.outcome_reported = true;
        true
    }

    /// Applies a player action. Rejected moves are ignored.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::MoveLeft => _ = self.try_move_left(),
            Action::MoveRight => _ = self.try_move_right(),
            Action::SoftDrop => _ = self.try_soft_drop(),
            Action::Rotate => _ = self.try_rotate(),
            Action::Quit => self.quit(),
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_commit(Piece::left)
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_commit(Piece::right)
    }

    /// Moves the falling piece one row down. Never locks it.
    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.try_commit(Piece::down)
    }

    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.try_commit(Piece::rotated_cw)
    }

    /// Commits the moved piece only if it fits on the board.
    ///
    /// Fails without touching the session when there is no falling piece.
    fn try_commit<F>(&mut self, transform: F) -> Result<(), PieceCollisionError>
    where
        F: FnOnce(&Piece) -> Piece,
    {
        if !self.state.is_falling() {
            return Err(PieceCollisionError);
        }
        let current = self.falling_piece.ok_or(PieceCollisionError)?;
        let candidate = transform(&current);
        if self.board.is_colliding(&candidate) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = Some(candidate);
        Ok(())
    }

    /// Runs one gravity step.
    ///
    /// The falling piece moves one row down. If it cannot, it is locked,
    /// full rows are cleared and scored, and the next piece spawns.
    pub fn tick(&mut self) {
        if !self.state.is_falling() {
            return;
        }
        if self.try_soft_drop().is_ok() {
            return;
        }
        self.lock_falling_piece();
    }

    /// Ends the session without locking the falling piece.
    pub fn quit(&mut self) {
        if !self.is_game_over() {
            self.end(EndReason::Quit);
        }
    }

    fn lock_falling_piece(&mut self) {
        let Some(piece) = self.falling_piece.take() else {
            return;
        };

        self.state = SessionState::Locking;
        self.board.lock_piece(&piece);
        debug!(kind = ?piece.kind(), x = piece.x(), y = piece.y(), "locked piece");

        self.state = SessionState::Clearing;
        let cleared = self.board.clear_full_rows();
        let points = self.stats.complete_piece_drop(cleared);
        if cleared > 0 {
            info!(cleared, points, score = self.stats.score(), "cleared rows");
        }

        self.spawn();
    }

    fn spawn(&mut self) {
        self.state = SessionState::Spawning;
        let piece = Piece::spawn(self.pieces.next_kind(), self.board.width());
        if self.board.is_colliding(&piece) {
            debug!(kind = ?piece.kind(), x = piece.x(), "spawn position blocked");
            self.end(EndReason::ToppedOut);
            return;
        }
        debug!(kind = ?piece.kind(), x = piece.x(), "spawned piece");
        self.falling_piece = Some(piece);
        self.state = SessionState::Falling;
    }

    fn end(&mut self, reason: EndReason) {
        self.state = SessionState::GameOver;
        self.end_reason = Some(reason);
        info!(
            ?reason,
            score = self.stats.score(),
            lines = self.stats.total_cleared_lines(),
            pieces = self.stats.completed_pieces(),
            "game over"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::{PieceKind, PieceSequence};

    use super::*;

    fn session_with(kinds: &[PieceKind]) -> GameSession {
        GameSession::with_parts(
            Board::new(10, 20).unwrap(),
            Box::new(PieceSequence::new(kinds.iter().copied())),
            1,
        )
    }

    /// Ticks until the falling piece locks, returning the number of ticks.
    fn drop_until_locked(session: &mut GameSession) -> usize {
        let locked = session.stats().completed_pieces();
        let mut ticks = 0;
        while session.stats().completed_pieces() == locked {
            session.tick();
            ticks += 1;
            assert!(ticks <= 100, "piece never locked");
        }
        ticks
    }

    #[test]
    fn test_new_session_spawns_first_piece() {
        let session = session_with(&[PieceKind::T]);
        assert_eq!(session.state(), SessionState::Falling);
        assert_eq!(session.falling_piece(), Some(Piece::new(PieceKind::T, 4, 0)));
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn test_new_from_config_is_seeded() {
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        let a = GameSession::new(&config).unwrap();
        let b = GameSession::new(&config).unwrap();
        assert_eq!(a.falling_piece(), b.falling_piece());
        assert_eq!(a.stats().level(), 1);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            height: 0,
            ..GameConfig::default()
        };
        assert!(GameSession::new(&config).is_err());
    }

    #[test]
    fn test_o_piece_drops_to_bottom() {
        let mut session = session_with(&[PieceKind::O]);

        // 18 moves down to rest on the floor, then one failed move locks it.
        assert_eq!(drop_until_locked(&mut session), 19);

        let board = session.board();
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(board.is_occupied(x, y), Ok(true), "({x}, {y})");
        }
        assert_eq!(board.occupied_count(), 4);
        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.state(), SessionState::Falling);
    }

    #[test]
    fn test_completing_a_row_clears_and_scores() {
        let mut session = session_with(&[PieceKind::I]);

        // Horizontal I at columns 0-3.
        for _ in 0..3 {
            session.try_move_left().unwrap();
        }
        drop_until_locked(&mut session);

        // Horizontal I at columns 4-7.
        session.try_move_right().unwrap();
        drop_until_locked(&mut session);

        // Vertical I in column 8; only column 9 of the bottom row stays empty.
        session.try_rotate().unwrap();
        for _ in 0..5 {
            session.try_move_right().unwrap();
        }
        drop_until_locked(&mut session);
        assert_eq!(session.board().row(19).iter().filter(|&&c| c).count(), 9);
        assert_eq!(session.stats().score(), 0);

        // Vertical I in column 9 completes the bottom row.
        session.try_rotate().unwrap();
        for _ in 0..6 {
            session.try_move_right().unwrap();
        }
        drop_until_locked(&mut session);

        assert_eq!(session.stats().total_cleared_lines(), 1);
        assert_eq!(session.stats().line_cleared_counter()[1], 1);
        assert_eq!(session.stats().score(), 100 * session.stats().level());
        assert_eq!(session.board().occupied_count(), 6);
        for y in 17..20 {
            assert_eq!(
                session.board().row(y),
                [false, false, false, false, false, false, false, false, true, true]
            );
        }
    }

    #[test]
    fn test_level_multiplies_clear_points() {
        let mut session = GameSession::with_parts(
            Board::new(4, 4).unwrap(),
            Box::new(PieceSequence::new([PieceKind::I])),
            3,
        );
        drop_until_locked(&mut session);
        assert_eq!(session.stats().score(), 300);
        assert_eq!(session.board().occupied_count(), 0);

        session.set_level(5);
        drop_until_locked(&mut session);
        assert_eq!(session.stats().score(), 800);
    }

    #[test]
    fn test_huge_level_saturates_score() {
        let mut session = GameSession::with_parts(
            Board::new(4, 4).unwrap(),
            Box::new(PieceSequence::new([PieceKind::I])),
            usize::MAX / 50,
        );
        drop_until_locked(&mut session);
        assert_eq!(session.stats().score(), usize::MAX);
        drop_until_locked(&mut session);
        assert_eq!(session.stats().score(), usize::MAX);
        assert_eq!(session.stats().total_cleared_lines(), 2);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut board = Board::new(10, 20).unwrap();
        for x in 0..10 {
            board.set_occupied(x, 0);
        }
        let session =
            GameSession::with_parts(board, Box::new(PieceSequence::new([PieceKind::O])), 1);

        assert!(session.is_game_over());
        assert_eq!(session.end_reason(), Some(EndReason::ToppedOut));
        assert_eq!(session.falling_piece(), None);
        assert_eq!(session.stats().completed_pieces(), 0);
        assert_eq!(session.board().occupied_count(), 10);
    }

    #[test]
    fn test_stacking_to_the_top_ends_session() {
        let mut session = session_with(&[PieceKind::O]);
        let mut locks = 0;
        while !session.is_game_over() {
            drop_until_locked(&mut session);
            locks += 1;
        }
        // Ten O pieces fill columns 4-5 from row 19 up to row 0.
        assert_eq!(locks, 10);
        assert_eq!(session.end_reason(), Some(EndReason::ToppedOut));
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.pieces_locked, 10);
        assert_eq!(outcome.score, 0);
        assert!(!outcome.is_won());
    }

    #[test]
    fn test_rejected_move_leaves_piece_unchanged() {
        let mut session = session_with(&[PieceKind::O]);
        for _ in 0..4 {
            session.try_move_left().unwrap();
        }
        let before = session.falling_piece();
        assert!(session.try_move_left().is_err());
        assert_eq!(session.falling_piece(), before);

        for _ in 0..8 {
            session.try_move_right().unwrap();
        }
        let before = session.falling_piece();
        assert!(session.try_move_right().is_err());
        assert_eq!(session.falling_piece(), before);
    }

    #[test]
    fn test_rejected_rotation_leaves_piece_unchanged() {
        let mut session = session_with(&[PieceKind::I]);
        session.try_rotate().unwrap();
        for _ in 0..6 {
            session.try_move_right().unwrap();
        }
        // A horizontal I anchored at column 9 would stick out of the right wall.
        let before = session.falling_piece();
        assert!(session.try_rotate().is_err());
        assert_eq!(session.falling_piece(), before);
        assert_eq!(before.unwrap().rotation().as_usize(), 1);
    }

    #[test]
    fn test_soft_drop_never_locks() {
        let mut session = session_with(&[PieceKind::O]);
        while session.try_soft_drop().is_ok() {}
        assert_eq!(session.falling_piece().unwrap().y(), 18);
        assert_eq!(session.stats().completed_pieces(), 0);
        assert_eq!(session.board().occupied_count(), 0);

        session.tick();
        assert_eq!(session.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_quit_does_not_lock() {
        let mut session = session_with(&[PieceKind::T]);
        session.apply(Action::SoftDrop);
        session.apply(Action::Quit);

        assert!(session.is_game_over());
        assert_eq!(session.end_reason(), Some(EndReason::Quit));
        assert_eq!(session.board().occupied_count(), 0);
        assert_eq!(session.stats().completed_pieces(), 0);

        let before = session.falling_piece();
        session.apply(Action::MoveLeft);
        session.tick();
        assert_eq!(session.falling_piece(), before);
        assert!(session.try_rotate().is_err());

        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.reason, EndReason::Quit);
        assert_eq!(outcome.pieces_locked, 0);
    }

    #[test]
    fn test_apply_actions() {
        let mut session = session_with(&[PieceKind::T]);
        session.apply(Action::MoveLeft);
        session.apply(Action::SoftDrop);
        session.apply(Action::Rotate);
        let piece = session.falling_piece().unwrap();
        assert_eq!((piece.x(), piece.y()), (3, 1));
        assert_eq!(piece.rotation().as_usize(), 1);
        session.apply(Action::MoveRight);
        assert_eq!(session.falling_piece().unwrap().x(), 4);
    }

    #[test]
    fn test_view_reflects_session() {
        let session = session_with(&[PieceKind::O]);
        let view = session.view();
        assert_eq!(view.state(), SessionState::Falling);
        assert_eq!(view.falling_piece(), session.falling_piece());
        assert_eq!(view.stats().score(), 0);
        assert_eq!(view.board().width(), 10);
    }
}
