//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameSession`] - Board, falling piece, statistics and the session state machine
//! - [`GameStats`] - Score, level and line clear bookkeeping
//! - [`PieceSource`] - Where spawned piece kinds come from
//! - [`GameLoop`] - Tick scheduling, input polling and rendering hand-off
//! - [`GameConfig`] - Board size and timing parameters
//!
//! # Game Flow
//!
//! 1. [`GameSession::new`] creates an empty board and spawns the first piece
//! 2. Every loop iteration polls one [`Action`] without blocking and applies it
//! 3. Every tick the falling piece moves one row down
//! 4. A piece that cannot move down is locked, full rows are cleared and scored
//! 5. A new piece spawns; if it collides immediately the session is over
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Action, GameConfig, GameSession};
//!
//! let mut session = GameSession::new(&GameConfig::default())?;
//! session.apply(Action::MoveLeft);
//! session.apply(Action::Rotate);
//! while session.stats().completed_pieces() == 0 {
//!     session.tick();
//! }
//! assert!(!session.is_game_over());
//! # Ok::<(), blockfall_engine::ConfigError>(())
//! ```

pub use self::{
    action::*, config::*, game_loop::*, game_session::*, game_stats::*, outcome::*,
    piece_source::*, view::*,
};

mod action;
mod config;
mod game_loop;
mod game_session;
mod game_stats;
mod outcome;
mod piece_source;
mod view;
