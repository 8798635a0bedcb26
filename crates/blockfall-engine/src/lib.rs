pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// A width or height of zero, or larger than [`Board::MAX_DIMENSION`].
    #[display("invalid board dimension {width}x{height} (each side must be 1 to 1024)")]
    InvalidDimension { width: usize, height: usize },
    #[display("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[display("poll interval must be greater than zero")]
    ZeroPollInterval,
    #[display("starting level must be at least 1")]
    ZeroLevel,
    #[display("invalid board: {_0}")]
    Board(BoardError),
}

impl From<BoardError> for ConfigError {
    fn from(err: BoardError) -> Self {
        ConfigError::Board(err)
    }
}
