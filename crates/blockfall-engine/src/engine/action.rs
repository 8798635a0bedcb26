/// A decoded player request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    /// Moves the piece one row down immediately. Never locks and earns no points.
    SoftDrop,
    /// Rotates the piece 90° clockwise.
    Rotate,
    /// Ends the session without locking the falling piece.
    Quit,
}
