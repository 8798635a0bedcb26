use std::fmt;

use crate::BoardError;

/// Fixed-size occupancy grid holding the locked cells of a session.
///
/// Cells are addressed as `(x, y)` with `(0, 0)` at the top-left corner,
/// `x` growing rightward and `y` growing downward. Every occupied cell lies
/// within `[0, width) × [0, height)`.
///
/// The board is only mutated by locking a piece (see [`Board::lock_piece`])
/// and by [`Board::clear_full_rows`].
///
/// # Example
///
/// ```
/// use blockfall_engine::Board;
///
/// let mut board = Board::new(4, 3)?;
/// for x in 0..4 {
///     board.set_occupied(x, 2);
/// }
/// assert_eq!(board.clear_full_rows(), 1);
/// assert_eq!(board.occupied_count(), 0);
/// # Ok::<(), blockfall_engine::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Board {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    /// Largest accepted width or height.
    ///
    /// Keeps every board coordinate representable as an `i32` piece anchor.
    pub const MAX_DIMENSION: usize = 1024;

    /// Creates an empty board.
    ///
    /// Fails with [`BoardError::InvalidDimension`] if either side is zero or
    /// exceeds [`Board::MAX_DIMENSION`].
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        let valid = 1..=Self::MAX_DIMENSION;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(BoardError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> Result<bool, BoardError> {
        if !self.contains(x, y) {
            return Err(BoardError::OutOfBounds { x, y });
        }
        Ok(self.cells[self.index(x, y)])
    }

    /// Marks a cell as occupied.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board. Callers go through the
    /// collision checks first, so this is a programming error.
    pub fn set_occupied(&mut self, x: usize, y: usize) {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) is outside the {}x{} board",
            self.width,
            self.height
        );
        let index = self.index(x, y);
        self.cells[index] = true;
    }

    /// Returns the cells of row `y`, left to right.
    #[must_use]
    pub fn row(&self, y: usize) -> &[bool] {
        &self.cells[y * self.width..][..self.width]
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.width)
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|&cell| cell)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows above a removed row shift down by the number of removed rows
    /// below them, and the same number of empty rows appear at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.is_row_full(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                let start = y * width;
                self.cells
                    .copy_within(start..start + width, start + count * width);
            }
        }
        self.cells[..count * width].fill(false);
        count
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new(rows[0].len(), rows.len()).unwrap();
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), board.width);
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    board.set_occupied(x, y);
                }
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
