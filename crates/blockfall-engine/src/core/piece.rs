use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::Serialize;

/// A piece matrix in one orientation.
///
/// The matrix is at most 4×4 cells. Row `r` is stored as a bit set where
/// bit `c` marks the cell at column `c` as occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [u8; 4],
}

impl Shape {
    const fn new(width: u8, height: u8, rows: [u8; 4]) -> Self {
        assert!(width as usize <= 4 && height as usize <= 4);
        Self {
            width,
            height,
            rows,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    #[must_use]
    pub const fn is_occupied(&self, col: usize, row: usize) -> bool {
        col < self.width() && row < self.height() && (self.rows[row] & (1 << col)) != 0
    }

    /// Returns an iterator of occupied `(col, row)` offsets within the matrix.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).filter_map(move |col| {
                self.is_occupied(usize::from(col), usize::from(row))
                    .then_some((col, row))
            })
        })
    }

    /// Rotates the matrix 90° clockwise.
    ///
    /// Equivalent to reversing the rows and then transposing, so the
    /// width and height swap: `new[r][c] = old[height - 1 - c][r]`.
    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let mut rows = [0; 4];
        let mut r = 0;
        while r < self.width {
            let mut c = 0;
            while c < self.height {
                if (self.rows[(self.height - 1 - c) as usize] & (1 << r)) != 0 {
                    rows[r as usize] |= 1 << c;
                }
                c += 1;
            }
            r += 1;
        }
        Self::new(self.height, self.width, rows)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width() {
                f.write_str(if self.is_occupied(col, row) { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotating wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn rotated_cw(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// The seven tetromino kinds.
///
/// Serializes as its letter, e.g. `"T"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    T = 2,
    L = 3,
    J = 4,
    S = 5,
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the matrix of this kind in the given rotation.
    #[must_use]
    pub fn shape(self, rotation: PieceRotation) -> &'static Shape {
        &PIECE_SHAPES[self as usize][rotation.as_usize()]
    }

    /// Returns the matrix of this kind in its spawn orientation.
    #[must_use]
    pub fn spawn_shape(self) -> &'static Shape {
        &PIECE_SHAPES[self as usize][0]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// A falling piece with kind, rotation and anchor position.
///
/// `(x, y)` is the board coordinate of the top-left cell of the current
/// matrix. The anchor may lie outside the board; whether a placement is legal
/// is decided by [`Board::is_colliding`](crate::Board::is_colliding).
///
/// Pieces are values: moving or rotating returns a new `Piece` and leaves the
/// original untouched, so a candidate can be checked before it is committed.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T, 10);
/// assert_eq!((piece.x(), piece.y()), (4, 0));
///
/// let moved = piece.left().rotated_cw();
/// assert_eq!(moved.x(), 3);
/// assert_eq!(piece.x(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece in spawn orientation at the given anchor.
    #[must_use]
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation: PieceRotation::default(),
            x,
            y,
        }
    }

    /// Creates a piece horizontally centered over a board of `board_width`
    /// columns, on the top row.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape_width = kind.spawn_shape().width();
        let x = i32::try_from(board_width / 2).unwrap_or(i32::MAX)
            - i32::try_from(shape_width / 2).unwrap_or(0);
        Self::new(kind, x, 0)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape(self.rotation)
    }

    /// Returns an iterator of the board coordinates covered by this piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape()
            .occupied_cells()
            .map(move |(col, row)| (self.x + i32::from(col), self.y + i32::from(row)))
    }

    #[must_use]
    pub fn left(&self) -> Self {
        Self {
            x: self.x - 1,
            ..*self
        }
    }

    #[must_use]
    pub fn right(&self) -> Self {
        Self {
            x: self.x + 1,
            ..*self
        }
    }

    #[must_use]
    pub fn down(&self) -> Self {
        Self {
            y: self.y + 1,
            ..*self
        }
    }

    /// Rotates clockwise around the anchor.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_cw(),
            ..*self
        }
    }
}

/// Generates all 4 rotation states of a matrix by rotating 90° clockwise.
const fn shape_rotations(shape: Shape) -> [Shape; 4] {
    let mut rotates = [shape; 4];
    let mut i = 1;
    while i < 4 {
        rotates[i] = rotates[i - 1].rotated_cw();
        i += 1;
    }
    rotates
}

static PIECE_SHAPES: [[Shape; 4]; PieceKind::LEN] = {
    const fn m(bits: [bool; 4]) -> u8 {
        let mut mask = 0;
        let mut i = 0;
        while i < 4 {
            if bits[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const C: bool = true;
    const E: bool = false;

    // Indexed by `PieceKind as usize`.
    [
        // I-piece
        shape_rotations(Shape::new(4, 1, [m([C, C, C, C]), 0, 0, 0])),
        // O-piece
        shape_rotations(Shape::new(2, 2, [m([C, C, E, E]), m([C, C, E, E]), 0, 0])),
        // T-piece
        shape_rotations(Shape::new(3, 2, [m([C, C, C, E]), m([E, C, E, E]), 0, 0])),
        // L-piece
        shape_rotations(Shape::new(3, 2, [m([C, C, C, E]), m([C, E, E, E]), 0, 0])),
        // J-piece
        shape_rotations(Shape::new(3, 2, [m([C, C, C, E]), m([E, E, C, E]), 0, 0])),
        // S-piece
        shape_rotations(Shape::new(3, 2, [m([E, C, C, E]), m([C, C, E, E]), 0, 0])),
        // Z-piece
        shape_rotations(Shape::new(3, 2, [m([C, C, E, E]), m([E, C, C, E]), 0, 0])),
    ]
};
