use serde::Serialize;

/// Points per cleared row, multiplied by the row count and the level.
pub const POINTS_PER_LINE: usize = 100;

/// Game statistics tracking score, level, lines cleared, and piece count.
///
/// # Scoring
///
/// Clearing `n` rows with one lock awards `n × 100 × level` points. There are
/// no multi-line, combo or drop bonuses.
///
/// The level is a scoring multiplier only. It starts at the configured value
/// and changes only through [`GameStats::set_level`].
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new(1);
/// stats.complete_piece_drop(2);
///
/// assert_eq!(stats.score(), 200);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Returns the points awarded for clearing `cleared_lines` rows at `level`.
///
/// Saturates at `usize::MAX` instead of overflowing.
#[must_use]
pub const fn line_clear_points(cleared_lines: usize, level: usize) -> usize {
    cleared_lines
        .saturating_mul(POINTS_PER_LINE)
        .saturating_mul(level)
}

impl GameStats {
    /// Creates a tracker with all counters at zero.
    ///
    /// # Panics
    ///
    /// Panics if `level` is zero.
    #[must_use]
    pub const fn new(level: usize) -> Self {
        assert!(level >= 1, "level must be at least 1");
        Self {
            score: 0,
            level,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Sets the scoring multiplier for subsequent line clears.
    ///
    /// # Panics
    ///
    /// Panics if `level` is zero.
    pub const fn set_level(&mut self, level: usize) {
        assert!(level >= 1, "level must be at least 1");
        self.level = level;
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by the number of rows they cleared.
    ///
    /// Index `n` counts locks that cleared `n` rows. A piece spans at most
    /// four rows, so the histogram covers every possible clear.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a locked piece and the rows it cleared, returning the points awarded.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        self.completed_pieces = self.completed_pieces.saturating_add(1);
        self.total_cleared_lines = self.total_cleared_lines.saturating_add(cleared_lines);
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        let points = line_clear_points(cleared_lines, self.level);
        self.score = self.score.saturating_add(points);
        points
    }
}
