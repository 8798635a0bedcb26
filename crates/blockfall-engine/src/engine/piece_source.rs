use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::PieceKind;

/// Supplies the kind of each newly spawned piece.
pub trait PieceSource: fmt::Debug {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniformly random piece kinds, independent of previous spawns.
///
/// There is no bag system: any kind may repeat any number of times.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSource as _, RandomPieces};
///
/// let mut a = RandomPieces::with_seed(42);
/// let mut b = RandomPieces::with_seed(42);
/// for _ in 0..10 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: Pcg32,
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieces {
    /// Creates a generator seeded from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_os_rng(),
        }
    }

    /// Creates a generator producing a reproducible sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// A fixed sequence of piece kinds, repeated forever.
#[derive(Debug, Clone)]
pub struct PieceSequence {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl PieceSequence {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, next: 0 }
    }
}

impl PieceSource for PieceSequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_repeats() {
        let mut source = PieceSequence::new([PieceKind::I, PieceKind::O]);
        let kinds: Vec<_> = (0..5).map(|_| source.next_kind()).collect();
        assert_eq!(
            kinds,
            [
                PieceKind::I,
                PieceKind::O,
                PieceKind::I,
                PieceKind::O,
                PieceKind::I
            ]
        );
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_empty_sequence_panics() {
        let _ = PieceSequence::new([]);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = RandomPieces::with_seed(1234);
        let mut b = RandomPieces::with_seed(1234);
        let a: Vec<_> = (0..200).map(|_| a.next_kind()).collect();
        let b: Vec<_> = (0..200).map(|_| b.next_kind()).collect();
        assert_eq!(a, b);
        assert!(PieceKind::ALL.iter().all(|kind| a.contains(kind)));
    }
}
