use std::time::Duration;

use crate::{Board, ConfigError};

/// Parameters of a game session and its loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Time between two gravity steps.
    pub tick_interval: Duration,
    /// Longest time the loop sleeps before polling input again.
    ///
    /// This bounds input latency independently of the tick interval.
    pub poll_interval: Duration,
    /// Scoring multiplier the session starts with.
    pub starting_level: usize,
    /// Seed for the piece generator. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Shortens the tick interval as the level rises.
    ///
    /// Off by default: the classic behavior keeps a constant tick.
    pub accelerate: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: Board::DEFAULT_WIDTH,
            height: Board::DEFAULT_HEIGHT,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            starting_level: 1,
            seed: None,
            accelerate: false,
        }
    }
}

impl GameConfig {
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(16);

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.starting_level == 0 {
            return Err(ConfigError::ZeroLevel);
        }
        Board::new(self.width, self.height)?;
        Ok(())
    }

    /// Returns the gravity interval for `level`.
    ///
    /// Without acceleration this is always [`GameConfig::tick_interval`].
    /// With acceleration the interval is `100 + max(0, 900 - 100 × level)`
    /// milliseconds, never longer than the configured interval.
    #[must_use]
    pub fn tick_interval_for_level(&self, level: usize) -> Duration {
        if !self.accelerate {
            return self.tick_interval;
        }
        let millis = 100 + 900_usize.saturating_sub(level.saturating_mul(100));
        let millis = u64::try_from(millis).unwrap_or(u64::MAX);
        Duration::from_millis(millis).min(self.tick_interval)
    }
}
