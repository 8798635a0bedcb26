use std::{io, time::Duration};

use anyhow::Context as _;
use blockfall_engine::{Board, GameConfig, GameLoop, GameSession, SessionOutcome};
use serde::Serialize;
use tracing::info;

use crate::ui::{KeyInput, TerminalRenderer};

#[expect(clippy::cast_possible_truncation)]
const fn duration_millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Board width in cells
    #[clap(long, default_value_t = Board::DEFAULT_WIDTH)]
    width: usize,
    /// Board height in cells
    #[clap(long, default_value_t = Board::DEFAULT_HEIGHT)]
    height: usize,
    /// Milliseconds between two gravity steps
    #[clap(long, default_value_t = duration_millis(GameConfig::DEFAULT_TICK_INTERVAL))]
    tick_ms: u64,
    /// Longest wait in milliseconds between two input polls
    #[clap(long, default_value_t = duration_millis(GameConfig::DEFAULT_POLL_INTERVAL))]
    poll_ms: u64,
    /// Starting level (score multiplier)
    #[clap(long, default_value_t = 1)]
    level: usize,
    /// Seed for the piece generator
    #[clap(long)]
    seed: Option<u64>,
    /// Shorten the gravity interval as the level rises
    #[clap(long, default_value_t = false)]
    accelerate: bool,
    /// Print the session outcome as JSON
    #[clap(long, default_value_t = false)]
    json: bool,
    /// Exit as soon as the game is over instead of waiting for a key
    #[clap(long, default_value_t = false)]
    no_wait: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            width: config.width,
            height: config.height,
            tick_ms: duration_millis(config.tick_interval),
            poll_ms: duration_millis(config.poll_interval),
            level: config.starting_level,
            seed: config.seed,
            accelerate: config.accelerate,
            json: false,
            no_wait: false,
        }
    }
}

impl PlayArg {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            tick_interval: Duration::from_millis(self.tick_ms),
            poll_interval: Duration::from_millis(self.poll_ms),
            starting_level: self.level,
            seed: self.seed,
            accelerate: self.accelerate,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.config();
    let mut session = GameSession::new(&config).context("Invalid game configuration")?;
    let mut game_loop = GameLoop::new(&config);
    let mut input = KeyInput::new();

    let outcome = ratatui::run(|terminal| -> io::Result<SessionOutcome> {
        let mut renderer = TerminalRenderer::new(terminal);
        let outcome = game_loop.run(&mut session, &mut input, &mut renderer, |outcome| {
            info!(
                score = outcome.score,
                lines_cleared = outcome.lines_cleared,
                pieces_locked = outcome.pieces_locked,
                reason = ?outcome.reason,
                "session ended"
            );
        })?;
        if outcome.reason.is_topped_out() && !arg.no_wait {
            input.wait_for_key()?;
        }
        Ok(outcome)
    })
    .context("Terminal I/O failed")?;

    print_report(&outcome, arg.json)
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    outcome: &'a SessionOutcome,
    won: bool,
    experience: usize,
}

fn print_report(outcome: &SessionOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        let report = Report {
            outcome,
            won: outcome.is_won(),
            experience: outcome.experience(),
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize outcome")?;
        println!("{json}");
        return Ok(());
    }

    println!("Game over! Final score: {}", outcome.score);
    println!(
        "Lines cleared: {}, pieces locked: {}",
        outcome.lines_cleared, outcome.pieces_locked
    );
    if outcome.is_won() {
        println!("Earned {} XP", outcome.experience());
    }
    Ok(())
}
