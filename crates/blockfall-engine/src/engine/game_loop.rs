use std::{
    io, thread,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{Action, GameConfig, GameSession, SessionOutcome, SessionView};

/// Non-blocking source of player actions.
pub trait ActionSource {
    /// Returns the next pending action, or `None` when nothing is pending.
    ///
    /// Must return immediately. Input that does not decode to an action is
    /// skipped.
    fn poll_action(&mut self) -> io::Result<Option<Action>>;
}

/// Draws a session frame.
pub trait Renderer {
    fn render(&mut self, view: &SessionView<'_>) -> io::Result<()>;
}

/// Time source used to schedule gravity ticks.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Drives a [`GameSession`] in real time.
///
/// Each iteration of the loop:
///
/// 1. polls at most one action without blocking and applies it
/// 2. runs a gravity tick if the tick interval has elapsed
/// 3. renders the session
/// 4. sleeps until the next tick, but never longer than the poll interval
///
/// Gravity and input have separate timers, so input latency is bounded by
/// the poll interval rather than the tick interval. When an action was
/// applied the loop skips the sleep so queued keys drain quickly.
///
/// # Example
///
/// ```
/// use std::io;
///
/// use blockfall_engine::{
///     Action, ActionSource, GameConfig, GameLoop, GameSession, Renderer, SessionView,
/// };
///
/// struct QuitImmediately;
///
/// impl ActionSource for QuitImmediately {
///     fn poll_action(&mut self) -> io::Result<Option<Action>> {
///         Ok(Some(Action::Quit))
///     }
/// }
///
/// struct NoRender;
///
/// impl Renderer for NoRender {
///     fn render(&mut self, _view: &SessionView<'_>) -> io::Result<()> {
///         Ok(())
///     }
/// }
///
/// let config = GameConfig::default();
/// let mut session = GameSession::new(&config)?;
/// let mut game_loop = GameLoop::new(&config);
/// let outcome = game_loop.run(&mut session, &mut QuitImmediately, &mut NoRender, |outcome| {
///     assert_eq!(outcome.pieces_locked, 0);
/// })?;
/// assert!(outcome.reason.is_quit());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameLoop<C = SystemClock> {
    config: GameConfig,
    clock: C,
}

impl GameLoop<SystemClock> {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C> GameLoop<C>
where
    C: Clock,
{
    #[must_use]
    pub fn with_clock(config: &GameConfig, clock: C) -> Self {
        Self {
            config: config.clone(),
            clock,
        }
    }

    /// Runs the session until it is over.
    ///
    /// `on_end` is called with the final outcome, which is also returned. A
    /// session reports its outcome only once: running an already reported
    /// session again returns the outcome without calling `on_end`. Errors
    /// from the input source or the renderer abort the loop and skip
    /// `on_end`.
    pub fn run<I, R, F>(
        &mut self,
        session: &mut GameSession,
        input: &mut I,
        renderer: &mut R,
        on_end: F,
    ) -> io::Result<SessionOutcome>
    where
        I: ActionSource + ?Sized,
        R: Renderer + ?Sized,
        F: FnOnce(&SessionOutcome),
    {
        let mut next_tick = self.clock.now() + self.tick_interval(session);

        let outcome = loop {
            let action = if session.is_game_over() {
                None
            } else {
                input.poll_action()?
            };
            if let Some(action) = action {
                debug!(?action, "applying action");
                session.apply(action);
            }

            let now = self.clock.now();
            if !session.is_game_over() && now >= next_tick {
                session.tick();
                next_tick = now + self.tick_interval(session);
            }

            renderer.render(&session.view())?;

            if let Some(outcome) = session.outcome() {
                break outcome;
            }

            if action.is_none() {
                let wait = next_tick
                    .saturating_duration_since(self.clock.now())
                    .min(self.config.poll_interval);
                self.clock.sleep(wait);
            }
        };

        if session.mark_outcome_reported() {
            on_end(&outcome);
        }
        Ok(outcome)
    }

    fn tick_interval(&self, session: &GameSession) -> Duration {
        self.config.tick_interval_for_level(session.stats().level())
    }
}
