use std::time::Duration;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{GameSnapshot, GameState, MoveOutcome, RandomShapes, SessionConfig, ShapeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// A player command. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum InputSignal {
    Left,
    Right,
    Down,
    RotateClockwise,
}

impl Distribution<InputSignal> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> InputSignal {
        InputSignal::ALL[rng.random_range(0..InputSignal::ALL.len())]
    }
}

impl InputSignal {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Down, Self::RotateClockwise];
}

/// Anything a session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SessionEvent {
    /// Gravity timer fired.
    Tick,
    Input(InputSignal),
}

/// Drives one game through its `Playing` and `GameOver` states.
///
/// The session owns its [`GameState`] and reacts to one event at a time. It
/// spawns the first piece on creation; once the game is over every event is
/// ignored and [`tick_interval`](Self::tick_interval) returns `None` so the
/// frontend can stop its timer.
#[derive(Debug, Clone)]
pub struct GameSession<S = RandomShapes> {
    state: GameState<S>,
    session_state: SessionState,
    config: SessionConfig,
    ticks: u64,
}

impl GameSession<RandomShapes> {
    /// Creates a session with random shapes, seeded from `config.seed` when set.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let shapes = config
            .seed
            .map_or_else(RandomShapes::new, RandomShapes::seeded);
        Self::with_shapes(config, shapes)
    }

    /// Seed of the shape generator, for reproducing this game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.state.shapes().seed()
    }
}

impl<S> GameSession<S>
where
    S: ShapeSource,
{
    #[must_use]
    pub fn with_shapes(config: SessionConfig, shapes: S) -> Self {
        Self::with_state(GameState::new(shapes), config)
    }

    /// Wraps an existing state, spawning a piece if it has none.
    ///
    /// If that spawn fails, or the state is already over, the session starts
    /// in [`SessionState::GameOver`].
    #[must_use]
    pub fn with_state(state: GameState<S>, config: SessionConfig) -> Self {
        let mut session = Self {
            state,
            session_state: SessionState::Playing,
            config,
            ticks: 0,
        };
        if session.state.piece().is_none() {
            // a failed spawn is reflected in the game-over flag
            let _ = session.state.spawn_piece();
        }
        session.sync_session_state();
        session
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState<S> {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of gravity ticks processed so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Game time elapsed, measured in processed ticks.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms.saturating_mul(self.ticks))
    }

    /// Interval until the next gravity tick, or `None` once the game is over.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        match self.session_state {
            SessionState::Playing => Some(self.config.tick_interval()),
            SessionState::GameOver => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_state(&self.state, self.ticks)
    }

    /// Reacts to a gravity tick by moving the piece down one row.
    pub fn handle_tick(&mut self) -> MoveOutcome {
        if self.session_state.is_game_over() {
            return MoveOutcome::Ignored;
        }
        self.ticks += 1;
        let outcome = self.state.move_down();
        self.sync_session_state();
        outcome
    }

    pub fn handle_input(&mut self, signal: InputSignal) -> MoveOutcome {
        if self.session_state.is_game_over() {
            return MoveOutcome::Ignored;
        }
        let outcome = match signal {
            InputSignal::Left => self.state.move_left(),
            InputSignal::Right => self.state.move_right(),
            InputSignal::Down => self.state.move_down(),
            InputSignal::RotateClockwise => self.state.rotate(),
        };
        self.sync_session_state();
        outcome
    }

    pub fn handle_event(&mut self, event: SessionEvent) -> MoveOutcome {
        match event {
            SessionEvent::Tick => self.handle_tick(),
            SessionEvent::Input(signal) => self.handle_input(signal),
        }
    }

    fn sync_session_state(&mut self) {
        if self.session_state.is_playing() && self.state.is_game_over() {
            tracing::info!(
                score = self.state.stats().score(),
                merged_pieces = self.state.stats().merged_pieces(),
                ticks = self.ticks,
                "session over"
            );
            self.session_state = SessionState::GameOver;
        }
    }
}
