//! Game engine logic and state management.
//!
//! This module builds the gameplay on top of the core data structures:
//!
//! - [`GameState`] - Board, falling piece, position, score and game-over flag
//! - [`GameStats`] - Score and merged-piece count
//! - [`ShapeSource`] - Where the next shape comes from ([`RandomShapes`], [`ShapeSequence`])
//! - [`GameSession`] - `Playing`/`GameOver` driver reacting to ticks and input
//! - [`EventQueue`] - Input and tick queues feeding a session one event at a time
//! - [`GameSnapshot`] - Read-only view handed to the presentation layer
//! - [`SessionConfig`] - Gravity interval and seed
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; it spawns the first piece
//! 2. Each gravity tick moves the piece down one row
//! 3. Input signals shift or rotate the piece when the result is collision-free
//! 4. A piece that cannot move down is merged into the board, scoring 10 points
//! 5. The next piece spawns; if it collides immediately, the game is over
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, InputSignal, SessionConfig, ShapeKind, ShapeSequence};
//!
//! let mut session = GameSession::with_shapes(
//!     SessionConfig::default(),
//!     ShapeSequence::new([ShapeKind::O]),
//! );
//!
//! session.handle_input(InputSignal::Left);
//! while session.snapshot().score == 0 {
//!     session.handle_tick();
//! }
//!
//! assert_eq!(session.snapshot().merged_pieces, 1);
//! assert!(session.session_state().is_playing());
//! ```

pub use self::{
    event_queue::*, game_session::*, game_state::*, game_stats::*, piece_spawner::*,
    session_config::*, snapshot::*,
};

mod event_queue;
mod game_session;
mod game_state;
mod game_stats;
mod piece_spawner;
mod session_config;
mod snapshot;
