use serde::{Deserialize, Serialize};

use crate::core::{Board, ColorId, Piece, Position};

use super::{GameState, ShapeSource};

/// A read-only copy of everything a frontend needs to draw one frame.
///
/// Taken after every reaction; later changes to the session do not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameSnapshot {
    /// Merged cells only; the falling piece is not stamped in.
    pub board: Board,
    pub piece: Option<Piece>,
    pub color: Option<ColorId>,
    pub position: Position,
    pub score: usize,
    pub merged_pieces: usize,
    pub ticks: u64,
    pub game_over: bool,
}

impl GameSnapshot {
    #[must_use]
    pub fn from_state<S>(state: &GameState<S>, ticks: u64) -> Self
    where
        S: ShapeSource,
    {
        let piece = state.piece().copied();
        Self {
            board: state.board().clone(),
            piece,
            color: piece.as_ref().map(Piece::color),
            position: state.position(),
            score: state.stats().score(),
            merged_pieces: state.stats().merged_pieces(),
            ticks,
            game_over: state.is_game_over(),
        }
    }

    /// Returns the board with the falling piece drawn in at its position.
    ///
    /// ```
    /// use blockfall_engine::{GameSession, SessionConfig, ShapeKind, ShapeSequence};
    ///
    /// let session = GameSession::with_shapes(
    ///     SessionConfig::default(),
    ///     ShapeSequence::new([ShapeKind::O]),
    /// );
    /// let snapshot = session.snapshot();
    ///
    /// assert_eq!(snapshot.board.filled_count(), 0);
    /// assert_eq!(snapshot.render_board().filled_count(), 4);
    /// ```
    #[must_use]
    pub fn render_board(&self) -> Board {
        match self.piece {
            Some(piece) => self.board.with_piece(piece, self.position),
            None => self.board.clone(),
        }
    }
}
