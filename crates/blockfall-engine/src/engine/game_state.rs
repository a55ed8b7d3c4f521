use crate::{
    SpawnCollisionError,
    core::{Board, Piece, Position},
};

use super::{GameStats, RandomShapes, ShapeSource, piece_spawner};

/// What a single movement or rotation request did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The piece moved or rotated.
    Moved,
    /// The candidate collided; nothing changed.
    Blocked,
    /// The piece could not move down and was merged into the board; the next
    /// piece has been spawned.
    Merged,
    /// The piece was merged but the next piece collided at its spawn position.
    /// The game is over.
    ToppedOut,
    /// There was no active piece, or the game was already over.
    Ignored,
}

/// The complete state of one game: board, falling piece, statistics and the
/// game-over flag.
///
/// Every movement builds a candidate placement, checks it against the board
/// and commits it only when it is collision-free. Once the game is over the
/// state is frozen and every operation returns [`MoveOutcome::Ignored`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameState, MoveOutcome, Position, ShapeKind, ShapeSequence};
///
/// let mut state = GameState::new(ShapeSequence::new([ShapeKind::I]));
/// assert!(state.piece().is_none());
///
/// state.spawn_piece().unwrap();
/// assert_eq!(state.position(), Position::new(3, 0));
///
/// assert_eq!(state.move_left(), MoveOutcome::Moved);
/// assert_eq!(state.position(), Position::new(2, 0));
/// ```
#[derive(Debug, Clone)]
pub struct GameState<S = RandomShapes> {
    board: Board,
    piece: Option<Piece>,
    position: Position,
    stats: GameStats,
    game_over: bool,
    shapes: S,
}

impl<S> GameState<S>
where
    S: ShapeSource,
{
    /// Creates a state with an empty board and no active piece.
    #[must_use]
    pub fn new(shapes: S) -> Self {
        Self::with_board(Board::EMPTY, shapes)
    }

    /// Creates a state over an existing board, with no active piece.
    #[must_use]
    pub fn with_board(board: Board, shapes: S) -> Self {
        Self {
            board,
            piece: None,
            position: Position::default(),
            stats: GameStats::new(),
            game_over: false,
            shapes,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece, if any.
    ///
    /// There is no piece before the first spawn and after a failed spawn.
    #[must_use]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn shapes(&self) -> &S {
        &self.shapes
    }

    /// Draws the next shape and installs it at its spawn position.
    ///
    /// On collision the game is over and no piece is installed. Does nothing
    /// once the game is over.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnCollisionError`] if the new piece collides at its spawn
    /// position.
    pub fn spawn_piece(&mut self) -> Result<(), SpawnCollisionError> {
        if self.game_over {
            return Ok(());
        }
        match piece_spawner::spawn_piece(&self.board, &mut self.shapes) {
            Ok((piece, position)) => {
                tracing::debug!(kind = %piece.kind().as_char(), x = position.x, "piece spawned");
                self.piece = Some(piece);
                self.position = position;
                Ok(())
            }
            Err(err) => {
                tracing::info!(score = self.stats.score(), %err, "game over");
                self.piece = None;
                self.game_over = true;
                Err(err)
            }
        }
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.shift(self.position.left())
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.shift(self.position.right())
    }

    /// Moves the piece down one row, merging it into the board if it cannot.
    pub fn move_down(&mut self) -> MoveOutcome {
        let Some(piece) = self.active_piece() else {
            return MoveOutcome::Ignored;
        };
        let candidate = self.position.down();
        if self.board.is_colliding(piece.shape(), candidate) {
            return self.merge_and_spawn(piece);
        }
        self.position = candidate;
        MoveOutcome::Moved
    }

    /// Rotates the piece a quarter turn clockwise in place.
    ///
    /// There is no wall kick: a rotation that would collide is rejected.
    pub fn rotate(&mut self) -> MoveOutcome {
        let Some(piece) = self.active_piece() else {
            return MoveOutcome::Ignored;
        };
        let rotated = piece.rotated_clockwise();
        if self.board.is_colliding(rotated.shape(), self.position) {
            tracing::trace!(position = ?self.position, "rotation blocked");
            return MoveOutcome::Blocked;
        }
        self.piece = Some(rotated);
        MoveOutcome::Moved
    }

    fn active_piece(&self) -> Option<Piece> {
        if self.game_over { None } else { self.piece }
    }

    fn shift(&mut self, candidate: Position) -> MoveOutcome {
        let Some(piece) = self.active_piece() else {
            return MoveOutcome::Ignored;
        };
        if self.board.is_colliding(piece.shape(), candidate) {
            tracing::trace!(position = ?candidate, "move blocked");
            return MoveOutcome::Blocked;
        }
        self.position = candidate;
        MoveOutcome::Moved
    }

    fn merge_and_spawn(&mut self, piece: Piece) -> MoveOutcome {
        debug_assert!(
            !self.board.is_colliding(piece.shape(), self.position),
            "merging piece overlaps the board"
        );
        self.piece = None;
        self.board.fill_shape(piece.shape(), self.position, piece.color());
        self.stats.record_merge();
        tracing::debug!(
            kind = %piece.kind().as_char(),
            x = self.position.x,
            y = self.position.y,
            score = self.stats.score(),
            "piece merged"
        );
        match self.spawn_piece() {
            Ok(()) => MoveOutcome::Merged,
            Err(_) => MoveOutcome::ToppedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{
        core::{Cell, ColorId, ShapeKind},
        engine::{MERGE_SCORE, ShapeSequence},
    };

    fn state_of(kinds: &[ShapeKind]) -> GameState<ShapeSequence> {
        let mut state = GameState::new(ShapeSequence::new(kinds.iter().copied()));
        state.spawn_piece().unwrap();
        state
    }

    fn drop_until_merged(state: &mut GameState<ShapeSequence>) -> MoveOutcome {
        loop {
            match state.move_down() {
                MoveOutcome::Moved => {}
                outcome => return outcome,
            }
        }
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(ShapeSequence::new([ShapeKind::O]));
        assert_eq!(*state.board(), Board::EMPTY);
        assert!(state.piece().is_none());
        assert_eq!(state.stats().score(), 0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_moves_without_piece_are_ignored() {
        let mut state = GameState::new(ShapeSequence::new([ShapeKind::O]));
        assert!(state.move_left().is_ignored());
        assert!(state.move_right().is_ignored());
        assert!(state.move_down().is_ignored());
        assert!(state.rotate().is_ignored());
        assert_eq!(*state.board(), Board::EMPTY);
    }

    #[test]
    fn test_o_piece_falls_and_merges() {
        let mut state = state_of(&[ShapeKind::O]);
        assert_eq!(state.position(), Position::new(4, 0));

        for y in 1..=18 {
            assert_eq!(state.move_down(), MoveOutcome::Moved);
            assert_eq!(state.position(), Position::new(4, y));
        }
        assert_eq!(state.move_down(), MoveOutcome::Merged);

        let color = ColorId::new(2).map(Cell::Filled);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(state.board().cell(x, y), color, "cell ({x}, {y})");
        }
        assert_eq!(state.board().filled_count(), 4);
        assert_eq!(state.stats().score(), 10);
        assert_eq!(state.stats().merged_pieces(), 1);

        // the next piece spawns at the top
        assert_eq!(state.piece().map(Piece::kind), Some(ShapeKind::O));
        assert_eq!(state.position(), Position::new(4, 0));
    }

    #[test]
    fn test_spawn_into_occupied_top_is_game_over() {
        let mut rows = vec![".........."; 20];
        rows[0] = ".....3....";
        let board: Board = rows.join("\n").parse().unwrap();

        let mut state = GameState::with_board(board.clone(), ShapeSequence::new([ShapeKind::O]));
        let err = state.spawn_piece().unwrap_err();
        assert_eq!(err.kind(), ShapeKind::O);
        assert!(state.is_game_over());
        assert!(state.piece().is_none());
        assert_eq!(state.stats().score(), 0);
        assert_eq!(*state.board(), board);
    }

    #[test]
    fn test_move_left_at_wall_is_noop() {
        let mut state = state_of(&[ShapeKind::I]);
        for _ in 0..3 {
            assert_eq!(state.move_left(), MoveOutcome::Moved);
        }
        assert_eq!(state.position(), Position::new(0, 0));

        assert_eq!(state.move_left(), MoveOutcome::Blocked);
        assert_eq!(state.position(), Position::new(0, 0));
        assert_eq!(*state.board(), Board::EMPTY);
    }

    #[test]
    fn test_move_right_at_wall_is_noop() {
        let mut state = state_of(&[ShapeKind::O]);
        for _ in 0..4 {
            assert_eq!(state.move_right(), MoveOutcome::Moved);
        }
        assert_eq!(state.position(), Position::new(8, 0));
        assert_eq!(state.move_right(), MoveOutcome::Blocked);
        assert_eq!(state.position(), Position::new(8, 0));
    }

    #[test]
    fn test_move_blocked_by_filled_cell() {
        let mut rows = vec![".........."; 20];
        rows[1] = "...4......";
        let board: Board = rows.join("\n").parse().unwrap();

        let mut state = GameState::with_board(board, ShapeSequence::new([ShapeKind::O]));
        state.spawn_piece().unwrap();
        assert_eq!(state.move_left(), MoveOutcome::Blocked);
        assert_eq!(state.position(), Position::new(4, 0));
    }

    #[test]
    fn test_rotate_keeps_position() {
        let mut state = state_of(&[ShapeKind::T]);
        let before = state.position();
        assert_eq!(state.rotate(), MoveOutcome::Moved);
        assert_eq!(state.position(), before);

        let piece = state.piece().unwrap();
        assert_eq!(piece.kind(), ShapeKind::T);
        assert_eq!(*piece.shape(), ShapeKind::T.shape().rotated_clockwise());
    }

    #[test]
    fn test_rotate_has_no_wall_kick() {
        let mut state = state_of(&[ShapeKind::I]);
        assert_eq!(state.rotate(), MoveOutcome::Moved);
        while state.move_right().is_moved() {}
        assert_eq!(state.position(), Position::new(9, 0));

        let vertical = *state.piece().unwrap();
        assert_eq!(state.rotate(), MoveOutcome::Blocked);
        assert_eq!(*state.piece().unwrap(), vertical);
        assert_eq!(state.position(), Position::new(9, 0));
    }

    #[test]
    fn test_merge_conserves_cells() {
        let mut state = state_of(&[ShapeKind::O, ShapeKind::I, ShapeKind::T, ShapeKind::S]);
        for merged in 1..=4 {
            let before = state.board().filled_count();
            assert_eq!(drop_until_merged(&mut state), MoveOutcome::Merged);
            assert_eq!(state.board().filled_count(), before + 4);
            assert_eq!(state.stats().merged_pieces(), merged);
            assert_eq!(state.stats().score(), merged * 10);
        }
    }

    #[test]
    fn test_stacking_tops_out() {
        let mut state = state_of(&[ShapeKind::O]);
        for _ in 0..9 {
            assert_eq!(drop_until_merged(&mut state), MoveOutcome::Merged);
        }
        assert_eq!(drop_until_merged(&mut state), MoveOutcome::ToppedOut);
        assert!(state.is_game_over());
        assert!(state.piece().is_none());
        assert_eq!(state.stats().score(), 100);
        assert_eq!(state.board().filled_count(), 40);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = state_of(&[ShapeKind::O]);
        while !drop_until_merged(&mut state).is_topped_out() {}

        let final_board = state.board().clone();
        let final_stats = state.stats().clone();
        assert!(state.move_left().is_ignored());
        assert!(state.move_right().is_ignored());
        assert!(state.move_down().is_ignored());
        assert!(state.rotate().is_ignored());
        assert!(state.spawn_piece().is_ok());
        assert!(state.piece().is_none());
        assert!(state.is_game_over());
        assert_eq!(*state.board(), final_board);
        assert_eq!(*state.stats(), final_stats);
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        for seed in 0..50 {
            let mut state = GameState::new(RandomShapes::seeded(seed));
            state.spawn_piece().unwrap();
            let mut moves = Pcg32::seed_from_u64(seed);

            for step in 0..2_000 {
                if state.is_game_over() {
                    break;
                }
                let board = state.board().clone();
                let score = state.stats().score();

                let outcome = match moves.random_range(0..4) {
                    0 => state.move_left(),
                    1 => state.move_right(),
                    2 => state.move_down(),
                    _ => state.rotate(),
                };

                // settled cells never change
                let cells = iter::zip(board.rows().flatten(), state.board().rows().flatten());
                for (before, after) in cells {
                    if before.is_filled() {
                        assert_eq!(after, before, "seed {seed}, step {step}");
                    }
                }

                let merged = outcome.is_merged() || outcome.is_topped_out();
                let (gained, new_cells) = if merged { (MERGE_SCORE, 4) } else { (0, 0) };
                assert_eq!(state.stats().score(), score + gained, "seed {seed}, step {step}");
                assert_eq!(
                    state.board().filled_count(),
                    board.filled_count() + new_cells,
                    "seed {seed}, step {step}"
                );

                if let Some(piece) = state.piece() {
                    for (x, y) in state.position().absolute_cells(piece.shape()) {
                        assert_eq!(
                            state.board().cell(x, y),
                            Some(Cell::Empty),
                            "seed {seed}, step {step}: piece cell ({x}, {y})"
                        );
                    }
                }
            }
        }
    }
}
