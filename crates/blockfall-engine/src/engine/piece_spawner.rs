use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    SpawnCollisionError,
    core::{Board, Piece, Position, ShapeKind},
};

/// Supplies the kind of each newly spawned piece.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<S> ShapeSource for Box<S>
where
    S: ShapeSource + ?Sized,
{
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}

/// Picks each shape uniformly at random from the catalog.
///
/// The generator is seeded explicitly so that a game can be replayed from
/// its [`seed`](Self::seed).
#[derive(Debug, Clone)]
pub struct RandomShapes {
    rng: Pcg32,
    seed: u64,
}

impl Default for RandomShapes {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomShapes {
    /// Creates a source seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::seeded(rand::rng().random())
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ShapeSource for RandomShapes {
    fn next_shape(&mut self) -> ShapeKind {
        self.rng.random()
    }
}

/// Cycles through a fixed list of shapes.
///
/// Used for reproducible games and scripted scenarios.
#[derive(Debug, Clone)]
pub struct ShapeSequence {
    kinds: Vec<ShapeKind>,
    next: usize,
}

impl ShapeSequence {
    /// Creates a sequence that yields `kinds` in order, then starts over.
    ///
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn new<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ShapeKind>,
    {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "shape sequence must not be empty");
        Self { kinds, next: 0 }
    }
}

impl ShapeSource for ShapeSequence {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

/// Draws the next shape and places it at its spawn position.
///
/// The spawn position is the top row, horizontally centered (see
/// [`Position::spawn_for`]). If the piece collides there, the shape is
/// discarded and [`SpawnCollisionError`] is returned.
pub fn spawn_piece<S>(
    board: &Board,
    shapes: &mut S,
) -> Result<(Piece, Position), SpawnCollisionError>
where
    S: ShapeSource + ?Sized,
{
    let kind = shapes.next_shape();
    let piece = Piece::new(kind);
    let position = Position::spawn_for(piece.shape());
    if board.is_colliding(piece.shape(), position) {
        return Err(SpawnCollisionError::new(kind));
    }
    Ok((piece, position))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RandomShapes::seeded(42);
        let mut b = RandomShapes::seeded(42);
        let first: Vec<_> = (0..50).map(|_| a.next_shape()).collect();
        let second: Vec<_> = (0..50).map(|_| b.next_shape()).collect();
        assert_eq!(first, second);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_random_source_covers_catalog() {
        let mut source = RandomShapes::seeded(7);
        let seen: HashSet<_> = (0..1000).map(|_| source.next_shape()).collect();
        assert_eq!(seen.len(), ShapeKind::LEN);
    }

    #[test]
    fn test_sequence_cycles() {
        let mut source = ShapeSequence::new([ShapeKind::I, ShapeKind::O]);
        let drawn: Vec<_> = (0..5).map(|_| source.next_shape()).collect();
        assert_eq!(
            drawn,
            [
                ShapeKind::I,
                ShapeKind::O,
                ShapeKind::I,
                ShapeKind::O,
                ShapeKind::I
            ]
        );
    }

    #[test]
    #[should_panic(expected = "shape sequence must not be empty")]
    fn test_empty_sequence_panics() {
        let _ = ShapeSequence::new([]);
    }

    #[test]
    fn test_boxed_source() {
        let mut source: Box<dyn ShapeSource> = Box::new(ShapeSequence::new([ShapeKind::Z]));
        assert_eq!(source.next_shape(), ShapeKind::Z);
    }

    #[test]
    fn test_spawn_on_empty_board() {
        let mut source = ShapeSequence::new([ShapeKind::O]);
        let (piece, position) = spawn_piece(&Board::EMPTY, &mut source).unwrap();
        assert_eq!(piece.kind(), ShapeKind::O);
        assert_eq!(usize::from(piece.color().get()), ShapeKind::O.index() + 1);
        assert_eq!(position, Position::new(4, 0));
    }

    #[test]
    fn test_spawn_collision() {
        let mut rows = vec![".........."; 20];
        rows[0] = "....1.....";
        let board: Board = rows.join("\n").parse().unwrap();

        let mut source = ShapeSequence::new([ShapeKind::O]);
        let err = spawn_piece(&board, &mut source).unwrap_err();
        assert_eq!(err.kind(), ShapeKind::O);
        assert_eq!(err.to_string(), "O piece collides at its spawn position");
    }

    #[test]
    fn test_spawn_fits_beside_blocked_cell() {
        // I spawns at x=3..=6; a block at column 7 of the top row is not in the way
        let mut rows = vec![".........."; 20];
        rows[0] = ".......1..";
        let board: Board = rows.join("\n").parse().unwrap();

        let mut source = ShapeSequence::new([ShapeKind::I]);
        let (_, position) = spawn_piece(&board, &mut source).unwrap();
        assert_eq!(position, Position::new(3, 0));
    }
}
