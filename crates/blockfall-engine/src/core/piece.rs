use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    BOARD_WIDTH,
    shape::{ColorId, MAX_SHAPE_SIZE, Shape, ShapeKind},
};

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const BOARD_CENTER_X: i32 = (BOARD_WIDTH / 2) as i32;

/// The falling piece: a catalog kind plus its current (possibly rotated) mask.
///
/// Pieces are immutable; rotation returns a new `Piece`. The kind, and with it
/// the color, never changes over the piece's lifetime.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, ShapeKind};
///
/// let piece = Piece::new(ShapeKind::I);
/// let rotated = piece.rotated_clockwise();
///
/// assert_eq!(rotated.kind(), ShapeKind::I);
/// assert_eq!(rotated.shape().height(), 4);
/// assert_eq!(rotated.color(), piece.color());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: ShapeKind,
    shape: Shape,
}

impl Piece {
    /// Creates a piece of `kind` in its catalog orientation.
    #[must_use]
    pub const fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
        }
    }

    /// Creates a piece of `kind` with `shape` as its current mask.
    ///
    /// Returns `None` unless `shape` is one of the four rotations of the
    /// kind's catalog shape.
    #[must_use]
    pub fn with_shape(kind: ShapeKind, shape: Shape) -> Option<Self> {
        let mut piece = Self::new(kind);
        for _ in 0..4 {
            if piece.shape == shape {
                return Some(piece);
            }
            piece = piece.rotated_clockwise();
        }
        None
    }

    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> ColorId {
        self.kind.color_id()
    }

    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.rotated_clockwise(),
        }
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawPiece {
            kind: ShapeKind,
            shape: Shape,
        }

        let RawPiece { kind, shape } = RawPiece::deserialize(deserializer)?;
        Self::with_shape(kind, shape).ok_or_else(|| {
            serde::de::Error::custom(format_args!(
                "shape is not a rotation of {}",
                kind.as_char()
            ))
        })
    }
}

/// Offset of a piece's mask origin within the board.
///
/// Coordinates are signed so that candidate positions past the left or top
/// edge can be represented and rejected by collision detection.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns)
/// - Y increases downward (rows)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Spawn position for `shape`: top row, horizontally centered, rounding down.
    ///
    /// ```
    /// use blockfall_engine::{Position, ShapeKind};
    ///
    /// assert_eq!(Position::spawn_for(&ShapeKind::O.shape()), Position::new(4, 0));
    /// assert_eq!(Position::spawn_for(&ShapeKind::I.shape()), Position::new(3, 0));
    /// assert_eq!(Position::spawn_for(&ShapeKind::T.shape()), Position::new(4, 0));
    /// ```
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn spawn_for(shape: &Shape) -> Self {
        Self::new(BOARD_CENTER_X - (shape.width() / 2) as i32, 0)
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    /// Absolute board coordinates of the occupied cells of `shape` placed here.
    #[must_use]
    pub fn absolute_cells(
        self,
        shape: &Shape,
    ) -> ArrayVec<(i32, i32), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }> {
        shape
            .occupied_cells()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}
