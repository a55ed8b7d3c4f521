pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Raised when a newly selected shape cannot be placed at its spawn position.
///
/// This is the engine's only domain failure; the session turns it into the
/// terminal game-over state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{} piece collides at its spawn position", kind.as_char())]
pub struct SpawnCollisionError {
    kind: ShapeKind,
}

impl SpawnCollisionError {
    pub(crate) fn new(kind: ShapeKind) -> Self {
        Self { kind }
    }

    /// Kind of the shape that could not be placed.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("tick interval must be greater than zero")]
    ZeroTickInterval,
}
