use serde::{Deserialize, Serialize};

/// Points awarded for every piece merged into the board.
pub const MERGE_SCORE: usize = 10;

/// Game statistics tracking score and merged pieces.
///
/// Scoring is flat: every merged piece is worth [`MERGE_SCORE`] points and
/// nothing else changes the score.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_merge();
/// stats.record_merge();
///
/// assert_eq!(stats.score(), 20);
/// assert_eq!(stats.merged_pieces(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    merged_pieces: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            merged_pieces: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces merged into the board.
    #[must_use]
    pub const fn merged_pieces(&self) -> usize {
        self.merged_pieces
    }

    /// Updates statistics after a piece has been merged.
    pub const fn record_merge(&mut self) {
        self.merged_pieces += 1;
        self.score += MERGE_SCORE;
    }
}
