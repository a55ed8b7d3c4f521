use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    collision,
    piece::{Piece, Position},
    shape::{ColorId, Shape},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Nothing settled here.
    #[default]
    Empty,
    /// Part of a merged piece, keeping that piece's color.
    Filled(ColorId),
}

impl Cell {
    /// Text form: `.` for empty, the color digit for filled cells.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(color) => (b'0' + color.get()) as char,
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::Empty);
        }
        let digit = c.to_digit(10)?;
        let color = ColorId::new(u8::try_from(digit).ok()?)?;
        Some(Cell::Filled(color))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected {BOARD_HEIGHT} rows, got {_0}")]
    RowCount(#[error(not(source))] usize),
    #[display("row {row} has {len} cells, expected {BOARD_WIDTH}")]
    RowWidth { row: usize, len: usize },
    #[display("invalid cell {ch:?} at ({x}, {y})")]
    InvalidCell { ch: char, x: usize, y: usize },
}

/// Fixed 10×20 grid of settled cells.
///
/// The board is created empty and only changes when a settled piece is
/// merged into it. Coordinates are `(x, y)` with `(0, 0)` at the top-left,
/// x growing right and y growing down.
///
/// # Text form
///
/// One line per row, `.` for empty cells and `1`-`7` for filled ones. The
/// same strings (one per row) are used for serialization.
///
/// ```
/// use blockfall_engine::{Board, Cell};
///
/// let mut rows = vec![".........."; 19];
/// rows.push("1111111111");
/// let board: Board = rows.join("\n").parse().unwrap();
///
/// assert!(board.cell(0, 19).is_some_and(|cell| cell.is_filled()));
/// assert_eq!(board.cell(0, 18), Some(Cell::Empty));
/// assert_eq!(board.cell(0, 20), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
    };

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows.iter()
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_filled()).count()
    }

    /// Tests `shape` at `position` against this board.
    ///
    /// See [`collides`](collision::collides).
    #[must_use]
    pub fn is_colliding(&self, shape: &Shape, position: Position) -> bool {
        collision::collides(shape, position, self)
    }

    /// Writes `color` into every cell covered by an occupied cell of `shape`.
    ///
    /// Cells outside the grid are skipped; committed positions never reach
    /// them.
    pub(crate) fn fill_shape(&mut self, shape: &Shape, position: Position, color: ColorId) {
        for (x, y) in position.absolute_cells(shape) {
            debug_assert!(
                self.cell(x, y).is_some_and(|cell| cell.is_empty()),
                "merging onto blocked cell ({x}, {y})"
            );
            if let Some(cell) = self.cell_mut(x, y) {
                *cell = Cell::Filled(color);
            }
        }
    }

    /// Stamps a piece at `position` into a copy of the board.
    ///
    /// Used to compose the falling piece over the settled cells for display.
    #[must_use]
    pub fn with_piece(&self, piece: Piece, position: Position) -> Self {
        let mut board = self.clone();
        for (x, y) in position.absolute_cells(piece.shape()) {
            if let Some(cell) = board.cell_mut(x, y) {
                *cell = Cell::Filled(piece.color());
            }
        }
        board
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get_mut(y)?.get_mut(x)
    }

    fn row_string(row: &[Cell; BOARD_WIDTH]) -> String {
        row.iter().map(|cell| cell.as_char()).collect()
    }

    fn from_row_strs<'a, I>(lines: I) -> Result<Self, ParseBoardError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut board = Self::EMPTY;
        let mut count = 0;
        for (y, line) in lines.into_iter().enumerate() {
            count += 1;
            let Some(row) = board.rows.get_mut(y) else {
                continue;
            };
            let len = line.chars().count();
            if len != BOARD_WIDTH {
                return Err(ParseBoardError::RowWidth { row: y, len });
            }
            for (x, (cell, ch)) in row.iter_mut().zip(line.chars()).enumerate() {
                *cell = Cell::from_char(ch).ok_or(ParseBoardError::InvalidCell { ch, x, y })?;
            }
        }
        if count != BOARD_HEIGHT {
            return Err(ParseBoardError::RowCount(count));
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            f.write_str(&Self::row_string(row))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_row_strs(s.trim().lines().map(str::trim))
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: ["..........", ..., "...11....."] (one string per row)
        let rows: Vec<String> = self.rows.iter().map(Self::row_string).collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Self::from_row_strs(rows.iter().map(String::as_str)).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::ShapeKind;

    fn board_with_bottom_row(row: &str) -> Board {
        let mut rows = vec![".........."; BOARD_HEIGHT - 1];
        rows.push(row);
        rows.join("\n").parse().unwrap()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::EMPTY;
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        for (y, row) in board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                assert_eq!(*cell, Cell::Empty, "cell ({x}, {y}) should be empty");
            }
        }
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let board = Board::EMPTY;
        assert_eq!(board.cell(0, 0), Some(Cell::Empty));
        assert_eq!(board.cell(9, 19), Some(Cell::Empty));
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(0, -1), None);
        assert_eq!(board.cell(10, 0), None);
        assert_eq!(board.cell(0, 20), None);
    }

    #[test]
    fn test_fill_shape_only_touches_occupied_cells() {
        let mut board = Board::EMPTY;
        let color = ShapeKind::T.color_id();
        board.fill_shape(&ShapeKind::T.shape(), Position::new(3, 5), color);

        assert_eq!(board.filled_count(), 4);
        assert_eq!(board.cell(3, 5), Some(Cell::Filled(color)));
        assert_eq!(board.cell(4, 5), Some(Cell::Filled(color)));
        assert_eq!(board.cell(5, 5), Some(Cell::Filled(color)));
        assert_eq!(board.cell(4, 6), Some(Cell::Filled(color)));
        // Empty mask cells under the T's arms stay empty
        assert_eq!(board.cell(3, 6), Some(Cell::Empty));
        assert_eq!(board.cell(5, 6), Some(Cell::Empty));
    }

    #[test]
    fn test_with_piece_leaves_original_untouched() {
        let board = Board::EMPTY;
        let piece = Piece::new(ShapeKind::O);
        let composed = board.with_piece(piece, Position::new(4, 18));

        assert_eq!(board.filled_count(), 0);
        assert_eq!(composed.filled_count(), 4);
        assert_eq!(composed.cell(5, 19), Some(Cell::Filled(piece.color())));
    }

    #[test]
    fn test_parse_and_display() {
        let board = board_with_bottom_row("1234567...");
        assert_eq!(board.filled_count(), 7);
        assert_eq!(
            board.cell(6, 19),
            Some(Cell::Filled(ShapeKind::S.color_id()))
        );
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "..........".parse::<Board>(),
            Err(ParseBoardError::RowCount(1))
        );

        let mut rows = vec![".........."; BOARD_HEIGHT];
        rows[3] = ".........";
        assert_eq!(
            rows.join("\n").parse::<Board>(),
            Err(ParseBoardError::RowWidth { row: 3, len: 9 })
        );

        rows[3] = "....8.....";
        assert_eq!(
            rows.join("\n").parse::<Board>(),
            Err(ParseBoardError::InvalidCell { ch: '8', x: 4, y: 3 })
        );

        let mut rows = vec![".........."; BOARD_HEIGHT + 1];
        rows[0] = "1.........";
        assert_eq!(
            rows.join("\n").parse::<Board>(),
            Err(ParseBoardError::RowCount(BOARD_HEIGHT + 1))
        );
    }

    #[test]
    fn test_board_serialization() {
        let board = board_with_bottom_row("....22....");
        let serialized = serde_json::to_value(&board).unwrap();
        let rows = serialized.as_array().unwrap();
        assert_eq!(rows.len(), BOARD_HEIGHT);
        assert_eq!(rows[0], "..........");
        assert_eq!(rows[BOARD_HEIGHT - 1], "....22....");

        let deserialized: Board = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, board);

        assert!(serde_json::from_str::<Board>("[\"..........\"]").is_err());
    }
}
