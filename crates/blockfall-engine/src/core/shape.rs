use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest width or height a shape mask may have.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Enum representing the kind of a catalog shape.
///
/// The discriminant is the catalog index; the color id of a kind is always
/// `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// Four in a row.
    I = 0,
    /// 2×2 square.
    O = 1,
    /// T-shape.
    T = 2,
    /// L-shape, spawning with its foot on the left.
    L = 3,
    /// J-shape, spawning with its foot on the right.
    J = 4,
    /// Z-shape.
    Z = 5,
    /// S-shape.
    S = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// All kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::Z,
        ShapeKind::S,
    ];

    /// Position of this kind in the catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The kind's mask in its spawn orientation.
    #[must_use]
    pub const fn shape(self) -> Shape {
        SHAPES[self.index()]
    }

    /// The color id used for this kind's cells once merged into the board.
    #[must_use]
    pub const fn color_id(self) -> ColorId {
        ColorId(self as u8 + 1)
    }

    /// Returns the single character representation of this shape kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::S.as_char(), 'S');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
            ShapeKind::Z => 'Z',
            ShapeKind::S => 'S',
        }
    }

    /// Parses a shape kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'O' => Some(ShapeKind::O),
            'T' => Some(ShapeKind::T),
            'L' => Some(ShapeKind::L),
            'J' => Some(ShapeKind::J),
            'Z' => Some(ShapeKind::Z),
            'S' => Some(ShapeKind::S),
            _ => None,
        }
    }
}

/// Identifier of one of the seven cell colors (1 to 7).
///
/// The engine never interprets the value beyond equality; mapping ids to
/// actual colors belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorId(u8);

impl ColorId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The catalog kind this color belongs to.
    #[must_use]
    pub const fn shape_kind(self) -> ShapeKind {
        ShapeKind::ALL[(self.0 - 1) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("color id {value} is outside {}..={}", ColorId::MIN, ColorId::MAX)]
pub struct InvalidColorIdError {
    value: u8,
}

impl TryFrom<u8> for ColorId {
    type Error = InvalidColorIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidColorIdError { value })
    }
}

impl From<ColorId> for u8 {
    fn from(color: ColorId) -> Self {
        color.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidShapeError {
    #[display("shape has no rows")]
    Empty,
    #[display("shape is {width}x{height}, larger than 4x4")]
    TooLarge { width: usize, height: usize },
    #[display("row {row} has {len} cells, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },
    #[display("cell value {value} is not 0 or 1")]
    InvalidCell { value: u8 },
    #[display("shape has no occupied cell")]
    NoOccupiedCell,
}

/// Rectangular occupancy mask of a piece, at most 4×4.
///
/// Each row is stored as a bit set where bit `x` is the cell in column `x`.
/// Bits outside `width` and rows outside `height` are always zero, so two
/// shapes compare equal exactly when they match cell for cell.
///
/// # Example
///
/// ```
/// use blockfall_engine::ShapeKind;
///
/// let t = ShapeKind::T.shape();
/// assert_eq!(t.to_rows(), vec![vec![1, 1, 1], vec![0, 1, 0]]);
///
/// let rotated = t.rotated_clockwise();
/// assert_eq!(rotated.to_rows(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [u8; MAX_SHAPE_SIZE],
}

impl Shape {
    const fn new(width: u8, height: u8, rows: [u8; MAX_SHAPE_SIZE]) -> Self {
        assert!(width >= 1 && width as usize <= MAX_SHAPE_SIZE);
        assert!(height >= 1 && height as usize <= MAX_SHAPE_SIZE);
        Self {
            width,
            height,
            rows,
        }
    }

    /// Builds a shape from rows of 0/1 values.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::{Shape, ShapeKind};
    ///
    /// let o = Shape::try_from_rows(&[[1_u8, 1], [1, 1]]).unwrap();
    /// assert_eq!(o, ShapeKind::O.shape());
    /// assert!(Shape::try_from_rows::<[u8; 0]>(&[]).is_err());
    /// ```
    pub fn try_from_rows<R>(rows: &[R]) -> Result<Self, InvalidShapeError>
    where
        R: AsRef<[u8]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0 || width == 0 {
            return Err(InvalidShapeError::Empty);
        }
        if height > MAX_SHAPE_SIZE || width > MAX_SHAPE_SIZE {
            return Err(InvalidShapeError::TooLarge { width, height });
        }

        let mut bits = [0; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(InvalidShapeError::Ragged {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => bits[y] |= 1 << x,
                    _ => return Err(InvalidShapeError::InvalidCell { value }),
                }
            }
        }
        if bits.iter().all(|&row| row == 0) {
            return Err(InvalidShapeError::NoOccupiedCell);
        }

        #[expect(clippy::cast_possible_truncation)]
        let shape = Self::new(width as u8, height as u8, bits);
        Ok(shape)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Checks whether the mask cell at `(x, y)` is occupied.
    ///
    /// Cells outside the mask are reported as unoccupied.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && (self.rows[y] & (1 << x)) != 0
    }

    /// Returns an iterator of occupied cells as `(x, y)` offsets from the mask origin.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.rows[usize::from(y)] & (1 << x) != 0)
                .map(move |x| (i32::from(x), i32::from(y)))
        })
    }

    /// Returns the shape turned a quarter turn clockwise.
    ///
    /// Row `i` of the result is column `i` of this shape read bottom to top,
    /// so a `w×h` mask becomes `h×w`.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let mut rows = [0; MAX_SHAPE_SIZE];
        let mut new_y = 0;
        while new_y < self.width as usize {
            let mut new_x = 0;
            while new_x < self.height as usize {
                if self.is_occupied(new_y, self.height as usize - 1 - new_x) {
                    rows[new_y] |= 1 << new_x;
                }
                new_x += 1;
            }
            new_y += 1;
        }
        Self::new(self.height, self.width, rows)
    }

    /// Returns the mask as rows of 0/1 values.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| u8::from(self.is_occupied(x, y)))
                    .collect()
            })
            .collect()
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: nested 0/1 arrays (e.g. [[1,1,1],[0,1,0]])
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Shape::try_from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

const SHAPES: [Shape; ShapeKind::LEN] = {
    const fn m(bits: [bool; MAX_SHAPE_SIZE]) -> u8 {
        let mut mask = 0;
        let mut i = 0;
        while i < MAX_SHAPE_SIZE {
            if bits[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const C: bool = true;
    const E: bool = false;

    [
        // I-shape
        Shape::new(4, 1, [m([C, C, C, C]), 0, 0, 0]),
        // O-shape
        Shape::new(2, 2, [m([C, C, E, E]), m([C, C, E, E]), 0, 0]),
        // T-shape
        Shape::new(3, 2, [m([C, C, C, E]), m([E, C, E, E]), 0, 0]),
        // L-shape
        Shape::new(3, 2, [m([C, C, C, E]), m([C, E, E, E]), 0, 0]),
        // J-shape
        Shape::new(3, 2, [m([C, C, C, E]), m([E, E, C, E]), 0, 0]),
        // Z-shape
        Shape::new(3, 2, [m([C, C, E, E]), m([E, C, C, E]), 0, 0]),
        // S-shape
        Shape::new(3, 2, [m([E, C, C, E]), m([C, C, E, E]), 0, 0]),
    ]
};
