use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

/// Kind of tetromino.
///
/// The discriminant order matches the rows of the shape table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// J-piece.
    J = 0,
    /// T-piece.
    T = 1,
    /// L-piece.
    L = 2,
    /// Z-piece.
    Z = 3,
    /// S-piece.
    S = 4,
    /// O-piece.
    O = 5,
    /// I-piece.
    I = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// Every kind, in shape table order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::O,
        ShapeKind::I,
    ];

    /// Returns the single character representation of this kind.
    ///
    /// ```
    /// use stackfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::S.as_char(), 'S');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::J => 'J',
            ShapeKind::T => 'T',
            ShapeKind::L => 'L',
            ShapeKind::Z => 'Z',
            ShapeKind::S => 'S',
            ShapeKind::O => 'O',
            ShapeKind::I => 'I',
        }
    }
}

/// Rotation state of a shape, one of `0..4`.
///
/// Rotating wraps around modulo 4, so four rotations form a full cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Distribution<Rotation> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rotation {
        Rotation(rng.random_range(0..Rotation::LEN))
    }
}

impl Rotation {
    /// Number of rotation states (4).
    pub const LEN: u8 = 4;

    /// Creates a rotation state, wrapping `index` modulo 4.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % Self::LEN)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % Self::LEN)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A shape table entry: a kind in one of its rotation states.
///
/// Shapes carry no position. [`Shape::offsets`] yields the four `(row, col)`
/// offsets relative to a reference point; the board engine adds them to the
/// falling piece's reference point to get absolute cells.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Rotation, Shape, ShapeKind};
///
/// let shape = Shape::new(ShapeKind::O, Rotation::default());
/// let cells: Vec<_> = shape.offsets().collect();
/// assert_eq!(cells, [(0, 0), (0, 1), (1, 1), (1, 0)]);
/// assert_eq!(shape.col_extent(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    rotation: Rotation,
}

impl Distribution<Shape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        Shape::new(rng.random(), rng.random())
    }
}

impl Shape {
    #[must_use]
    pub const fn new(kind: ShapeKind, rotation: Rotation) -> Self {
        Self { kind, rotation }
    }

    #[must_use]
    pub const fn kind(self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(self) -> Rotation {
        self.rotation
    }

    /// Returns the same kind in its next rotation state.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation.next(),
        }
    }

    /// Returns the `(row, col)` offsets of the four cells.
    pub fn offsets(self) -> impl Iterator<Item = (usize, usize)> {
        SHAPE_TABLE[self.kind as usize][self.rotation.as_usize()]
            .into_iter()
            .map(|(row, col)| (usize::from(row), usize::from(col)))
    }

    /// Returns whether the offset `(row, col)` is part of this shape.
    #[must_use]
    pub fn contains(self, row: usize, col: usize) -> bool {
        self.offsets().any(|offset| offset == (row, col))
    }

    /// Number of columns spanned from offset 0 to the rightmost cell.
    #[must_use]
    pub fn col_extent(self) -> usize {
        self.offsets().map(|(_, col)| col + 1).max().unwrap_or(0)
    }

    /// Number of rows spanned from offset 0 to the bottom cell.
    #[must_use]
    pub fn row_extent(self) -> usize {
        self.offsets().map(|(row, _)| row + 1).max().unwrap_or(0)
    }
}

/// Side length of the square preview area that holds every shape.
pub const PREVIEW_SIZE: usize = 4;

type ShapeCells = [(u8, u8); 4];

/// `(row, col)` offsets for every kind and rotation state.
///
/// Rows are indexed by `ShapeKind as usize`, columns by rotation index. Some
/// kinds repeat entries because their rotation group is smaller than 4.
const SHAPE_TABLE: [[ShapeCells; 4]; ShapeKind::LEN] = [
    // J-piece
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (0, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
    ],
    // T-piece
    [
        [(1, 0), (1, 1), (1, 2), (2, 1)],
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (0, 1)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
    ],
    // L-piece
    [
        [(0, 1), (1, 1), (2, 1), (2, 0)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
    ],
    // Z-piece
    [
        [(0, 0), (0, 1), (1, 1), (1, 2)],
        [(2, 1), (1, 1), (1, 2), (0, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
        [(2, 1), (1, 1), (1, 2), (0, 2)],
    ],
    // S-piece
    [
        [(1, 0), (1, 1), (0, 1), (0, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (1, 1), (0, 1), (0, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
    ],
    // O-piece
    [
        [(0, 0), (0, 1), (1, 1), (1, 0)],
        [(0, 0), (0, 1), (1, 1), (1, 0)],
        [(0, 0), (0, 1), (1, 1), (1, 0)],
        [(0, 0), (0, 1), (1, 1), (1, 0)],
    ],
    // I-piece
    [
        [(1, 0), (1, 1), (1, 2), (1, 3)],
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
        [(0, 1), (1, 1), (2, 1), (3, 1)],
    ],
];
