use std::fmt;

/// Occupancy of a single grid cell.
///
/// The falling piece is tracked on the grid itself, so every cell knows
/// whether it is free, covered by the falling piece, or part of the settled
/// stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    /// Covered by the piece that is still falling.
    Falling,
    /// Part of a piece that has come to rest.
    Settled,
}

/// Absolute `(row, col)` position inside a [`Grid`].
///
/// Row 0 is the top of the grid and rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fixed-size playfield of `height` rows by `width` columns.
///
/// Cells are stored row-major. The grid never changes size after creation;
/// line clears shift rows down and empty the rows at the top.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Cell, Grid, Position};
///
/// let grid = Grid::new(10, 20);
/// assert_eq!(grid.get(Position::new(0, 0)), Some(Cell::Empty));
/// assert_eq!(grid.get(Position::new(20, 0)), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.width, self.height)?;
        for row in self.rows() {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Falling => '@',
                    Cell::Settled => '#',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `pos`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Converts a signed coordinate into a position if it lies on the grid.
    #[must_use]
    pub fn checked_position(&self, row: isize, col: isize) -> Option<Position> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.height && col < self.width).then_some(Position { row, col })
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Returns whether every cell of `row` is settled.
    ///
    /// Cells of the falling piece do not count until the piece locks.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_settled())
    }

    /// Returns whether no cell holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Counts the cells in the given state.
    #[must_use]
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Removes every row of settled cells and returns how many were removed.
    ///
    /// Rows above a removed row move down to close the gap, keeping their
    /// relative order, and the same number of empty rows appear at the top.
    /// Full rows need not be adjacent.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        for row in (0..self.height).rev() {
            if self.is_row_full(row) {
                cleared += 1;
                continue;
            }
            if cleared > 0 {
                let src = row * width;
                self.cells
                    .copy_within(src..src + width, (row + cleared) * width);
            }
        }
        self.cells[..cleared * width].fill(Cell::Empty);
        cleared
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        let index = self
            .index(pos)
            .unwrap_or_else(|| panic!("{pos:?} outside {}x{} grid", self.width, self.height));
        self.cells[index] = cell;
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..][..self.width]
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.row < self.height && pos.col < self.width).then(|| pos.row * self.width + pos.col)
    }
}

#[cfg(test)]
pub(crate) fn grid_from_ascii(lines: &[&str]) -> Grid {
    let width = lines[0].len();
    let mut grid = Grid::new(width, lines.len());
    for (row, line) in lines.iter().enumerate() {
        assert_eq!(line.len(), width, "ragged line {row}");
        for (col, ch) in line.chars().enumerate() {
            let cell = match ch {
                '.' => Cell::Empty,
                '@' => Cell::Falling,
                '#' => Cell::Settled,
                _ => panic!("unexpected cell {ch:?}"),
            };
            grid.set(Position::new(row, col), cell);
        }
    }
    grid
}
