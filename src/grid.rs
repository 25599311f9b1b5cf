//! Fixed-size cell grid and the linear cursor used to fill it.

use crate::rules::Rules;

/// A rectangular matrix of live/dead cells, stored row-major.
///
/// Dimensions are fixed at construction. Reads outside the grid return dead
/// and writes outside it are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create an all-dead grid of `height` rows by `width` columns.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            cells: vec![false; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at (row, col) is alive.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Set the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = alive;
        }
    }

    /// Iterate over rows, each exactly `width` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// (row, col) of every live cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(index, _)| (index / self.width, index % self.width))
    }

    /// The exclusive end of the grid; never written.
    pub fn end(&self) -> Cursor {
        Cursor::new(self.height, 0)
    }

    /// Write one cell at `cursor` and advance it.
    pub fn write(&mut self, cursor: &mut Cursor, alive: bool) {
        self.set(cursor.row, cursor.col, alive);
        cursor.advance(self.width);
    }

    /// Write `count` cells starting at `cursor`, leaving it just past the run.
    ///
    /// Returns how many of the cells landed inside the grid.
    pub fn fill(&mut self, cursor: &mut Cursor, count: usize, alive: bool) -> usize {
        let mut written = 0;
        while written < count && *cursor < self.end() {
            self.write(cursor, alive);
            written += 1;
        }
        cursor.skip(count - written, self.width);
        written
    }
}

/// A write position over a grid: column first, then row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The first cell of the grid.
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Step one cell forward in a grid `width` columns wide.
    pub fn advance(&mut self, width: usize) {
        if self.col + 1 < width {
            self.col += 1;
        } else {
            self.row += 1;
            self.col = 0;
        }
    }

    /// Step `n` cells forward without visiting them.
    pub fn skip(&mut self, n: usize, width: usize) {
        if n == 0 {
            return;
        }
        let width = width.max(1);
        let index = self
            .row
            .saturating_mul(width)
            .saturating_add(self.col)
            .saturating_add(n);
        self.row = index / width;
        self.col = index % width;
    }
}

/// A decoded pattern: the populated grid and its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub grid: Grid,
    pub rules: Rules,
}

impl Pattern {
    pub fn new(grid: Grid, rules: Rules) -> Self {
        Self { grid, rules }
    }
}
