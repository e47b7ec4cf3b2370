//! Binary occupancy grid storage.

use crate::core::GridCoord;

/// Fixed-size binary occupancy grid.
///
/// Cell values are only ever 0 (free) or 1 (occupied). Coordinate `x` indexes
/// rows (forward axis), `y` columns (lateral axis); all access is
/// bounds-checked against `[0, rows) x [0, cols)`.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl OccupancyGrid {
    /// Create a new all-free grid with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Grid rows (forward axis extent)
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid columns (lateral axis extent)
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if a coordinate is within bounds
    #[inline]
    pub fn is_valid(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && (coord.x as usize) < self.rows && coord.y >= 0 && (coord.y as usize) < self.cols
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> usize {
        coord.x as usize * self.cols + coord.y as usize
    }

    /// Is this in-bounds cell occupied?
    ///
    /// Out-of-bounds coordinates read as free.
    #[inline]
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.is_valid(coord) && self.cells[self.index(coord)] == 1
    }

    /// Mark an in-bounds cell as occupied. Idempotent; returns whether the
    /// cell was newly marked. Out-of-bounds coordinates are rejected.
    pub fn mark_occupied(&mut self, coord: GridCoord) -> bool {
        if !self.is_valid(coord) {
            return false;
        }
        let idx = self.index(coord);
        let newly = self.cells[idx] == 0;
        self.cells[idx] = 1;
        newly
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Clear every cell back to free
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    /// One row of cell values, for snapshot output
    pub fn row(&self, x: usize) -> &[u8] {
        &self.cells[x * self.cols..(x + 1) * self.cols]
    }
}
