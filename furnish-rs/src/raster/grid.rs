use std::cmp::Ordering;

use anyhow::Result;
use anyhow::ensure;

/// Row-major grid of boolean occupancy cells.
/// Row index corresponds to the y-axis, column index to the x-axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<bool>,
    pub n_rows: usize,
    pub n_cols: usize,
}

impl OccupancyGrid {
    pub fn try_new(n_rows: usize, n_cols: usize) -> Result<Self> {
        ensure!(
            n_rows > 0 && n_cols > 0,
            "invalid dimension, grid: {n_rows} rows x {n_cols} cols"
        );
        Ok(OccupancyGrid {
            cells: vec![false; n_rows * n_cols],
            n_rows,
            n_cols,
        })
    }

    /// Marks a cell as occupied. Coordinates outside the grid are ignored, so callers can
    /// plot geometry that sticks out of the container without bounds bookkeeping.
    pub fn mark(&mut self, row: usize, col: usize) {
        if let Some(index) = self.index(row, col) {
            self.cells[index] = true;
        }
    }

    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        match self.index(row, col) {
            Some(index) => self.cells[index],
            None => false,
        }
    }

    /// All occupied cells as `(row, col)` pairs, in row-major order.
    pub fn marked_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &occupied)| occupied)
            .map(|(index, _)| (index / self.n_cols, index % self.n_cols))
    }

    /// Deterministic cell-by-cell dump: `#` for occupied, `.` for empty, one row per
    /// line. Rows are printed top-down (highest y first) so the output matches the
    /// usual orientation of the room.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.n_cols + 1) * self.n_rows);
        for row in (0..self.n_rows).rev() {
            for col in 0..self.n_cols {
                out.push(if self.is_marked(row, col) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        match (row.cmp(&self.n_rows), col.cmp(&self.n_cols)) {
            (Ordering::Less, Ordering::Less) => Some(row * self.n_cols + col),
            _ => None, //out of bounds
        }
    }
}
