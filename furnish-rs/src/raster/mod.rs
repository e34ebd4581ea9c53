use anyhow::Result;

use crate::geometry::primitives::Point;

mod grid;
mod line;

#[doc(inline)]
pub use grid::OccupancyGrid;
#[doc(inline)]
pub use line::{Bresenham, LineStrategy};

/// Rasterizes a set of polygons into an occupancy grid of `n_cols` x `n_rows` cells.
///
/// For every polygon, every edge (consecutive vertex pairs, wrapping last-to-first) is
/// drawn with the injected [`LineStrategy`]. This produces a boundary-only rasterization;
/// interiors are not filled. Cells that an edge leaves the grid through are clipped by the
/// grid itself.
pub fn rasterize(
    polygons: &[[Point; 4]],
    n_cols: usize,
    n_rows: usize,
    line: &dyn LineStrategy,
) -> Result<OccupancyGrid> {
    let mut grid = OccupancyGrid::try_new(n_rows, n_cols)?;
    for polygon in polygons {
        for i in 0..polygon.len() {
            let from = cell_of(polygon[i]);
            let to = cell_of(polygon[(i + 1) % polygon.len()]);
            line.plot(from, to, &mut grid);
        }
    }
    Ok(grid)
}

fn cell_of(p: Point) -> (i64, i64) {
    (p.x().round() as i64, p.y().round() as i64)
}
