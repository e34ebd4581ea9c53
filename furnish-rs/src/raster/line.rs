use crate::raster::OccupancyGrid;

/// Capability to draw a line segment into an occupancy grid, marking every cell the
/// segment passes through. Injected into [`rasterize`](crate::raster::rasterize).
pub trait LineStrategy: Send + Sync {
    /// Plots the segment from `from` to `to`, both given as `(x, y)` cell coordinates.
    fn plot(&self, from: (i64, i64), to: (i64, i64), grid: &mut OccupancyGrid);
}

/// Integer line rasterization using
/// [Bresenham's algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm),
/// generalized to all octants via error accumulation.
#[derive(Clone, Debug, Default)]
pub struct Bresenham;

impl LineStrategy for Bresenham {
    fn plot(&self, (mut x, mut y): (i64, i64), (x1, y1): (i64, i64), grid: &mut OccupancyGrid) {
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x >= 0 && y >= 0 {
                grid.mark(y as usize, x as usize);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
