use anyhow::Result;
use anyhow::ensure;

use crate::collision::CollisionStrategy;
use crate::geometry::primitives::Point;

/// Overlap test for two arbitrarily rotated rectangles based on the
/// [separating axis theorem](https://en.wikipedia.org/wiki/Hyperplane_separation_theorem).
///
/// A rectangle has two unique edge-normal directions (opposite edges are parallel), so four
/// candidate axes are tested in total. The rectangles overlap iff the projection intervals
/// intersect on every axis. Projection intervals that meet in exactly one point count as
/// separated: touching is non-colliding.
#[derive(Clone, Debug, Default)]
pub struct SatCollision;

impl CollisionStrategy for SatCollision {
    fn overlaps(&self, a: &[Point; 4], b: &[Point; 4]) -> Result<bool> {
        ensure!(
            area(a) > 0.0,
            "invalid geometry, zero-area polygon: {a:?}"
        );
        ensure!(
            area(b) > 0.0,
            "invalid geometry, zero-area polygon: {b:?}"
        );

        //two perpendicular edge normals per rectangle, parallel edges deduplicated
        let axes = [
            edge_normal(a[0], a[1]),
            edge_normal(a[1], a[2]),
            edge_normal(b[0], b[1]),
            edge_normal(b[1], b[2]),
        ];

        for axis in axes {
            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            if f64::min(max_a, max_b) <= f64::max(min_a, min_b) {
                //separating axis found, intervals are disjoint (or touch in a single point)
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn edge_normal(from: Point, to: Point) -> (f64, f64) {
    (-(to.y() - from.y()), to.x() - from.x())
}

fn project(quad: &[Point; 4], (ax, ay): (f64, f64)) -> (f64, f64) {
    quad.iter()
        .map(|p| p.x() * ax + p.y() * ay)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
            (f64::min(min, d), f64::max(max, d))
        })
}

//shoelace formula
fn area(quad: &[Point; 4]) -> f64 {
    let mut sum = 0.0;
    for i in 0..4 {
        let Point(x0, y0) = quad[i];
        let Point(x1, y1) = quad[(i + 1) % 4];
        sum += x0 * y1 - x1 * y0;
    }
    (sum / 2.0).abs()
}
