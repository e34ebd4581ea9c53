use crate::geometry::primitives::Point;

/// Capability to rotate a single vertex about a center point.
///
/// Injected into [`Footprint::rotate`](crate::geometry::Footprint::rotate) so that alternative
/// numeric backends or rotation conventions can be substituted without changing callers.
pub trait RotationStrategy: Send + Sync {
    /// Returns `p` rotated by `radians` about `center`.
    fn rotate_vertex(&self, p: Point, center: Point, radians: f64) -> Point;
}

/// Standard counter-clockwise rotation using double precision trigonometry.
#[derive(Clone, Debug, Default)]
pub struct TrigRotation;

impl RotationStrategy for TrigRotation {
    fn rotate_vertex(&self, p: Point, center: Point, radians: f64) -> Point {
        let (sin, cos) = radians.sin_cos();
        let (dx, dy) = (p.x() - center.x(), p.y() - center.y());
        Point(
            center.x() + dx * cos - dy * sin,
            center.y() + dx * sin + dy * cos,
        )
    }
}
