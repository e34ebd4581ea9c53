use anyhow::Result;

use crate::geometry::primitives::Point;

mod sat;

#[doc(inline)]
pub use sat::SatCollision;

/// Capability to decide whether two placed rectangles overlap.
///
/// Injected into [`Room`](crate::entities::Room) at construction; the room depends only on
/// this trait, never on a concrete implementation, so alternative overlap tests can be
/// substituted for validation or performance tuning.
pub trait CollisionStrategy: Send + Sync {
    /// Returns true iff the two quadrilaterals (each four ordered vertices of a possibly
    /// rotated rectangle) share interior area.
    ///
    /// The test is symmetric: `overlaps(a, b) == overlaps(b, a)`.
    /// Shapes that merely touch at a boundary do not overlap.
    ///
    /// # Errors
    /// Fails on degenerate (zero-area) input, for which the result would be undefined.
    fn overlaps(&self, a: &[Point; 4], b: &[Point; 4]) -> Result<bool>;
}
