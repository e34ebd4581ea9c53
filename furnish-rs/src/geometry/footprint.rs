use anyhow::Result;
use anyhow::ensure;

use crate::geometry::RotationStrategy;
use crate::geometry::primitives::{Point, Rect};

/// The geometric model of a placed rectangle: a center, a rotation and the four vertices
/// derived from them, together with an enlarged clearance envelope that rotates with it.
///
/// Vertices are labeled A,B,C,D starting at the corner `center - (width/2, -height/2)`
/// and proceeding clockwise (in a y-up coordinate system).
///
/// Invariant: `vertices` and `clearance` are always exactly the axis-aligned base rectangle
/// rotated by `rotation` about `center`. [`Footprint::rotate`] recomputes both from the
/// unrotated base on every call instead of rotating already-rotated vertices, so repeated
/// rotations do not accumulate floating point drift.
#[derive(Clone, Debug, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
    pub clearance_width: f64,
    pub clearance_height: f64,
    pub center: Point,
    /// Rotation in integer degrees, normalized to `[0, 360)`
    pub rotation: i32,
    pub vertices: [Point; 4],
    /// Vertices of the clearance envelope: the base rectangle expanded by the clearance
    /// margins, rotated identically to `vertices`
    pub clearance: [Point; 4],
}

impl Footprint {
    /// Creates a footprint centered at `(width / 2, height / 2)` with rotation 0.
    pub fn try_new(
        width: f64,
        height: f64,
        clearance_width: f64,
        clearance_height: f64,
    ) -> Result<Self> {
        ensure!(
            width > 0.0 && height > 0.0,
            "invalid dimension, width: {width}, height: {height}"
        );
        ensure!(
            clearance_width >= 0.0 && clearance_height >= 0.0,
            "invalid dimension, clearance margins may not be negative: ({clearance_width}, {clearance_height})"
        );
        let center = Point(width / 2.0, height / 2.0);
        Ok(Footprint {
            width,
            height,
            clearance_width,
            clearance_height,
            center,
            rotation: 0,
            vertices: base_corners(center, width, height),
            clearance: base_corners(center, width + clearance_width, height + clearance_height),
        })
    }

    /// Shifts the center and every vertex by `(dx, dy)`.
    /// No validation happens here; bounds and collisions are the concern of the
    /// [`Room`](crate::entities::Room) owning this footprint.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.center = Point(self.center.x() + dx, self.center.y() + dy);
        for v in self.vertices.iter_mut().chain(self.clearance.iter_mut()) {
            *v = Point(v.x() + dx, v.y() + dy);
        }
    }

    /// Rotates the footprint by `delta_degrees` (relative), using `rotator` for the
    /// vertex transform.
    ///
    /// The base vertices are recomputed from `width`/`height`/`center` first and the full
    /// accumulated rotation is applied to them, making this effectively "set absolute
    /// rotation" expressed as a relative delta.
    pub fn rotate(&mut self, delta_degrees: i32, rotator: &dyn RotationStrategy) {
        self.reset_vertices();
        self.rotation = (self.rotation + delta_degrees).rem_euclid(360);
        let radians = f64::from(self.rotation).to_radians();
        for v in self.vertices.iter_mut().chain(self.clearance.iter_mut()) {
            *v = rotator.rotate_vertex(*v, self.center, radians);
        }
    }

    /// Axis-aligned bounding box of the rotated vertices.
    pub fn bbox(&self) -> Rect {
        Rect::bounding(&self.vertices).expect("footprint has positive area")
    }

    fn reset_vertices(&mut self) {
        self.vertices = base_corners(self.center, self.width, self.height);
        self.clearance = base_corners(
            self.center,
            self.width + self.clearance_width,
            self.height + self.clearance_height,
        );
    }
}

fn base_corners(center: Point, width: f64, height: f64) -> [Point; 4] {
    let (hw, hh) = (width / 2.0, height / 2.0);
    [
        Point(center.x() - hw, center.y() + hh), //A
        Point(center.x() + hw, center.y() + hh), //B
        Point(center.x() + hw, center.y() - hh), //C
        Point(center.x() - hw, center.y() - hh), //D
    ]
}
