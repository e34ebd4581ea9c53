use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::geometry::{Footprint, RotationStrategy};
use crate::geometry::primitives::Point;

/// A rigid rectangular object placed in a [`Room`](crate::entities::Room).
///
/// Identity and shape attributes (id, name, dimensions, zone, clearance margins and the
/// constraint flags) are fixed at construction. The placement attributes live in
/// [`Footprint`] and are mutated in place for the lifetime of a search run, together with
/// the two runtime flags maintained by the room's penalty evaluation.
#[derive(Clone)]
pub struct Item {
    pub id: usize,
    pub name: String,
    /// Zone label this item belongs to, e.g. "kitchen"
    pub zone: String,
    /// Index of the wall this item prefers to touch, if any
    pub near_wall: Option<usize>,
    /// Whether the item may be placed in front of a window
    pub ignore_windows: bool,
    /// Whether the front side of the item must remain reachable.
    /// Constraint input for external accessibility checks; not evaluated here.
    pub accessible: bool,
    pub parent_id: Option<usize>,
    pub parent_name: Option<String>,
    pub footprint: Footprint,
    /// Set by penalty evaluation when any vertex lies outside the room
    pub out_of_bounds: bool,
    /// Set by penalty evaluation when this item overlaps something it should not
    pub collided: bool,
    rotator: Option<Arc<dyn RotationStrategy>>,
}

impl Item {
    /// Creates an item with its footprint centered at `(width / 2, height / 2)`.
    /// Fails when `width` or `height` is not strictly positive.
    pub fn try_new(
        id: usize,
        name: &str,
        width: f64,
        height: f64,
        zone: &str,
        clearance_width: f64,
        clearance_height: f64,
    ) -> Result<Self> {
        Ok(Item {
            id,
            name: name.to_string(),
            zone: zone.to_string(),
            near_wall: None,
            ignore_windows: false,
            accessible: false,
            parent_id: None,
            parent_name: None,
            footprint: Footprint::try_new(width, height, clearance_width, clearance_height)?,
            out_of_bounds: false,
            collided: false,
            rotator: None,
        })
    }

    pub fn with_near_wall(mut self, wall: usize) -> Self {
        self.near_wall = Some(wall);
        self
    }

    pub fn with_ignore_windows(mut self) -> Self {
        self.ignore_windows = true;
        self
    }

    pub fn with_accessibility(mut self) -> Self {
        self.accessible = true;
        self
    }

    pub fn with_parent(mut self, id: usize, name: &str) -> Self {
        self.parent_id = Some(id);
        self.parent_name = Some(name.to_string());
        self
    }

    pub fn with_rotation_strategy(mut self, rotator: Arc<dyn RotationStrategy>) -> Self {
        self.rotator = Some(rotator);
        self
    }

    pub fn set_rotation_strategy(&mut self, rotator: Option<Arc<dyn RotationStrategy>>) {
        self.rotator = rotator;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.footprint.translate(dx, dy);
    }

    /// Rotates the item by `delta_degrees`.
    ///
    /// When no rotation strategy is configured this is a no-op: the placement attributes
    /// are left unchanged. This is defined behavior, not an error.
    pub fn rotate(&mut self, delta_degrees: i32) {
        if let Some(rotator) = &self.rotator {
            self.footprint.rotate(delta_degrees, rotator.as_ref());
        }
    }

    pub fn width(&self) -> f64 {
        self.footprint.width
    }

    pub fn height(&self) -> f64 {
        self.footprint.height
    }

    pub fn center(&self) -> Point {
        self.footprint.center
    }

    pub fn rotation(&self) -> i32 {
        self.footprint.rotation
    }

    pub fn vertices(&self) -> &[Point; 4] {
        &self.footprint.vertices
    }

    pub fn clearance(&self) -> &[Point; 4] {
        &self.footprint.clearance
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("zone", &self.zone)
            .field("footprint", &self.footprint)
            .field("out_of_bounds", &self.out_of_bounds)
            .field("collided", &self.collided)
            .field("rotatable", &self.rotator.is_some())
            .finish()
    }
}
