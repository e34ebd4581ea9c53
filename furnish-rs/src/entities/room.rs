use std::sync::Arc;

use anyhow::Result;
use anyhow::ensure;
use itertools::Itertools;
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::collision::CollisionStrategy;
use crate::entities::Item;
use crate::geometry::Footprint;
use crate::geometry::geo_traits::AlmostCollidesWith;
use crate::geometry::primitives::Rect;
use crate::raster::{self, LineStrategy, OccupancyGrid};

/// Weights applied when aggregating violations into the scalar penalty.
/// The defaults of 1.0 make the penalty a plain violation count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PenaltyWeights {
    pub collision: f64,
    pub out_of_bounds: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            collision: 1.0,
            out_of_bounds: 1.0,
        }
    }
}

/// Bounds for the random placement mutations applied by [`Room::mutate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Maximum translation distance per axis, sampled uniformly from `±max_translation`
    pub max_translation: f64,
    /// Rotation deltas are multiples of this step (degrees); `0` disables rotation
    pub rotation_step: i32,
    /// Probability that a mutation also rotates the item
    pub rotation_prob: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            max_translation: 5.0,
            rotation_step: 90,
            rotation_prob: 0.3,
        }
    }
}

/// Record of a single placement mutation, sufficient to revert it.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub item_index: usize,
    pub prev: Footprint,
}

/// Immutable, compact copy of a [`Room`]'s placement state.
/// Used to track the best configuration found independently of the live room, so that
/// reverting a mutation can never lose a previously found better layout.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    pub footprints: Vec<Footprint>,
    pub penalty: f64,
}

/// The layout state: a rectangular container with corners at `(0,0)` and
/// `(width, height)`, a set of fixed obstacles (doors) and the mutable items placed in it.
///
/// The room owns its item collection exclusively. Search drivers interact through the
/// public operations ([`Room::move_item`], [`Room::rotate_item`], [`Room::mutate`], ...)
/// and never edit item geometry directly.
///
/// The penalty is a deterministic, pure function of the current geometry: re-running
/// [`Room::evaluate_penalty`] without mutation yields the same score and the same flags.
/// A penalty of exactly zero denotes a valid layout.
#[derive(Clone)]
pub struct Room {
    pub width: f64,
    pub height: f64,
    pub weights: PenaltyWeights,
    /// When true, clearance envelopes must also be collision-free
    pub enforce_clearance: bool,
    pub penalty: f64,
    /// Derived occupancy grid from the last [`Room::rasterize`] call; never authoritative
    pub grid: Option<OccupancyGrid>,
    doors: Vec<Item>,
    items: Vec<Item>,
    collision: Arc<dyn CollisionStrategy>,
}

impl Room {
    /// Creates a room, takes ownership of `doors` and `items` and runs an initial penalty
    /// evaluation. Fails when `width` or `height` is not strictly positive.
    pub fn new(
        width: f64,
        height: f64,
        doors: Vec<Item>,
        items: Vec<Item>,
        collision: Arc<dyn CollisionStrategy>,
    ) -> Result<Self> {
        ensure!(
            width > 0.0 && height > 0.0,
            "invalid dimension, room: {width} x {height}"
        );
        let mut room = Room {
            width,
            height,
            weights: PenaltyWeights::default(),
            enforce_clearance: false,
            penalty: 0.0,
            grid: None,
            doors,
            items,
            collision,
        };
        room.evaluate_penalty()?;
        Ok(room)
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn doors(&self) -> &[Item] {
        &self.doors
    }

    /// Moves an item by `(dx, dy)` and re-evaluates the penalty, so no item is left with
    /// stale flags. Returns the new penalty.
    pub fn move_item(&mut self, index: usize, dx: f64, dy: f64) -> Result<f64> {
        let item = self.item_mut(index)?;
        item.translate(dx, dy);
        self.evaluate_penalty()
    }

    /// Rotates an item by `delta_degrees` (a no-op for items without a rotation strategy)
    /// and re-evaluates the penalty. Returns the new penalty.
    pub fn rotate_item(&mut self, index: usize, delta_degrees: i32) -> Result<f64> {
        let item = self.item_mut(index)?;
        item.rotate(delta_degrees);
        self.evaluate_penalty()
    }

    /// Point query: do these two items currently overlap?
    /// Thin pass-through to the injected [`CollisionStrategy`].
    pub fn collides_pair(&self, a: &Item, b: &Item) -> Result<bool> {
        self.collision
            .overlaps(&a.footprint.vertices, &b.footprint.vertices)
    }

    /// Re-derives all `collided`/`out_of_bounds` flags from the current geometry and
    /// aggregates the scalar penalty.
    ///
    /// Every item is tested against every other item and every door; when clearance
    /// enforcement is on, an item's clearance envelope may not overlap another solid
    /// either. An item is out of bounds when any vertex lies outside the container
    /// rectangle (within [`FPA`](crate::util::FPA) tolerance, so exact boundary contact
    /// does not flag).
    pub fn evaluate_penalty(&mut self) -> Result<f64> {
        for item in &mut self.items {
            item.collided = false;
            item.out_of_bounds = false;
        }

        let n = self.items.len();
        let mut collisions: usize = 0;

        for (i, j) in (0..n).tuple_combinations() {
            if self.pair_violates(&self.items[i], &self.items[j])? {
                self.items[i].collided = true;
                self.items[j].collided = true;
                collisions += 1;
            }
        }

        for i in 0..n {
            for d in 0..self.doors.len() {
                if self.pair_violates(&self.items[i], &self.doors[d])? {
                    self.items[i].collided = true;
                    collisions += 1;
                }
            }
        }

        let bounds = self.bounds();
        let mut out_of_bounds: usize = 0;
        for item in &mut self.items {
            if item
                .footprint
                .vertices
                .iter()
                .any(|v| !bounds.almost_collides_with(v))
            {
                item.out_of_bounds = true;
                out_of_bounds += 1;
            }
        }

        self.penalty = self.weights.collision * collisions as f64
            + self.weights.out_of_bounds * out_of_bounds as f64;
        trace!(
            "[ROOM] evaluated penalty {:.1} ({collisions} collisions, {out_of_bounds} out of bounds)",
            self.penalty
        );
        Ok(self.penalty)
    }

    /// Applies a bounded random translation, and with configured probability a bounded
    /// random rotation, to one randomly selected item. Shape attributes, identity, the
    /// container boundary and the doors are never touched.
    ///
    /// Does not re-evaluate the penalty; callers decide when to evaluate. Returns a
    /// [`Mutation`] with which the change can be [reverted](Room::revert).
    pub fn mutate(&mut self, rng: &mut impl Rng, config: &MutationConfig) -> Result<Mutation> {
        ensure!(!self.items.is_empty(), "cannot mutate a room without items");

        let item_index = rng.random_range(0..self.items.len());
        let prev = self.items[item_index].footprint.clone();

        let dx = rng.random_range(-config.max_translation..=config.max_translation);
        let dy = rng.random_range(-config.max_translation..=config.max_translation);
        self.items[item_index].translate(dx, dy);

        if config.rotation_step > 0 && rng.random_bool(config.rotation_prob.clamp(0.0, 1.0)) {
            let turns = (360 / config.rotation_step).max(2);
            let delta = config.rotation_step * rng.random_range(1..turns);
            self.items[item_index].rotate(delta);
        }

        Ok(Mutation { item_index, prev })
    }

    /// Restores the footprint recorded in `mutation` and re-evaluates the penalty.
    pub fn revert(&mut self, mutation: &Mutation) -> Result<f64> {
        let item = self.item_mut(mutation.item_index)?;
        item.footprint = mutation.prev.clone();
        self.evaluate_penalty()
    }

    /// Saves the current placement state to be potentially restored to later.
    pub fn save(&self) -> RoomSnapshot {
        RoomSnapshot {
            footprints: self.items.iter().map(|i| i.footprint.clone()).collect(),
            penalty: self.penalty,
        }
    }

    /// Restores the placement state from a snapshot and re-derives penalty and flags.
    pub fn restore(&mut self, snapshot: &RoomSnapshot) -> Result<()> {
        ensure!(
            snapshot.footprints.len() == self.items.len(),
            "snapshot does not match room, {} footprints vs {} items",
            snapshot.footprints.len(),
            self.items.len()
        );
        for (item, footprint) in self.items.iter_mut().zip(&snapshot.footprints) {
            item.footprint = footprint.clone();
        }
        self.evaluate_penalty()?;
        Ok(())
    }

    /// Rasterizes doors and items into the room's occupancy grid (one cell per unit of
    /// room space) and returns a reference to it. The grid is derived state for
    /// inspection and export; it plays no role in penalty evaluation.
    pub fn rasterize(&mut self, line: &dyn LineStrategy) -> Result<&OccupancyGrid> {
        let polygons = self
            .doors
            .iter()
            .chain(self.items.iter())
            .map(|item| item.footprint.vertices)
            .collect_vec();
        let n_cols = self.width.ceil() as usize + 1;
        let n_rows = self.height.ceil() as usize + 1;
        let grid = raster::rasterize(&polygons, n_cols, n_rows, line)?;
        Ok(self.grid.insert(grid))
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut Item> {
        let n = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("item index {index} out of range, room holds {n}"))
    }

    fn pair_violates(&self, a: &Item, b: &Item) -> Result<bool> {
        if self
            .collision
            .overlaps(&a.footprint.vertices, &b.footprint.vertices)?
        {
            return Ok(true);
        }
        if self.enforce_clearance {
            return Ok(self
                .collision
                .overlaps(&a.footprint.clearance, &b.footprint.vertices)?
                || self
                    .collision
                    .overlaps(&a.footprint.vertices, &b.footprint.clearance)?);
        }
        Ok(false)
    }
}
