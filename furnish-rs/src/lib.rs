//! `furnish-rs` is a collision-aware layout engine for 2D furniture
//! arrangement problems.
//!
//! It models a rectangular room containing rigid rectangular items (and fixed
//! obstacles such as doors), detects overlap between arbitrarily rotated
//! items, scores a layout with a penalty function and can materialize a
//! layout into a discrete occupancy grid for inspection.
//!
//! The search policy itself lives outside this crate: see the `rmhc` crate
//! for a reference optimizer driving [`entities::Room`].

pub mod collision;
pub mod entities;
pub mod geometry;
pub mod io;
pub mod raster;
pub mod util;
