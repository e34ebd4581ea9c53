//! Random Mutation Hill Climbing (RMHC) reference optimizer for `furnish-rs`.
//!
//! Repeatedly mutates the placement of one item in a [`Room`](furnish_rs::entities::Room),
//! keeps mutations that do not worsen the penalty and tracks the best configuration found.

use std::time::Instant;

use once_cell::sync::Lazy;

pub mod config;
pub mod factories;
pub mod io;
pub mod optimizer;
pub mod population;

pub static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);
