use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};
use rand::prelude::SmallRng;
use thousands::Separable;

use furnish_rs::entities::{Room, RoomSnapshot};

use crate::config::RmhcConfig;

/// States of the search loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    /// The penalty reached the target
    Converged,
    /// The iteration budget (or time limit) was spent without convergence
    Exhausted,
}

/// Single-candidate random mutation hill climber over one owned [`Room`].
///
/// Acceptance policy: accept-on-improve-or-equal. A mutation that leaves the penalty at
/// or below the previous value is kept (equal scores are accepted so the search can drift
/// across plateaus); a worsening mutation is reverted. The best configuration is tracked
/// in a snapshot independent of the live room, so a revert never loses it.
pub struct RmhcOptimizer {
    pub room: Room,
    pub config: RmhcConfig,
    /// SmallRng is a fast, non-cryptographic PRNG <https://rust-random.github.io/book/guide-rngs.html>
    pub rng: SmallRng,
    pub best: RoomSnapshot,
    pub state: SearchState,
    pub n_iterations: usize,
}

impl RmhcOptimizer {
    pub fn new(mut room: Room, config: RmhcConfig, rng: SmallRng) -> Result<Self> {
        room.weights = config.weights;
        room.enforce_clearance = config.enforce_clearance;
        room.evaluate_penalty()?;
        let best = room.save();
        let state = match room.penalty <= config.target_penalty {
            true => SearchState::Converged,
            false => SearchState::Running,
        };
        Ok(Self {
            room,
            config,
            rng,
            best,
            state,
            n_iterations: 0,
        })
    }

    /// One mutate → evaluate → accept/revert transition. Returns the resulting state.
    pub fn step(&mut self) -> Result<SearchState> {
        if self.state != SearchState::Running {
            return Ok(self.state);
        }

        let baseline = self.room.penalty;
        let mutation = self.room.mutate(&mut self.rng, &self.config.mutation)?;
        let penalty = self.room.evaluate_penalty()?;

        if penalty <= baseline {
            if penalty < self.best.penalty {
                self.best = self.room.save();
                debug!(
                    "[RMHC] iteration {}: new best penalty {penalty:.1}",
                    self.n_iterations.separate_with_commas()
                );
            }
        } else {
            self.room.revert(&mutation)?;
        }

        self.n_iterations += 1;
        if self.room.penalty <= self.config.target_penalty {
            self.state = SearchState::Converged;
        } else if self.n_iterations >= self.config.n_iterations {
            self.state = SearchState::Exhausted;
        }
        Ok(self.state)
    }

    /// Runs until a terminal state is reached, then restores the room to the best found
    /// configuration and returns a snapshot of it.
    pub fn solve(&mut self) -> Result<RoomSnapshot> {
        let start = Instant::now();
        let deadline = self.config.time_limit_sec.map(Duration::from_secs);

        while self.state == SearchState::Running {
            if let Some(limit) = deadline
                && start.elapsed() >= limit
            {
                info!("[RMHC] time limit reached after {} iterations", self.n_iterations);
                self.state = SearchState::Exhausted;
                break;
            }

            self.step()?;

            if let Some(pace) = self.config.pace_ms {
                thread::sleep(Duration::from_millis(pace));
            }
        }

        self.room.restore(&self.best)?;
        info!(
            "[RMHC] finished in {:.3}ms ({} iterations): {:?}, best penalty {:.1}",
            start.elapsed().as_secs_f64() * 1000.0,
            self.n_iterations.separate_with_commas(),
            self.state,
            self.best.penalty
        );
        Ok(self.best.clone())
    }
}
