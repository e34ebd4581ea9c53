use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};
use ordered_float::NotNan;
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thousands::Separable;

use furnish_rs::entities::{Room, RoomSnapshot};

use crate::config::RmhcConfig;
use crate::optimizer::SearchState;

/// Population-based variant of the hill climber: `n_candidates` independent candidate
/// rooms are mutated and evaluated in parallel each generation.
///
/// Every candidate is a deep copy; no item is shared between threads, and each worker
/// owns its candidate exclusively for the duration of a generation. Selecting the new
/// global best happens in a single sequential reduce step after the parallel section.
pub struct PopulationOptimizer {
    pub candidates: Vec<Room>,
    pub config: RmhcConfig,
    pub best: RoomSnapshot,
    pub state: SearchState,
    pub n_generations: usize,
    generation_budget: usize,
    rngs: Vec<SmallRng>,
}

impl PopulationOptimizer {
    /// Seeds `n_candidates` copies of `room`, each with its own PRNG derived from `rng`.
    pub fn new(mut room: Room, config: RmhcConfig, mut rng: SmallRng) -> Result<Self> {
        room.weights = config.weights;
        room.enforce_clearance = config.enforce_clearance;
        room.evaluate_penalty()?;

        let n = config.n_candidates.max(1);
        let candidates = vec![room.clone(); n];
        let rngs = (0..n)
            .map(|_| SmallRng::seed_from_u64(rng.random()))
            .collect();

        let best = room.save();
        let state = match room.penalty <= config.target_penalty {
            true => SearchState::Converged,
            false => SearchState::Running,
        };
        Ok(Self {
            candidates,
            config,
            best,
            state,
            n_generations: 0,
            // n_iterations is the total mutation budget, shared across the population
            generation_budget: config.n_iterations.div_ceil(n),
            rngs,
        })
    }

    /// Mutates and evaluates every candidate in parallel, then selects the new global
    /// best sequentially. Returns the resulting state.
    pub fn run_generation(&mut self) -> Result<SearchState> {
        if self.state != SearchState::Running {
            return Ok(self.state);
        }

        let mutation_config = self.config.mutation;
        self.candidates
            .par_iter_mut()
            .zip(self.rngs.par_iter_mut())
            .map(|(room, rng)| {
                let baseline = room.penalty;
                let mutation = room.mutate(rng, &mutation_config)?;
                let penalty = room.evaluate_penalty()?;
                if penalty > baseline {
                    room.revert(&mutation)?;
                }
                Ok(())
            })
            .collect::<Result<Vec<()>>>()?;

        //single serialization point for the shared best record
        let leader = self
            .candidates
            .iter()
            .min_by_key(|room| NotNan::new(room.penalty).expect("penalty is NaN"))
            .expect("population is never empty");
        if leader.penalty < self.best.penalty {
            self.best = leader.save();
            debug!(
                "[RMHC-POP] generation {}: new best penalty {:.1}",
                self.n_generations.separate_with_commas(),
                self.best.penalty
            );
        }

        self.n_generations += 1;
        if self.best.penalty <= self.config.target_penalty {
            self.state = SearchState::Converged;
        } else if self.n_generations >= self.generation_budget {
            self.state = SearchState::Exhausted;
        }
        Ok(self.state)
    }

    /// Runs generations until a terminal state is reached and returns the best snapshot.
    pub fn solve(&mut self) -> Result<RoomSnapshot> {
        let start = Instant::now();
        let deadline = self.config.time_limit_sec.map(Duration::from_secs);

        while self.state == SearchState::Running {
            if let Some(limit) = deadline
                && start.elapsed() >= limit
            {
                info!(
                    "[RMHC-POP] time limit reached after {} generations",
                    self.n_generations
                );
                self.state = SearchState::Exhausted;
                break;
            }
            self.run_generation()?;
        }

        info!(
            "[RMHC-POP] finished in {:.3}ms ({} generations x {} candidates): {:?}, best penalty {:.1}",
            start.elapsed().as_secs_f64() * 1000.0,
            self.n_generations.separate_with_commas(),
            self.candidates.len(),
            self.state,
            self.best.penalty
        );
        Ok(self.best.clone())
    }
}
