use serde::{Deserialize, Serialize};

use furnish_rs::entities::{MutationConfig, PenaltyWeights};

/// Configuration for the RMHC optimizer
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct RmhcConfig {
    /// Total mutation budget; the run transitions to `Exhausted` once it is spent
    pub n_iterations: usize,
    /// The run transitions to `Converged` once the penalty reaches this value
    pub target_penalty: f64,
    /// Weights aggregating violations into the penalty
    pub weights: PenaltyWeights,
    /// Bounds for the random placement mutations
    pub mutation: MutationConfig,
    /// Seed for the PRNG. If undefined, the optimizer runs in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Optional delay between iterations in milliseconds. A rate limit for live
    /// visualization consumers, not part of the search control flow
    pub pace_ms: Option<u64>,
    /// Optional wall-clock limit in seconds, checked cooperatively between iterations
    pub time_limit_sec: Option<u64>,
    /// Number of independent candidates for the population variant; 1 runs the
    /// single-candidate hill climber
    pub n_candidates: usize,
    /// Also require clearance envelopes to be collision-free
    pub enforce_clearance: bool,
}

impl Default for RmhcConfig {
    fn default() -> Self {
        Self {
            n_iterations: 100_000,
            target_penalty: 0.0,
            weights: PenaltyWeights::default(),
            mutation: MutationConfig::default(),
            prng_seed: Some(0),
            pace_ms: None,
            time_limit_sec: None,
            n_candidates: 1,
            enforce_clearance: false,
        }
    }
}
