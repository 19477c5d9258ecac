//! Ant colony heuristic configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANTS_PER_NODE, DEFAULT_COLONY_ALPHA, DEFAULT_COLONY_BETA, DEFAULT_COLONY_DECAY,
    DEFAULT_COLONY_ITERATIONS, DEFAULT_N_BEST,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Ants per graph node. Default: 2.
    pub ants_per_node: Option<usize>,
    /// Shortest tours reinforced per iteration. Default: 2.
    pub n_best: Option<usize>,
    /// Iterations. Default: 100.
    pub iterations: Option<usize>,
    /// Pheromone retention factor per iteration, in (0, 1]. Default: 0.85.
    pub decay: Option<f64>,
    /// Pheromone exponent. Default: -1.0.
    pub alpha: Option<f64>,
    /// Inverse-distance exponent. Default: 1.0.
    pub beta: Option<f64>,
    /// RNG seed. Unset means seeded from entropy.
    pub seed: Option<u64>,
}

impl ColonyConfig {
    pub fn effective_ants_per_node(&self) -> usize {
        self.ants_per_node.unwrap_or(DEFAULT_ANTS_PER_NODE)
    }

    pub fn effective_n_best(&self) -> usize {
        self.n_best.unwrap_or(DEFAULT_N_BEST)
    }

    pub fn effective_iterations(&self) -> usize {
        self.iterations.unwrap_or(DEFAULT_COLONY_ITERATIONS)
    }

    pub fn effective_decay(&self) -> f64 {
        self.decay.unwrap_or(DEFAULT_COLONY_DECAY)
    }

    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(DEFAULT_COLONY_ALPHA)
    }

    pub fn effective_beta(&self) -> f64 {
        self.beta.unwrap_or(DEFAULT_COLONY_BETA)
    }
}
