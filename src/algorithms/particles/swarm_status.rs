use serde::{Deserialize, Serialize};

use crate::{algorithms::particles::Swarm, core::Point, Float};

/// The state of a particle swarm optimization, as seen by observers and kept by the optimizer
/// after a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SwarmStatus {
    /// The best position found by any particle so far
    pub gbest: Point,
    /// The swarm
    pub swarm: Swarm,
    /// The neighbour set of every particle from the most recent iteration (empty for the global
    /// topology)
    pub neighbors: Vec<Vec<usize>>,
    /// The number of completed iterations
    pub iteration: usize,
    /// The number of function evaluations
    pub n_f_evals: usize,
    /// The best cost after each iteration
    pub cost_history: Vec<Float>,
    /// The mean personal best cost after each iteration
    pub mean_pbest_history: Vec<Float>,
    /// The mean neighbourhood best cost after each iteration
    pub mean_neighbor_history: Vec<Float>,
    /// A message containing information about the condition of the swarm
    pub message: String,
}

impl SwarmStatus {
    /// Create a fresh status around an uninitialized swarm.
    pub fn new(swarm: Swarm) -> Self {
        Self {
            swarm,
            ..Default::default()
        }
    }
    /// The best cost found so far (`+inf` before anything was evaluated).
    pub fn best_cost(&self) -> Float {
        self.gbest.cost()
    }
    /// Replace the swarm best with the best personal best if the latter is strictly lower.
    /// Returns `true` if the swarm best changed.
    pub fn update_gbest(&mut self) -> bool {
        if let Some(i) = self.swarm.best_index() {
            let best = &self.swarm.particles[i].best;
            if best.fx.is_some_and(|fx| self.gbest.is_improved_by(fx)) {
                self.gbest = best.clone();
                return true;
            }
        }
        false
    }
    /// Clear all run results, keeping the swarm's configuration.
    pub fn reset(&mut self) {
        self.gbest = Point::default();
        self.swarm.particles = vec![];
        self.neighbors = vec![];
        self.iteration = 0;
        self.n_f_evals = 0;
        self.cost_history = vec![];
        self.mean_pbest_history = vec![];
        self.mean_neighbor_history = vec![];
        self.message = String::new();
    }
    /// Update the status message.
    pub fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}
