/// [`PSOOptions`] type holding the swarm hyperparameters.
pub mod options;
pub use options::PSOOptions;

/// Implementation of the global-best and local-best Particle Swarm Optimization (PSO) algorithms
pub mod pso;
pub use pso::{GlobalBestPSO, LocalBestPSO, Verbosity, PSO};

/// [`Swarm`] type for swarm-based optimizers.
pub mod swarm;
pub use swarm::{
    Swarm, SwarmParticle, SwarmPositionInitializer, SwarmVelocityInitializer, DEFAULT_INIT_RANGE,
};

/// [`SwarmStatus`] type for swarm-based optimizers.
pub mod swarm_status;
pub use swarm_status::SwarmStatus;

/// [`SwarmTopology`] type describing how particles share information.
pub mod topology;
pub use topology::SwarmTopology;

pub use crate::core::OptimizationResult;

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{core::Point, traits::Observer, DVector, Float};

/// An [`Observer`] which stores the positions and velocities of every particle at every
/// iteration, as well as the history of swarm best positions.
///
/// Snapshots are taken before the particles move, so `position_history[i]` holds the positions
/// evaluated during iteration `i`.
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct TrackingObserver {
    /// The positions of the particles at each iteration
    pub position_history: Vec<Vec<DVector<Float>>>,
    /// The velocities of the particles at each iteration
    pub velocity_history: Vec<Vec<DVector<Float>>>,
    /// The history of the best position in the swarm
    pub best_history: Vec<Point>,
}

impl TrackingObserver {
    /// Finalize the [`TrackingObserver`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl<U> Observer<U> for TrackingObserver {
    fn callback(&mut self, _iteration: usize, status: &SwarmStatus, _user_data: &U) {
        self.position_history.push(status.swarm.positions());
        self.velocity_history.push(status.swarm.velocities());
        self.best_history.push(status.gbest.clone());
    }
}
