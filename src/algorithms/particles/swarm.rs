use std::cmp::Ordering;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        utils::{generate_random_vector, SampleFloat},
        Bounds, Point,
    },
    error::SwarmError,
    DVector, Float,
};

use super::SwarmTopology;

/// The range used for each coordinate when a swarm without bounds is initialized.
pub const DEFAULT_INIT_RANGE: (Float, Float) = (-1.0, 1.0);

/// A swarm of particles used in particle swarm optimization.
///
/// The swarm owns its configuration (size, dimension, bounds, topology and initializers) as well
/// as the particles themselves, which are created by [`Swarm::initialize`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Swarm {
    /// The number of particles
    pub n_particles: usize,
    /// The dimension of the search space
    pub dimension: usize,
    /// The box every particle is kept inside, if any
    pub bounds: Option<Bounds>,
    /// A list of the particles in the swarm
    pub particles: Vec<SwarmParticle>,
    /// The topology used by the swarm
    pub topology: SwarmTopology,
    /// The position initializer used by the swarm
    pub position_initializer: SwarmPositionInitializer,
    /// The velocity initializer used by the swarm
    pub velocity_initializer: SwarmVelocityInitializer,
}

impl Swarm {
    /// Create an empty swarm of `n_particles` particles in a `dimension`-dimensional space.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::InvalidSwarmSize`] if either size is zero, and
    /// [`SwarmError::BoundsShape`] if the bounds have a different dimension.
    pub fn new(
        n_particles: usize,
        dimension: usize,
        bounds: Option<Bounds>,
        topology: SwarmTopology,
    ) -> Result<Self, SwarmError> {
        if n_particles == 0 || dimension == 0 {
            return Err(SwarmError::InvalidSwarmSize {
                n_particles,
                dimension,
            });
        }
        if let Some(bounds) = &bounds {
            bounds.check_dimension(dimension)?;
        }
        Ok(Self {
            n_particles,
            dimension,
            bounds,
            particles: Vec::default(),
            topology,
            position_initializer: SwarmPositionInitializer::default(),
            velocity_initializer: SwarmVelocityInitializer::default(),
        })
    }
    /// Set the [`SwarmVelocityInitializer`].
    pub fn with_velocity_initializer(
        &mut self,
        velocity_initializer: SwarmVelocityInitializer,
    ) -> &mut Self {
        self.velocity_initializer = velocity_initializer;
        self
    }
    /// Set the [`SwarmPositionInitializer`].
    pub fn with_position_initializer(
        &mut self,
        position_initializer: SwarmPositionInitializer,
    ) -> &mut Self {
        self.position_initializer = position_initializer;
        self
    }
    /// Check that the configured initializers are compatible with the swarm's shape and bounds.
    ///
    /// # Errors
    ///
    /// See [`SwarmPositionInitializer::validate`] and [`SwarmVelocityInitializer::validate`].
    pub fn validate(&self) -> Result<(), SwarmError> {
        self.position_initializer
            .validate(self.n_particles, self.dimension, self.bounds.as_ref())?;
        self.velocity_initializer.validate()
    }
    /// Create the particles of the swarm using the given random number generator, replacing any
    /// existing ones. New particles are unevaluated and their personal best is their starting
    /// position.
    ///
    /// # Errors
    ///
    /// Returns an error if the initializers are invalid, see [`Swarm::validate`].
    pub fn initialize(&mut self, rng: &mut Rng) -> Result<(), SwarmError> {
        self.validate()?;
        let positions = self.position_initializer.init_positions(
            rng,
            self.dimension,
            self.n_particles,
            self.bounds.as_ref(),
        );
        let velocities =
            self.velocity_initializer
                .init_velocities(rng, self.dimension, self.n_particles);
        self.particles = positions
            .into_iter()
            .zip(velocities)
            .map(|(position, velocity)| SwarmParticle::new(position, velocity))
            .collect();
        Ok(())
    }
    /// The current position of every particle, in order.
    pub fn positions(&self) -> Vec<DVector<Float>> {
        self.particles.iter().map(|p| p.position.x.clone()).collect()
    }
    /// The current velocity of every particle, in order.
    pub fn velocities(&self) -> Vec<DVector<Float>> {
        self.particles.iter().map(|p| p.velocity.clone()).collect()
    }
    /// Record the costs of the current positions and update every personal best.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::DimensionMismatch`] if there is not exactly one cost per particle,
    /// in which case no particle is modified.
    pub fn update_personal_bests(&mut self, costs: &[Float]) -> Result<(), SwarmError> {
        if costs.len() != self.particles.len() {
            return Err(SwarmError::DimensionMismatch {
                context: "cost vector",
                expected: self.particles.len(),
                got: costs.len(),
            });
        }
        for (particle, &cost) in self.particles.iter_mut().zip(costs) {
            particle.record_cost(cost);
        }
        Ok(())
    }
    /// Index of the particle with the lowest personal best among `indices`, with ties resolved
    /// towards the lowest index.
    pub fn best_among(&self, indices: impl IntoIterator<Item = usize>) -> Option<usize> {
        indices.into_iter().min_by(|&a, &b| {
            self.particles[a]
                .total_cmp(&self.particles[b])
                .then(a.cmp(&b))
        })
    }
    /// Index of the particle with the lowest personal best in the whole swarm.
    pub fn best_index(&self) -> Option<usize> {
        self.best_among(0..self.particles.len())
    }
    /// The mean personal best cost over the swarm.
    pub fn mean_pbest_cost(&self) -> Float {
        mean(self.particles.iter().map(|p| p.best.cost()))
    }
}

pub(crate) fn mean(values: impl ExactSizeIterator<Item = Float>) -> Float {
    let n = values.len();
    if n == 0 {
        return Float::NAN;
    }
    values.sum::<Float>() / n as Float
}

/// Methods to initialize the positions of particles in a swarm.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum SwarmPositionInitializer {
    /// Uniform random positions inside the bounds, or inside [`DEFAULT_INIT_RANGE`] in every
    /// dimension if the swarm is unbounded
    #[default]
    RandomInBounds,
    /// Custom distribution from a given vector of positions, one per particle
    Custom(Vec<DVector<Float>>),
    /// Latin Hypercube sampling inside the bounds (or [`DEFAULT_INIT_RANGE`])
    LatinHypercube,
}

impl SwarmPositionInitializer {
    /// Check that the initializer can produce `n_particles` positions of length `dimension`.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::DimensionMismatch`] if a custom position set has the wrong number of
    /// positions or a position of the wrong length, and [`SwarmError::InvalidOption`] if a custom
    /// position lies outside the bounds.
    pub fn validate(
        &self,
        n_particles: usize,
        dimension: usize,
        bounds: Option<&Bounds>,
    ) -> Result<(), SwarmError> {
        if let Self::Custom(positions) = self {
            if positions.len() != n_particles {
                return Err(SwarmError::DimensionMismatch {
                    context: "custom positions",
                    expected: n_particles,
                    got: positions.len(),
                });
            }
            for position in positions {
                if position.len() != dimension {
                    return Err(SwarmError::DimensionMismatch {
                        context: "custom position",
                        expected: dimension,
                        got: position.len(),
                    });
                }
                if let Some(bounds) = bounds {
                    if !bounds.contains(position) {
                        return Err(SwarmError::InvalidOption {
                            name: "custom position",
                            value: format!("{:?}", position.as_slice()),
                            reason: "must lie inside the bounds",
                        });
                    }
                }
            }
        }
        Ok(())
    }
    /// Initialize the positions of the particles in the swarm using the given random number
    /// generator.
    pub fn init_positions(
        &self,
        rng: &mut Rng,
        dimension: usize,
        n_particles: usize,
        bounds: Option<&Bounds>,
    ) -> Vec<DVector<Float>> {
        match self {
            Self::RandomInBounds => (0..n_particles)
                .map(|_| match bounds {
                    Some(bounds) => bounds.random_vector(rng),
                    None => generate_random_vector(
                        dimension,
                        DEFAULT_INIT_RANGE.0,
                        DEFAULT_INIT_RANGE.1,
                        rng,
                    ),
                })
                .collect(),
            Self::Custom(positions) => positions.clone(),
            Self::LatinHypercube => {
                let limits = bounds.map_or_else(
                    || vec![DEFAULT_INIT_RANGE; dimension],
                    |bounds| bounds.limits(),
                );
                let mut lhs_matrix = vec![vec![0.0; dimension]; n_particles];
                for (d, &(min, max)) in limits.iter().enumerate() {
                    let mut bins: Vec<usize> = (0..n_particles).collect();
                    rng.shuffle(&mut bins);
                    let bin_size = (max - min) / n_particles as Float;
                    for (i, &bin) in bins.iter().enumerate() {
                        let lower = min + bin as Float * bin_size;
                        let upper = lower + bin_size;
                        lhs_matrix[i][d] = rng.range(lower, upper);
                    }
                }
                lhs_matrix.into_iter().map(DVector::from_vec).collect()
            }
        }
    }
}

/// Methods for setting the initial velocity of particles in a swarm
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SwarmVelocityInitializer {
    /// Initialize all velocities to zero
    #[default]
    Zero,
    /// Initialize every velocity component uniformly in `[min, max)`
    RandomInLimits(Float, Float),
}

impl SwarmVelocityInitializer {
    /// Check that the limits (if any) are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::InvalidOption`] if `min >= max` or either limit is not finite.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), SwarmError> {
        if let Self::RandomInLimits(min, max) = *self {
            if !(min < max) || !min.is_finite() || !max.is_finite() {
                return Err(SwarmError::InvalidOption {
                    name: "velocity initializer",
                    value: format!("({}, {})", min, max),
                    reason: "limits must be finite with min < max",
                });
            }
        }
        Ok(())
    }
    /// Initialize the velocities of the particles in the swarm using the given random number
    /// generator.
    pub fn init_velocities(
        &self,
        rng: &mut Rng,
        dimension: usize,
        n_particles: usize,
    ) -> Vec<DVector<Float>> {
        match *self {
            Self::Zero => (0..n_particles)
                .map(|_| DVector::zeros(dimension))
                .collect(),
            Self::RandomInLimits(min, max) => (0..n_particles)
                .map(|_| generate_random_vector(dimension, min, max, rng))
                .collect(),
        }
    }
}

/// A particle with a position, velocity, and best known position
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SwarmParticle {
    /// The current position of the particle
    pub position: Point,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position of the particle (as measured by the minimum value of `fx`)
    pub best: Point,
}

impl SwarmParticle {
    /// Create a new, unevaluated particle.
    pub fn new(position: DVector<Float>, velocity: DVector<Float>) -> Self {
        let position = Point::from(position);
        Self {
            best: position.clone(),
            position,
            velocity,
        }
    }
    /// Compare the best position to another particle
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.best.total_cmp(&other.best)
    }
    /// Set the cost of the current position, replacing the personal best if it is strictly
    /// lower.
    pub fn record_cost(&mut self, cost: Float) {
        self.position.fx = Some(cost);
        if self.best.is_improved_by(cost) {
            self.best = self.position.clone();
        }
    }
    /// Apply the canonical velocity update
    ///
    /// ```math
    /// v \leftarrow \omega v + c_1 r_1 (p - x) + c_2 r_2 (g - x)
    /// ```
    /// where `r1` and `r2` are drawn uniformly from `[0, 1)` in every dimension, then clamp each
    /// component into `clamp` if given.
    pub fn update_velocity(
        &mut self,
        social: &DVector<Float>,
        (c1, c2, w): (Float, Float, Float),
        clamp: Option<(Float, Float)>,
        rng: &mut Rng,
    ) {
        let dim = self.velocity.len();
        let rv1 = generate_random_vector(dim, 0.0, 1.0, rng);
        let rv2 = generate_random_vector(dim, 0.0, 1.0, rng);
        self.velocity = self.velocity.scale(w)
            + rv1
                .component_mul(&(&self.best.x - &self.position.x))
                .scale(c1)
            + rv2
                .component_mul(&(social - &self.position.x))
                .scale(c2);
        if let Some((min, max)) = clamp {
            self.velocity.iter_mut().for_each(|v| *v = v.clamp(min, max));
        }
    }
    /// Move the particle along its velocity, clamping the result into `bounds` if given. The
    /// new position is unevaluated.
    pub fn update_position(&mut self, bounds: Option<&Bounds>) {
        let mut new_position = &self.position.x + &self.velocity;
        if let Some(bounds) = bounds {
            bounds.clip(&mut new_position);
        }
        self.position.set_position(new_position);
    }
}
