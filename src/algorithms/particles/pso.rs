use std::sync::Arc;

use fastrand::Rng;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::{
        swarm::mean, PSOOptions, Swarm, SwarmPositionInitializer, SwarmStatus, SwarmTopology,
        SwarmVelocityInitializer,
    },
    core::{Bounds, OptimizationResult},
    error::{OptimizeError, SwarmError},
    traits::{CostFunction, Observer},
    DVector, Float,
};

/// How much an optimization run reports through the [`log`] facade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verbosity {
    /// Log nothing
    Quiet,
    /// Log a report once the run has finished
    #[default]
    Summary,
    /// Log a progress line every `print_step` iterations as well as the final report
    Progress,
}

/// Particle Swarm Optimizer
///
/// The PSO algorithm involves an ensemble of particles which are aware of the position of all or
/// nearby particles in the swarm. The general algorithm involves updating each particle's velocity
/// as follows:
///
/// ```math
/// v_i^{t+1} = \omega v_i^t + c_1 r_{1,i}^{t+1}(p^t_i - x^t_i) + c_2 r_{2,i}^{t+1}(g^t_i - x^t_i)
/// ```
/// where $`r_1`$ and $`r_2`$ are uniformly distributed random vectors in $`[0,1)`$, $`\omega`$ is
/// an inertial weight parameter, $`c_1`$ and $`c_2`$ are cognitive and social weights
/// respectively, $`p_i^t`$ is the particle's personal best position, and $`g_i^t`$ is either the
/// swarm's best position ([`GlobalBestPSO`]) or the best personal best among the particle's `k`
/// nearest neighbours ([`LocalBestPSO`]). After the velocity update every particle moves to
/// $`x_i^{t+1} = x_i^t + v_i^{t+1}`$, clamped into the bounds if there are any. See [^1] for
/// more information.
///
/// Every call to [`PSO::optimize`] starts from a freshly initialized swarm. If a seed was set
/// with [`PSO::with_seed`], the random number generator is reseeded at the start of every call,
/// so repeated calls reproduce the same run.
///
/// [^1]: [Houssein, E. H., Gad, A. G., Hussain, K., & Suganthan, P. N. (2021). Major Advances in Particle Swarm Optimization: Theory, Analysis, and Application. In Swarm and Evolutionary Computation (Vol. 63, p. 100868). Elsevier BV.](https://doi.org/10.1016/j.swevo.2021.100868)
pub struct PSO<U = ()> {
    swarm: Swarm,
    options: PSOOptions,
    seed: Option<u64>,
    print_step: usize,
    verbosity: Verbosity,
    status: SwarmStatus,
    observers: Vec<Arc<RwLock<dyn Observer<U>>>>,
}

impl<U> std::fmt::Debug for PSO<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PSO")
            .field("swarm", &self.swarm)
            .field("options", &self.options)
            .field("seed", &self.seed)
            .field("print_step", &self.print_step)
            .field("verbosity", &self.verbosity)
            .field("status", &self.status)
            .field("n_observers", &self.observers.len())
            .finish()
    }
}

/// Returns `true` if the zero-based iteration `i` gets a progress line, which happens at
/// iterations `1, 1 + print_step, 1 + 2 * print_step, ...` when counted from one.
const fn is_progress_iteration(i: usize, print_step: usize) -> bool {
    i % print_step == 0
}

/// Constructor for a [`PSO`] where every particle follows the best position found by the whole
/// swarm.
pub struct GlobalBestPSO;

impl GlobalBestPSO {
    /// Create a global-best optimizer with `n_particles` particles in a `dimension`-dimensional
    /// space. Only `c1`, `c2`, `w` (and optionally the velocity clamp) of the options are used.
    ///
    /// # Errors
    ///
    /// Returns a [`SwarmError`] if the swarm size is zero, the options are out of range, or the
    /// bounds do not match `dimension`.
    #[allow(clippy::new_ret_no_self)]
    pub fn new<U>(
        n_particles: usize,
        dimension: usize,
        options: PSOOptions,
        bounds: Option<Bounds>,
    ) -> Result<PSO<U>, SwarmError> {
        options.validate()?;
        let swarm = Swarm::new(n_particles, dimension, bounds, SwarmTopology::Global)?;
        Ok(PSO::from_parts(swarm, options))
    }
}

/// Constructor for a [`PSO`] where every particle follows the best position found by its `k`
/// nearest neighbours.
pub struct LocalBestPSO;

impl LocalBestPSO {
    /// Create a local-best optimizer with `n_particles` particles in a `dimension`-dimensional
    /// space. The options must set `k` (with `1 <= k <= n_particles`) and `p` (`p >= 1`).
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::MissingOption`] if `k` or `p` is unset, and any of the errors of
    /// [`GlobalBestPSO::new`].
    #[allow(clippy::new_ret_no_self)]
    pub fn new<U>(
        n_particles: usize,
        dimension: usize,
        options: PSOOptions,
        bounds: Option<Bounds>,
    ) -> Result<PSO<U>, SwarmError> {
        if n_particles == 0 || dimension == 0 {
            return Err(SwarmError::InvalidSwarmSize {
                n_particles,
                dimension,
            });
        }
        let (k, p) = options.validate_local(n_particles)?;
        let swarm = Swarm::new(
            n_particles,
            dimension,
            bounds,
            SwarmTopology::KNearest { k, p },
        )?;
        Ok(PSO::from_parts(swarm, options))
    }
}

impl<U> PSO<U> {
    fn from_parts(swarm: Swarm, options: PSOOptions) -> Self {
        Self {
            status: SwarmStatus::new(swarm.clone()),
            swarm,
            options,
            seed: None,
            print_step: 1,
            verbosity: Verbosity::default(),
            observers: Vec::default(),
        }
    }
    /// Seed the random number generator. Every subsequent run starts from this seed.
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    /// Sets how often (in iterations) a progress line is logged with [`Verbosity::Progress`]
    /// (default = `1`). Must be positive.
    pub const fn with_print_step(mut self, print_step: usize) -> Self {
        self.print_step = print_step;
        self
    }
    /// Sets the [`Verbosity`] (default = [`Verbosity::Summary`]).
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
    /// Set the [`SwarmVelocityInitializer`] (default = [`SwarmVelocityInitializer::Zero`]).
    pub fn with_velocity_initializer(mut self, initializer: SwarmVelocityInitializer) -> Self {
        self.swarm.with_velocity_initializer(initializer);
        self
    }
    /// Set the [`SwarmPositionInitializer`] (default =
    /// [`SwarmPositionInitializer::RandomInBounds`]).
    pub fn with_position_initializer(mut self, initializer: SwarmPositionInitializer) -> Self {
        self.swarm.with_position_initializer(initializer);
        self
    }
    /// Add an [`Observer`] which is called at the end of every iteration.
    pub fn with_observer<O>(mut self, observer: Arc<RwLock<O>>) -> Self
    where
        O: Observer<U> + 'static,
    {
        self.observers.push(observer);
        self
    }
    /// The hyperparameters of the optimizer.
    pub const fn options(&self) -> &PSOOptions {
        &self.options
    }
    /// The bounds of the search space, if any.
    pub const fn bounds(&self) -> Option<&Bounds> {
        self.swarm.bounds.as_ref()
    }
    /// The topology used by the optimizer.
    pub const fn topology(&self) -> SwarmTopology {
        self.swarm.topology
    }
    /// The status left by the most recent successful run.
    pub const fn status(&self) -> &SwarmStatus {
        &self.status
    }
    /// Clear the stored status so that the best cost is `+inf` and the best position is empty.
    pub fn reset(&mut self) {
        self.status.reset();
    }

    /// Run the optimizer for exactly `iters` iterations and return the best cost and position
    /// observed over the whole run.
    ///
    /// Each iteration evaluates every particle with a single call to
    /// [`CostFunction::evaluate_batch`], updates the personal and swarm bests, notifies the
    /// observers and finally moves every particle. The stored [`SwarmStatus`] is only replaced
    /// once the run completes.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::Swarm`] if `iters` or the print step is zero, if an initializer
    /// is invalid or if the objective returns the wrong number of costs, and
    /// [`OptimizeError::Objective`] with the objective's own error if an evaluation fails.
    pub fn optimize<E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        iters: usize,
        user_data: &mut U,
    ) -> Result<OptimizationResult, OptimizeError<E>> {
        if iters == 0 {
            return Err(SwarmError::InvalidIterations.into());
        }
        if self.print_step == 0 {
            return Err(SwarmError::InvalidPrintStep.into());
        }
        let mut rng = self.seed.map_or_else(Rng::new, Rng::with_seed);
        let mut status = SwarmStatus::new(self.swarm.clone());
        status.swarm.initialize(&mut rng)?;
        status.update_message("Initialized");
        log::debug!(
            "Initialized {} particles in {} dimensions ({:?} topology)",
            status.swarm.n_particles,
            status.swarm.dimension,
            status.swarm.topology
        );

        for i in 0..iters {
            let positions = status.swarm.positions();
            let costs = func
                .evaluate_batch(&positions, user_data)
                .map_err(OptimizeError::Objective)?;
            status.swarm.update_personal_bests(&costs)?;
            status.n_f_evals += costs.len();
            status.update_gbest();

            let social = self.social_indices(&mut status, &positions);
            let mean_neighbor = social.as_ref().map_or_else(
                || status.best_cost(),
                |indices| {
                    mean(
                        indices
                            .iter()
                            .map(|&j| status.swarm.particles[j].best.cost()),
                    )
                },
            );
            status.cost_history.push(status.best_cost());
            status.mean_pbest_history.push(status.swarm.mean_pbest_cost());
            status.mean_neighbor_history.push(mean_neighbor);
            status.iteration = i + 1;

            if self.verbosity == Verbosity::Progress && is_progress_iteration(i, self.print_step) {
                log::info!(
                    "Iteration {}/{}, cost: {}",
                    i + 1,
                    iters,
                    status.best_cost()
                );
            }
            for observer in &self.observers {
                observer.write().callback(i, &status, user_data);
            }

            self.move_particles(&mut status, social.as_deref(), &mut rng);
        }

        status.update_message(&format!("Completed {} iterations", iters));
        if !status.gbest.is_evaluated() {
            log::warn!("No comparable cost was observed over {} iterations", iters);
        }
        if self.verbosity >= Verbosity::Summary {
            log::info!(
                "Optimization finished | best cost: {}, best pos: {:?}",
                status.best_cost(),
                status.gbest.x.as_slice()
            );
        }
        let (best_position, best_cost) = status.gbest.clone().destructure();
        let result = OptimizationResult {
            best_cost,
            best_position,
            iterations: status.iteration,
            cost_evals: status.n_f_evals,
            bounds: status.swarm.bounds.clone(),
            message: status.message.clone(),
        };
        self.status = status;
        Ok(result)
    }

    /// For the local topology, recompute the neighbour sets from `positions` and return the
    /// index of each particle's best neighbour. Returns `None` for the global topology.
    fn social_indices(
        &self,
        status: &mut SwarmStatus,
        positions: &[DVector<Float>],
    ) -> Option<Vec<usize>> {
        status.neighbors = status.swarm.topology.neighbors(positions)?;
        Some(
            status
                .neighbors
                .iter()
                .enumerate()
                .map(|(i, set)| status.swarm.best_among(set.iter().copied()).unwrap_or(i))
                .collect(),
        )
    }

    fn move_particles(
        &self,
        status: &mut SwarmStatus,
        social: Option<&[usize]>,
        rng: &mut Rng,
    ) {
        let targets: Option<Vec<DVector<Float>>> = social.map(|indices| {
            indices
                .iter()
                .map(|&j| status.swarm.particles[j].best.x.clone())
                .collect()
        });
        let weights = (self.options.c1, self.options.c2, self.options.w);
        let gbest = &status.gbest;
        let bounds = status.swarm.bounds.as_ref();
        for (i, particle) in status.swarm.particles.iter_mut().enumerate() {
            let own;
            let target = match &targets {
                Some(targets) => &targets[i],
                None if gbest.is_evaluated() => &gbest.x,
                None => {
                    own = particle.best.x.clone();
                    &own
                }
            };
            particle.update_velocity(target, weights, self.options.velocity_clamp, rng);
            particle.update_position(bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;
    use crate::{
        algorithms::particles::TrackingObserver,
        test_functions::{DomainError, Rastrigin, Sphere},
        traits::FnObjective,
    };

    fn options() -> PSOOptions {
        PSOOptions::new(0.5, 0.3, 0.9)
    }

    fn rastrigin_bounds() -> Bounds {
        Bounds::new(vec![-5.12; 2], vec![5.12; 2]).unwrap()
    }

    struct Recording;
    impl CostFunction<Vec<Float>> for Recording {
        fn evaluate(&self, x: &DVector<Float>, seen: &mut Vec<Float>) -> Result<Float, Infallible> {
            let fx = (x[0] - 0.3).powi(2) + (x[1] + 0.7).powi(2) + 1.5;
            seen.push(fx);
            Ok(fx)
        }
    }

    struct ShortBatch;
    impl CostFunction for ShortBatch {
        fn evaluate(&self, x: &DVector<Float>, _: &mut ()) -> Result<Float, Infallible> {
            Ok(x.norm_squared())
        }
        fn evaluate_batch(
            &self,
            xs: &[DVector<Float>],
            user_data: &mut (),
        ) -> Result<Vec<Float>, Infallible> {
            xs.iter()
                .skip(1)
                .map(|x| self.evaluate(x, user_data))
                .collect()
        }
    }

    #[test]
    fn test_global_best_is_deterministic() {
        let run = || {
            let mut pso = GlobalBestPSO::new(10, 2, options(), Some(rastrigin_bounds()))
                .unwrap()
                .with_seed(42);
            pso.optimize(&Rastrigin, 100, &mut ()).unwrap()
        };
        let (a, b) = (run(), run());
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.best_position, b.best_position);

        let mut pso = GlobalBestPSO::new(10, 2, options(), Some(rastrigin_bounds()))
            .unwrap()
            .with_seed(42);
        let first = pso.optimize(&Rastrigin, 100, &mut ()).unwrap();
        let second = pso.optimize(&Rastrigin, 100, &mut ()).unwrap();
        assert_eq!(first.best_cost, a.best_cost);
        assert_eq!(first.best_cost, second.best_cost);
        assert_eq!(first.best_position, second.best_position);
        assert_eq!(pso.status().cost_history.len(), 100);
    }

    #[test]
    fn test_local_best_is_deterministic() {
        let run = || {
            let mut pso = LocalBestPSO::new(
                10,
                2,
                options().with_k(3).with_p(2),
                Some(rastrigin_bounds()),
            )
            .unwrap()
            .with_seed(7);
            let result = pso.optimize(&Rastrigin, 100, &mut ()).unwrap();
            (result, pso.status().neighbors.clone())
        };
        let ((a, na), (b, nb)) = (run(), run());
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.best_position, b.best_position);
        assert_eq!(na, nb);
    }

    #[test]
    fn test_best_cost_is_minimum_of_observed_costs() {
        for seed in 0..3 {
            let mut seen = Vec::new();
            let mut gbest = GlobalBestPSO::new(8, 2, options(), None)
                .unwrap()
                .with_seed(seed);
            let result = gbest.optimize(&Recording, 50, &mut seen).unwrap();
            assert_eq!(seen.len(), 8 * 50);
            assert_eq!(result.cost_evals, seen.len());
            let min = seen.iter().copied().fold(Float::INFINITY, Float::min);
            assert_eq!(result.best_cost, min);
            assert_relative_eq!(
                Recording.evaluate(&result.best_position, &mut Vec::new()).unwrap(),
                min
            );

            let mut seen = Vec::new();
            let mut lbest = LocalBestPSO::new(8, 2, options().with_k(2).with_p(1), None)
                .unwrap()
                .with_seed(seed);
            let result = lbest.optimize(&Recording, 50, &mut seen).unwrap();
            let min = seen.iter().copied().fold(Float::INFINITY, Float::min);
            assert_eq!(result.best_cost, min);
        }
    }

    #[test]
    fn test_global_best_rastrigin() {
        let best = (0..10)
            .map(|seed| {
                let mut pso = GlobalBestPSO::new(10, 2, options(), Some(rastrigin_bounds()))
                    .unwrap()
                    .with_seed(seed)
                    .with_verbosity(Verbosity::Quiet);
                pso.optimize(&Rastrigin, 1000, &mut ()).unwrap().best_cost
            })
            .fold(Float::INFINITY, Float::min);
        assert!(best.abs() < 1e-6);
    }

    #[test]
    fn test_local_best_rastrigin() {
        let best = (0..10)
            .map(|seed| {
                let mut pso = LocalBestPSO::new(
                    10,
                    2,
                    options().with_k(3).with_p(2),
                    Some(rastrigin_bounds()),
                )
                .unwrap()
                .with_seed(seed)
                .with_verbosity(Verbosity::Quiet);
                pso.optimize(&Rastrigin, 1000, &mut ()).unwrap().best_cost
            })
            .fold(Float::INFINITY, Float::min);
        assert!(best.abs() < 1e-6);
    }

    #[test]
    fn test_unbounded_sphere() {
        let best = (0..5)
            .map(|seed| {
                let mut pso = GlobalBestPSO::new(10, 2, options(), None)
                    .unwrap()
                    .with_seed(seed);
                pso.optimize(&Sphere, 1000, &mut ()).unwrap().best_cost
            })
            .fold(Float::INFINITY, Float::min);
        assert!(best.abs() < 1e-10);
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let bounds = Bounds::new(vec![-1.0, -2.0], vec![1.0, 0.5]).unwrap();
        let shifted = FnObjective(|x: &DVector<Float>| {
            x.iter().map(|xi| (xi - 3.0).powi(2)).sum::<Float>()
        });
        for local in [false, true] {
            let tracker = TrackingObserver::build();
            let pso = if local {
                LocalBestPSO::new(10, 2, options().with_k(4).with_p(1), Some(bounds.clone()))
            } else {
                GlobalBestPSO::new(10, 2, options(), Some(bounds.clone()))
            };
            let mut pso = pso
                .unwrap()
                .with_seed(3)
                .with_velocity_initializer(SwarmVelocityInitializer::RandomInLimits(-10.0, 10.0))
                .with_observer(tracker.clone());
            let result = pso.optimize(&shifted, 100, &mut ()).unwrap();
            let tracker = tracker.read();
            assert_eq!(tracker.position_history.len(), 100);
            for positions in &tracker.position_history {
                assert_eq!(positions.len(), 10);
                assert!(positions.iter().all(|x| bounds.contains(x)));
            }
            assert!(bounds.contains(&result.best_position));
            assert_relative_eq!(result.best_position[0], 1.0, epsilon = 1e-6);
            assert_relative_eq!(result.best_position[1], 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_velocity_clamp() {
        let tracker = TrackingObserver::build();
        let mut pso = GlobalBestPSO::new(10, 2, options().with_velocity_clamp(-0.2, 0.2), None)
            .unwrap()
            .with_seed(11)
            .with_observer(tracker.clone());
        pso.optimize(&Sphere, 50, &mut ()).unwrap();
        // the first snapshot holds the zero initial velocities
        for velocities in &tracker.read().velocity_history {
            assert!(velocities.iter().flatten().all(|v| v.abs() <= 0.2));
        }
    }

    #[test]
    fn test_neighbor_sets() {
        let mut pso = LocalBestPSO::new(12, 3, options().with_k(4).with_p(2), None)
            .unwrap()
            .with_seed(5);
        pso.optimize(&Sphere, 20, &mut ()).unwrap();
        let neighbors = &pso.status().neighbors;
        assert_eq!(neighbors.len(), 12);
        for (i, set) in neighbors.iter().enumerate() {
            assert_eq!(set.len(), 4);
            assert_eq!(set[0], i);
            let mut sorted = set.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 4);
            assert!(set.iter().all(|&j| j < 12));
        }
        let mut pso = GlobalBestPSO::new(12, 3, options(), None).unwrap();
        pso.optimize(&Sphere, 5, &mut ()).unwrap();
        assert!(pso.status().neighbors.is_empty());
    }

    #[test]
    fn test_configuration_errors() {
        let err = GlobalBestPSO::new::<()>(0, 2, options(), None).unwrap_err();
        assert!(err.is_configuration_error());
        let err = LocalBestPSO::new::<()>(10, 0, options().with_k(2).with_p(2), None).unwrap_err();
        assert!(matches!(err, SwarmError::InvalidSwarmSize { .. }));
        let err = LocalBestPSO::new::<()>(10, 2, options().with_p(2), None).unwrap_err();
        assert_eq!(err, SwarmError::MissingOption { name: "k" });
        let err = LocalBestPSO::new::<()>(10, 2, options().with_k(2), None).unwrap_err();
        assert_eq!(err, SwarmError::MissingOption { name: "p" });
        let err = LocalBestPSO::new::<()>(10, 2, options().with_k(11).with_p(2), None).unwrap_err();
        assert!(err.is_configuration_error());
        let bounds = Bounds::new(vec![-1.0; 3], vec![1.0; 3]).unwrap();
        let err = GlobalBestPSO::new::<()>(10, 2, options(), Some(bounds)).unwrap_err();
        assert!(err.is_dimension_error());
        let err = GlobalBestPSO::new::<()>(10, 2, PSOOptions::new(-1.0, 0.3, 0.9), None)
            .unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_run_errors_leave_no_swarm() {
        let mut pso = GlobalBestPSO::new(10, 2, options(), None).unwrap();
        let err = pso.optimize(&Sphere, 0, &mut ()).unwrap_err();
        assert_eq!(err.as_swarm_error(), Some(&SwarmError::InvalidIterations));
        assert!(pso.status().swarm.particles.is_empty());

        let mut pso = pso.with_print_step(0);
        let err = pso.optimize(&Sphere, 10, &mut ()).unwrap_err();
        assert_eq!(err.as_swarm_error(), Some(&SwarmError::InvalidPrintStep));
        assert!(pso.status().swarm.particles.is_empty());

        let mut pso = GlobalBestPSO::new(2, 2, options(), None)
            .unwrap()
            .with_position_initializer(SwarmPositionInitializer::Custom(vec![dvector![0.0, 0.0]]));
        let err = pso.optimize(&Sphere, 10, &mut ()).unwrap_err();
        assert!(err.as_swarm_error().is_some_and(SwarmError::is_dimension_error));
        assert!(pso.status().swarm.particles.is_empty());

        let mut pso = GlobalBestPSO::new(10, 2, options(), None)
            .unwrap()
            .with_velocity_initializer(SwarmVelocityInitializer::RandomInLimits(1.0, -1.0));
        let err = pso.optimize(&Sphere, 10, &mut ()).unwrap_err();
        assert!(err.as_swarm_error().is_some_and(SwarmError::is_configuration_error));
    }

    #[test]
    fn test_wrong_number_of_costs() {
        let mut pso = GlobalBestPSO::new(10, 2, options(), None).unwrap();
        let err = pso.optimize(&ShortBatch, 10, &mut ()).unwrap_err();
        assert_eq!(
            err.as_swarm_error(),
            Some(&SwarmError::DimensionMismatch {
                context: "cost vector",
                expected: 10,
                got: 9
            })
        );
    }

    #[test]
    fn test_objective_errors_propagate() {
        let mut pso = GlobalBestPSO::new(2, 2, options(), None)
            .unwrap()
            .with_position_initializer(SwarmPositionInitializer::Custom(vec![
                dvector![0.0, 0.0],
                dvector![6.0, 0.0],
            ]));
        let err = pso.optimize(&Rastrigin, 10, &mut ()).unwrap_err();
        assert_eq!(
            err.into_objective(),
            Some(DomainError {
                function: "Rastrigin",
                index: 0,
                value: 6.0,
                limit: 5.12
            })
        );
    }

    #[test]
    fn test_histories_and_reset() {
        let mut pso = LocalBestPSO::new(10, 2, options().with_k(3).with_p(2), None)
            .unwrap()
            .with_seed(9)
            .with_verbosity(Verbosity::Progress)
            .with_print_step(10);
        let result = pso.optimize(&Sphere, 60, &mut ()).unwrap();
        let status = pso.status();
        assert_eq!(result.iterations, 60);
        assert_eq!(status.iteration, 60);
        assert_eq!(status.n_f_evals, 600);
        assert_eq!(status.cost_history.len(), 60);
        assert_eq!(status.mean_pbest_history.len(), 60);
        assert_eq!(status.mean_neighbor_history.len(), 60);
        assert!(status.cost_history.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(status.cost_history.last(), Some(&result.best_cost));
        for ((best, pbest), nbest) in status
            .cost_history
            .iter()
            .zip(&status.mean_pbest_history)
            .zip(&status.mean_neighbor_history)
        {
            assert!(best - nbest <= 1e-12);
            assert!(nbest <= pbest);
        }
        assert_eq!(result.message, "Completed 60 iterations");

        pso.reset();
        assert!(pso.status().best_cost().is_infinite());
        assert_eq!(pso.status().gbest.x.len(), 0);
        assert!(pso.status().cost_history.is_empty());
    }

    #[test]
    fn test_progress_iterations() {
        let selected = |iters: usize, step: usize| {
            (0..iters)
                .filter(|&i| is_progress_iteration(i, step))
                .map(|i| i + 1)
                .collect::<Vec<_>>()
        };
        assert_eq!(selected(25, 10), vec![1, 11, 21]);
        assert_eq!(selected(3, 1), vec![1, 2, 3]);
        assert_eq!(selected(5, 100), vec![1]);
    }

    #[test]
    fn test_debug_skips_observers() {
        let pso = GlobalBestPSO::new::<()>(4, 2, options(), None)
            .unwrap()
            .with_seed(3)
            .with_observer(TrackingObserver::build());
        let text = format!("{:?}", pso);
        assert!(text.contains("seed: Some(3)"));
        assert!(text.contains("n_observers: 1"));
    }

    #[test]
    fn test_global_neighbor_history_tracks_best() {
        let mut pso = GlobalBestPSO::new(10, 2, options(), None).unwrap().with_seed(1);
        pso.optimize(&Sphere, 20, &mut ()).unwrap();
        let status = pso.status();
        assert_eq!(status.mean_neighbor_history, status.cost_history);
    }

    #[test]
    fn test_nan_objective_keeps_running() {
        let nan = FnObjective(|_: &DVector<Float>| Float::NAN);
        let mut pso = LocalBestPSO::new(5, 2, options().with_k(2).with_p(2), None)
            .unwrap()
            .with_seed(0);
        let result = pso.optimize(&nan, 10, &mut ()).unwrap();
        assert!(result.best_cost.is_infinite());
        assert_eq!(result.best_position.len(), 0);
        let mut pso = GlobalBestPSO::new(5, 2, options(), None).unwrap().with_seed(0);
        let result = pso.optimize(&nan, 10, &mut ()).unwrap();
        assert!(result.best_cost.is_infinite());
        assert!(pso.status().swarm.positions().iter().all(|x| x.len() == 2));
    }
}
