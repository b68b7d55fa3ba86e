use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::{GlobalBestPSO, LocalBestPSO, PSOOptions, Verbosity, PSO},
    core::Bounds,
    error::{OptimizeError, SwarmError},
    traits::CostFunction,
    Float,
};

/// The swarm variant to search over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PsoVariant {
    /// See [`GlobalBestPSO`]
    #[default]
    GlobalBest,
    /// See [`LocalBestPSO`]
    LocalBest,
}

/// Whether the best score is the lowest or the highest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchGoal {
    /// Pick the combination with the lowest best cost
    #[default]
    Minimize,
    /// Pick the combination with the highest best cost
    Maximize,
}

impl SearchGoal {
    fn is_better(self, candidate: Float, current: Float) -> bool {
        match self {
            Self::Minimize => candidate < current,
            Self::Maximize => candidate > current,
        }
    }
}

/// Candidate values for every hyperparameter.
///
/// Leaving `k` or `p` empty leaves that option unset in every combination, which is fine for
/// [`PsoVariant::GlobalBest`] but reported as a missing option for [`PsoVariant::LocalBest`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsGrid {
    /// Candidate cognitive weights
    pub c1: Vec<Float>,
    /// Candidate social weights
    pub c2: Vec<Float>,
    /// Candidate inertial weights
    pub w: Vec<Float>,
    /// Candidate neighbourhood sizes
    pub k: Vec<usize>,
    /// Candidate Minkowski orders
    pub p: Vec<u32>,
}

impl OptionsGrid {
    /// Create a grid from candidate values of the weights shared by every variant.
    pub const fn new(c1: Vec<Float>, c2: Vec<Float>, w: Vec<Float>) -> Self {
        Self {
            c1,
            c2,
            w,
            k: Vec::new(),
            p: Vec::new(),
        }
    }
    /// Sets the candidate neighbourhood sizes.
    pub fn with_k(mut self, k: Vec<usize>) -> Self {
        self.k = k;
        self
    }
    /// Sets the candidate Minkowski orders.
    pub fn with_p(mut self, p: Vec<u32>) -> Self {
        self.p = p;
        self
    }
    /// The number of combinations in the grid.
    pub fn len(&self) -> usize {
        self.c1.len() * self.c2.len() * self.w.len() * self.k.len().max(1) * self.p.len().max(1)
    }
    /// Checks if the grid has no combinations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Every combination of candidate values, varying `p` fastest and `c1` slowest.
    pub fn combinations(&self) -> Vec<PSOOptions> {
        let ks = optional(&self.k);
        let ps = optional(&self.p);
        let mut out = Vec::with_capacity(self.len());
        for &c1 in &self.c1 {
            for &c2 in &self.c2 {
                for &w in &self.w {
                    for &k in &ks {
                        for &p in &ps {
                            let mut options = PSOOptions::new(c1, c2, w);
                            options.k = k;
                            options.p = p;
                            out.push(options);
                        }
                    }
                }
            }
        }
        out
    }
}

fn optional<T: Copy>(values: &[T]) -> Vec<Option<T>> {
    if values.is_empty() {
        vec![None]
    } else {
        values.iter().copied().map(Some).collect()
    }
}

/// Exhaustive search over every hyperparameter combination of an [`OptionsGrid`].
///
/// ```rust
/// use shoal::prelude::*;
/// use shoal::search::{GridSearch, OptionsGrid, PsoVariant, SearchGoal};
/// use shoal::test_functions::Sphere;
///
/// let grid = OptionsGrid::new(vec![0.5, 1.0], vec![0.3, 1.0], vec![0.4, 0.9]);
/// let search = GridSearch::new(PsoVariant::GlobalBest, 10, 2, grid, 50).with_seed(0);
/// let (score, options) = search.search(&Sphere, &mut (), SearchGoal::Minimize).unwrap();
/// assert!(score < 1.0);
/// assert!([0.5, 1.0].contains(&options.c1));
/// ```
#[derive(Clone, Debug)]
pub struct GridSearch {
    variant: PsoVariant,
    n_particles: usize,
    dimension: usize,
    grid: OptionsGrid,
    iters: usize,
    bounds: Option<Bounds>,
    velocity_clamp: Option<(Float, Float)>,
    seed: Option<u64>,
}

impl GridSearch {
    /// Create a new search running `iters` iterations of the given variant for each combination.
    pub const fn new(
        variant: PsoVariant,
        n_particles: usize,
        dimension: usize,
        grid: OptionsGrid,
        iters: usize,
    ) -> Self {
        Self {
            variant,
            n_particles,
            dimension,
            grid,
            iters,
            bounds: None,
            velocity_clamp: None,
            seed: None,
        }
    }
    /// Bound every optimization.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
    /// Clamp velocities in every optimization.
    pub const fn with_velocity_clamp(mut self, min: Float, max: Float) -> Self {
        self.velocity_clamp = Some((min, max));
        self
    }
    /// Seed every optimization with the same seed.
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    /// The grid being searched.
    pub const fn grid(&self) -> &OptionsGrid {
        &self.grid
    }

    fn build<U>(&self, options: PSOOptions) -> Result<PSO<U>, SwarmError> {
        let options = match self.velocity_clamp {
            Some((min, max)) => options.with_velocity_clamp(min, max),
            None => options,
        };
        let pso = match self.variant {
            PsoVariant::GlobalBest => {
                GlobalBestPSO::new(self.n_particles, self.dimension, options, self.bounds.clone())
            }
            PsoVariant::LocalBest => {
                LocalBestPSO::new(self.n_particles, self.dimension, options, self.bounds.clone())
            }
        }?
        .with_verbosity(Verbosity::Quiet);
        Ok(match self.seed {
            Some(seed) => pso.with_seed(seed),
            None => pso,
        })
    }

    /// Run every combination and return the best score together with the options that
    /// produced it. The first combination wins ties.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::MissingOption`] if `c1`, `c2` or `w` has no candidates, the first
    /// configuration error of any combination, or any error raised while optimizing.
    pub fn search<U, E>(
        &self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        goal: SearchGoal,
    ) -> Result<(Float, PSOOptions), OptimizeError<E>> {
        for (name, empty) in [
            ("c1", self.grid.c1.is_empty()),
            ("c2", self.grid.c2.is_empty()),
            ("w", self.grid.w.is_empty()),
        ] {
            if empty {
                return Err(SwarmError::MissingOption { name }.into());
            }
        }
        let mut best: Option<(Float, PSOOptions)> = None;
        for options in self.grid.combinations() {
            let mut pso = self.build::<U>(options.clone())?;
            let (score, _) = pso.optimize(func, self.iters, user_data)?.destructure();
            log::debug!("Grid search: {:?} scored {}", options, score);
            let improved = match &best {
                Some((current, _)) => goal.is_better(score, *current),
                None => true,
            };
            if improved {
                best = Some((score, pso.options().clone()));
            }
        }
        best.ok_or_else(|| SwarmError::MissingOption { name: "c1" }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_functions::{Rastrigin, Sphere};

    fn grid() -> OptionsGrid {
        OptionsGrid::new(vec![0.5, 1.5], vec![0.3, 1.5], vec![0.2, 0.9])
    }

    #[test]
    fn test_cartesian_product() {
        let local_grid = grid().with_k(vec![2, 3]).with_p(vec![1]);
        assert_eq!(local_grid.len(), 16);
        let combos = local_grid.combinations();
        assert_eq!(combos.len(), 16);
        assert_eq!(combos[0], PSOOptions::new(0.5, 0.3, 0.2).with_k(2).with_p(1));
        assert_eq!(combos[1], PSOOptions::new(0.5, 0.3, 0.2).with_k(3).with_p(1));
        assert_eq!(combos[15], PSOOptions::new(1.5, 1.5, 0.9).with_k(3).with_p(1));
        let plain = grid().combinations();
        assert_eq!(plain.len(), 8);
        assert!(plain.iter().all(|o| o.k.is_none() && o.p.is_none()));
        assert!(OptionsGrid::default().is_empty());
    }

    #[test]
    fn test_search_picks_best_combination() {
        let search = GridSearch::new(PsoVariant::GlobalBest, 8, 2, grid(), 30).with_seed(4);
        let scores = grid()
            .combinations()
            .into_iter()
            .map(|options| {
                let mut pso = GlobalBestPSO::new(8, 2, options, None).unwrap().with_seed(4);
                pso.optimize(&Sphere, 30, &mut ()).unwrap().best_cost
            })
            .collect::<Vec<_>>();
        let min = scores.iter().copied().fold(Float::INFINITY, Float::min);
        let max = scores.iter().copied().fold(Float::NEG_INFINITY, Float::max);

        let (score, options) = search.search(&Sphere, &mut (), SearchGoal::Minimize).unwrap();
        assert_eq!(score, min);
        let index = scores.iter().position(|&s| s == min).unwrap();
        assert_eq!(options, grid().combinations()[index]);

        let (score, options) = search.search(&Sphere, &mut (), SearchGoal::Maximize).unwrap();
        assert_eq!(score, max);
        let index = scores.iter().position(|&s| s == max).unwrap();
        assert_eq!(options, grid().combinations()[index]);
    }

    #[test]
    fn test_local_search_with_bounds() {
        let bounds = Bounds::new(vec![-5.12; 2], vec![5.12; 2]).unwrap();
        let search = GridSearch::new(
            PsoVariant::LocalBest,
            10,
            2,
            grid().with_k(vec![2, 5]).with_p(vec![1, 2]),
            20,
        )
        .with_bounds(bounds)
        .with_velocity_clamp(-1.0, 1.0)
        .with_seed(0);
        let (score, options) = search.search(&Rastrigin, &mut (), SearchGoal::Minimize).unwrap();
        assert!(score.is_finite());
        assert!(options.k.is_some() && options.p.is_some());
        assert_eq!(options.velocity_clamp, Some((-1.0, 1.0)));
    }

    #[test]
    fn test_invalid_combinations() {
        let search = GridSearch::new(PsoVariant::LocalBest, 4, 2, grid(), 10);
        let err = search.search(&Sphere, &mut (), SearchGoal::Minimize).unwrap_err();
        assert_eq!(err.as_swarm_error(), Some(&SwarmError::MissingOption { name: "k" }));

        let search = GridSearch::new(
            PsoVariant::LocalBest,
            4,
            2,
            grid().with_k(vec![2, 8]).with_p(vec![2]),
            10,
        );
        let err = search.search(&Sphere, &mut (), SearchGoal::Minimize).unwrap_err();
        assert!(err.as_swarm_error().is_some_and(SwarmError::is_configuration_error));

        let search = GridSearch::new(
            PsoVariant::GlobalBest,
            4,
            2,
            OptionsGrid::new(vec![], vec![0.3], vec![0.9]),
            10,
        );
        let err = search.search(&Sphere, &mut (), SearchGoal::Minimize).unwrap_err();
        assert_eq!(err.as_swarm_error(), Some(&SwarmError::MissingOption { name: "c1" }));
    }
}
