use std::{fmt::Debug, sync::Arc};

use parking_lot::RwLock;

use crate::algorithms::particles::SwarmStatus;

/// A trait which holds a [`callback`](`Observer::callback`) function that can be used to inspect
/// a [`SwarmStatus`] after every iteration of an optimization.
///
/// Observers are registered with
/// [`PSO::with_observer`](`crate::algorithms::particles::PSO::with_observer`) as
/// `Arc<RwLock<_>>` handles so that the caller can keep a copy and read back whatever the
/// observer collected once the run is over.
pub trait Observer<U> {
    /// A function that is called at the end of every iteration, after the personal and global
    /// bests have been updated and before any particle moves.
    fn callback(&mut self, iteration: usize, status: &SwarmStatus, user_data: &U);
}

/// A debugging observer which logs the iteration, status, and any user data at the current
/// iteration.
///
/// # Usage:
///
/// ```rust
/// use shoal::prelude::*;
/// use shoal::test_functions::Sphere;
/// use shoal::traits::observer::DebugObserver;
///
/// let obs = DebugObserver::build();
/// let mut pso = GlobalBestPSO::new(5, 2, PSOOptions::new(0.5, 0.3, 0.9), None)
///     .unwrap()
///     .with_observer(obs);
/// let result = pso.optimize(&Sphere, 10, &mut ()).unwrap();
/// // ^ This will log debug messages for each iteration
/// assert_eq!(result.iterations, 10);
/// ```
pub struct DebugObserver;
impl DebugObserver {
    /// Finalize the [`Observer`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}
impl<U: Debug> Observer<U> for DebugObserver {
    fn callback(&mut self, iteration: usize, status: &SwarmStatus, user_data: &U) {
        log::debug!(
            "Iteration: {}\n{:#?}\nUser data: {:?}",
            iteration,
            status,
            user_data
        );
    }
}
