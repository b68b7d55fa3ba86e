//! `shoal` provides particle swarm optimization (PSO) of real-valued functions
//! $`f(\mathbb{R}^n) \to \mathbb{R}`$ with a small, trait-based interface. Two classic
//! variants are available:
//!
//! * [`GlobalBestPSO`](algorithms::particles::GlobalBestPSO), where every particle is pulled
//!   toward the best position found by the entire swarm, and
//! * [`LocalBestPSO`](algorithms::particles::LocalBestPSO), where every particle is pulled toward
//!   the best position found among its `k` nearest neighbors.
//!
//! Both work with or without per-dimension [`Bounds`](core::Bounds).
//!
//! # Quick Start
//!
//! Implement [`CostFunction`](traits::CostFunction) for your problem (or use one of the
//! [`test_functions`]), construct an optimizer, and call `optimize`:
//!
//! ```rust
//! use shoal::prelude::*;
//! use shoal::test_functions::Sphere;
//!
//! let options = PSOOptions::new(0.5, 0.3, 0.9);
//! let mut pso = GlobalBestPSO::new(10, 2, options, None).unwrap().with_seed(0);
//! let result = pso.optimize(&Sphere, 1000, &mut ()).unwrap();
//! assert!(result.best_cost < 1e-4);
//! ```
//!
//! # Bounds
//!
//! Bounds are given as a pair of vectors `(min, max)`, one entry per dimension. Particles are
//! initialized uniformly inside the bounds and clamped back onto them whenever a position update
//! would carry them outside:
//!
//! ```rust
//! use shoal::prelude::*;
//! use shoal::test_functions::Rastrigin;
//!
//! let bounds = Bounds::new(vec![-5.12; 2], vec![5.12; 2]).unwrap();
//! let options = PSOOptions::new(0.5, 0.3, 0.9).with_k(3).with_p(2);
//! let mut pso = LocalBestPSO::new(10, 2, options, Some(bounds)).unwrap().with_seed(1);
//! let result = pso.optimize(&Rastrigin, 200, &mut ()).unwrap();
//! assert!(result.best_position.iter().all(|x| x.abs() <= 5.12));
//! ```
//!
//! # Logging
//!
//! Progress lines and the end-of-run report are emitted through the [`log`] facade, so nothing
//! is printed unless the application installs a logger. See
//! [`Verbosity`](algorithms::particles::Verbosity).
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]
#![allow(clippy::upper_case_acronyms)]

/// Module containing the swarm optimization algorithms.
pub mod algorithms;
/// Module containing the core types used throughout the crate.
pub mod core;
/// Module containing the error types of the crate.
pub mod error;
/// Module containing hyperparameter search utilities.
pub mod search;
/// Module containing standard functions for testing algorithms.
pub mod test_functions;
/// Module containing the traits used to extend the crate.
pub mod traits;

pub use nalgebra::DVector;

/// The floating-point type used throughout the crate (`f64` by default, `f32` with the `f32`
/// feature).
#[cfg(not(feature = "f32"))]
pub type Float = f64;
/// The floating-point type used throughout the crate (`f64` by default, `f32` with the `f32`
/// feature).
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$ as a [`Float`].
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;
/// The mathematical constant $`\pi`$ as a [`Float`].
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::{
        algorithms::particles::{
            GlobalBestPSO, LocalBestPSO, OptimizationResult, PSOOptions, SwarmStatus,
            SwarmTopology, Verbosity, PSO,
        },
        core::Bounds,
        error::{OptimizeError, SwarmError},
        traits::{CostFunction, FnObjective, Observer},
        DVector, Float,
    };
}
