use serde::{Deserialize, Serialize};

use crate::{error::SwarmError, Float};

/// Hyperparameters of a particle swarm optimizer.
///
/// `c1`, `c2` and `w` are required by every variant. The neighbourhood size `k` and the
/// Minkowski order `p` are only required by the local-best variant, which reports a
/// [`SwarmError::MissingOption`] if either is left unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PSOOptions {
    /// The cognitive weight $`c_1`$ which controls the particle's tendency to move towards its
    /// personal best.
    pub c1: Float,
    /// The social weight $`c_2`$ which controls the particle's tendency to move towards the
    /// global (or neighbourhood) best.
    pub c2: Float,
    /// The inertial weight $`\omega`$.
    pub w: Float,
    /// The number of neighbours of each particle (local best only).
    pub k: Option<usize>,
    /// The order of the Minkowski distance used to find neighbours (local best only). `1` is
    /// the sum-of-absolute-values distance and `2` is the Euclidean distance.
    pub p: Option<u32>,
    /// Optional `(min, max)` limits applied to every velocity component after each update.
    pub velocity_clamp: Option<(Float, Float)>,
}

impl PSOOptions {
    /// Create a new set of options from the cognitive, social and inertial weights.
    pub const fn new(c1: Float, c2: Float, w: Float) -> Self {
        Self {
            c1,
            c2,
            w,
            k: None,
            p: None,
            velocity_clamp: None,
        }
    }
    /// Sets the number of neighbours `k`.
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }
    /// Sets the Minkowski order `p`.
    pub const fn with_p(mut self, p: u32) -> Self {
        self.p = Some(p);
        self
    }
    /// Sets the velocity clamp `(min, max)`.
    pub const fn with_velocity_clamp(mut self, min: Float, max: Float) -> Self {
        self.velocity_clamp = Some((min, max));
        self
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub(crate) fn validate(&self) -> Result<(), SwarmError> {
        check_positive("c1", self.c1)?;
        check_positive("c2", self.c2)?;
        if !self.w.is_finite() {
            return Err(SwarmError::InvalidOption {
                name: "w",
                value: self.w.to_string(),
                reason: "must be finite",
            });
        }
        if let Some((min, max)) = self.velocity_clamp {
            if !(min < max) {
                return Err(SwarmError::InvalidVelocityClamp { min, max });
            }
        }
        Ok(())
    }

    pub(crate) fn validate_local(&self, n_particles: usize) -> Result<(usize, u32), SwarmError> {
        self.validate()?;
        let k = self.k.ok_or(SwarmError::MissingOption { name: "k" })?;
        let p = self.p.ok_or(SwarmError::MissingOption { name: "p" })?;
        if k == 0 || k > n_particles {
            return Err(SwarmError::InvalidOption {
                name: "k",
                value: k.to_string(),
                reason: "must lie between 1 and the number of particles",
            });
        }
        if p == 0 {
            return Err(SwarmError::InvalidOption {
                name: "p",
                value: p.to_string(),
                reason: "must be at least 1",
            });
        }
        Ok((k, p))
    }
}

impl Default for PSOOptions {
    fn default() -> Self {
        Self::new(0.5, 0.3, 0.9)
    }
}

#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_positive(name: &'static str, value: Float) -> Result<(), SwarmError> {
    // catches NaN too
    if !(value > 0.0) || !value.is_finite() {
        return Err(SwarmError::InvalidOption {
            name,
            value: value.to_string(),
            reason: "must be positive and finite",
        });
    }
    Ok(())
}
