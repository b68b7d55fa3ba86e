use std::fmt::Display;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{core::utils::generate_random_vector_in_limits, error::SwarmError, DVector, Float};

/// Per-dimension box constraints `[min_i, max_i]` on particle positions.
///
/// [`Bounds`] can only be built through [`Bounds::new`] (or the equivalent `TryFrom`
/// conversions), which guarantees that both vectors have the same length and that every
/// `min_i` is finite and strictly below its finite `max_i`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct Bounds {
    lower: DVector<Float>,
    upper: DVector<Float>,
}

#[derive(Clone, Serialize, Deserialize)]
struct RawBounds {
    lower: Vec<Float>,
    upper: Vec<Float>,
}

impl Bounds {
    /// Create a new set of bounds from vectors of lower and upper limits.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::BoundsShape`] if the vectors differ in length or are empty, and
    /// [`SwarmError::InvalidBounds`] if any `lower[i] >= upper[i]` or either limit is not finite.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn new(lower: Vec<Float>, upper: Vec<Float>) -> Result<Self, SwarmError> {
        if lower.len() != upper.len() || lower.is_empty() {
            return Err(SwarmError::BoundsShape {
                lower_len: lower.len(),
                upper_len: upper.len(),
                expected: lower.len().max(upper.len()).max(1),
            });
        }
        for (index, (&l, &u)) in lower.iter().zip(upper.iter()).enumerate() {
            // NaNs fail the comparison as well
            if !(l < u) || !l.is_finite() || !u.is_finite() {
                return Err(SwarmError::InvalidBounds {
                    index,
                    lower: l,
                    upper: u,
                });
            }
        }
        Ok(Self {
            lower: DVector::from_vec(lower),
            upper: DVector::from_vec(upper),
        })
    }
    /// The number of dimensions constrained by these bounds.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }
    /// The vector of lower limits.
    pub const fn lower(&self) -> &DVector<Float> {
        &self.lower
    }
    /// The vector of upper limits.
    pub const fn upper(&self) -> &DVector<Float> {
        &self.upper
    }
    /// Iterate over `(lower, upper)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Float, Float)> + '_ {
        self.lower.iter().copied().zip(self.upper.iter().copied())
    }
    /// Collect the bounds as a list of `(lower, upper)` limits.
    pub fn limits(&self) -> Vec<(Float, Float)> {
        self.iter().collect()
    }
    /// Check that these bounds describe a space of the given dimension.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::BoundsShape`] if the dimensions differ.
    pub fn check_dimension(&self, dimension: usize) -> Result<(), SwarmError> {
        if self.dimension() == dimension {
            Ok(())
        } else {
            Err(SwarmError::BoundsShape {
                lower_len: self.lower.len(),
                upper_len: self.upper.len(),
                expected: dimension,
            })
        }
    }
    /// Checks whether every component of `x` lies inside its (closed) bound.
    pub fn contains(&self, x: &DVector<Float>) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .zip(self.iter())
                .all(|(&xi, (l, u))| l <= xi && xi <= u)
    }
    /// Clamp every component of `x` into its bound in place.
    pub fn clip(&self, x: &mut DVector<Float>) {
        x.iter_mut()
            .zip(self.iter())
            .for_each(|(xi, (l, u))| *xi = xi.clamp(l, u));
    }
    /// Get a vector sampled uniformly from the box.
    pub fn random_vector(&self, rng: &mut Rng) -> DVector<Float> {
        generate_random_vector_in_limits(&self.limits(), rng)
    }
    /// Checks if a component of `x` sits exactly on one of its limits.
    pub fn at_bound(&self, index: usize, value: Float) -> bool {
        value == self.lower[index] || value == self.upper[index]
    }
}

impl TryFrom<(Vec<Float>, Vec<Float>)> for Bounds {
    type Error = SwarmError;

    fn try_from(value: (Vec<Float>, Vec<Float>)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

impl TryFrom<Vec<(Float, Float)>> for Bounds {
    type Error = SwarmError;

    fn try_from(value: Vec<(Float, Float)>) -> Result<Self, Self::Error> {
        let (lower, upper) = value.into_iter().unzip();
        Self::new(lower, upper)
    }
}

impl TryFrom<RawBounds> for Bounds {
    type Error = SwarmError;

    fn try_from(value: RawBounds) -> Result<Self, Self::Error> {
        Self::new(value.lower, value.upper)
    }
}

impl From<Bounds> for RawBounds {
    fn from(value: Bounds) -> Self {
        Self {
            lower: value.lower.iter().copied().collect(),
            upper: value.upper.iter().copied().collect(),
        }
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .iter()
            .map(|(l, u)| format!("({}, {})", l, u))
            .collect::<Vec<_>>();
        write!(f, "[{}]", pairs.join(", "))
    }
}
