use thiserror::Error;

use crate::Float;

/// Errors raised while configuring or running a swarm.
///
/// The variants fall into two groups, see [`SwarmError::is_configuration_error`] and
/// [`SwarmError::is_dimension_error`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwarmError {
    /// A hyperparameter required by the chosen variant was not provided.
    #[error("missing required option `{name}`")]
    MissingOption {
        /// Name of the missing option
        name: &'static str,
    },
    /// A hyperparameter was provided with a value outside its admissible range.
    #[error("invalid value for option `{name}`: {value} ({reason})")]
    InvalidOption {
        /// Name of the option
        name: &'static str,
        /// The offending value, formatted
        value: String,
        /// What the value should have been
        reason: &'static str,
    },
    /// The swarm must contain at least one particle in at least one dimension.
    #[error("invalid swarm size: {n_particles} particles in {dimension} dimensions")]
    InvalidSwarmSize {
        /// Requested number of particles
        n_particles: usize,
        /// Requested dimension
        dimension: usize,
    },
    /// A lower bound is not strictly below its upper bound.
    #[error("invalid bounds at index {index}: lower ({lower}) >= upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: Float,
        /// The upper bound value
        upper: Float,
    },
    /// The velocity clamp must satisfy `min < max`.
    #[error("invalid velocity clamp: min ({min}) >= max ({max})")]
    InvalidVelocityClamp {
        /// Minimum velocity component
        min: Float,
        /// Maximum velocity component
        max: Float,
    },
    /// The number of iterations must be positive.
    #[error("the number of iterations must be positive")]
    InvalidIterations,
    /// The progress reporting interval must be positive.
    #[error("the print step must be positive")]
    InvalidPrintStep,
    /// The minimum and maximum bound vectors disagree in length with each other or with the
    /// problem dimension.
    #[error("bounds shape mismatch: lower has {lower_len} elements, upper has {upper_len}, expected {expected}")]
    BoundsShape {
        /// Length of the lower bound vector
        lower_len: usize,
        /// Length of the upper bound vector
        upper_len: usize,
        /// Expected length
        expected: usize,
    },
    /// A vector supplied to or returned into the swarm has the wrong length.
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Where the mismatch was detected
        context: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },
}

impl SwarmError {
    /// Returns `true` for errors caused by invalid hyperparameters, swarm sizes, iteration
    /// counts, or malformed bounds.
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingOption { .. }
                | Self::InvalidOption { .. }
                | Self::InvalidSwarmSize { .. }
                | Self::InvalidBounds { .. }
                | Self::BoundsShape { .. }
                | Self::InvalidVelocityClamp { .. }
                | Self::InvalidIterations
                | Self::InvalidPrintStep
        )
    }
    /// Returns `true` for errors caused by vectors of the wrong length. Malformed bounds count as
    /// both a configuration and a dimension error.
    pub const fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::BoundsShape { .. } | Self::DimensionMismatch { .. }
        )
    }
}

/// Errors returned by an optimization run.
///
/// Failures of the objective function itself are passed through untouched in
/// [`OptimizeError::Objective`].
#[derive(Debug, Error)]
pub enum OptimizeError<E> {
    /// The swarm was misconfigured or received malformed data.
    #[error(transparent)]
    Swarm(#[from] SwarmError),
    /// The objective function returned an error.
    #[error("objective function failed: {0}")]
    Objective(E),
}

impl<E> OptimizeError<E> {
    /// Returns the inner [`SwarmError`], if any.
    pub const fn as_swarm_error(&self) -> Option<&SwarmError> {
        match self {
            Self::Swarm(err) => Some(err),
            Self::Objective(_) => None,
        }
    }
    /// Consumes the error and returns the objective function's own error, if that is what
    /// caused it.
    pub fn into_objective(self) -> Option<E> {
        match self {
            Self::Objective(err) => Some(err),
            Self::Swarm(_) => None,
        }
    }
}
