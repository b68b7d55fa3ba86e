use thiserror::Error;

use crate::Float;

/// Module containing the Ackley test function.
pub mod ackley;
pub use ackley::Ackley;

/// Module containing the Rastrigin test function.
pub mod rastrigin;
pub use rastrigin::Rastrigin;

/// Module containing the Rosenbrock test function.
pub mod rosenbrock;
pub use rosenbrock::Rosenbrock;

/// Module containing the sphere test function.
pub mod sphere;
pub use sphere::Sphere;

/// Error returned by a test function evaluated outside of its input domain.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{function} is only defined on [-{limit}, {limit}], but x[{index}] = {value}")]
pub struct DomainError {
    /// Name of the function
    pub function: &'static str,
    /// Index of the offending component
    pub index: usize,
    /// Value of the offending component
    pub value: Float,
    /// Half-width of the symmetric domain
    pub limit: Float,
}

/// Check that every component of `x` lies in `[-limit, limit]`.
pub(crate) fn check_domain(
    function: &'static str,
    x: &crate::DVector<Float>,
    limit: Float,
) -> Result<(), DomainError> {
    match x.iter().position(|xi| xi.abs() > limit || xi.is_nan()) {
        Some(index) => Err(DomainError {
            function,
            index,
            value: x[index],
            limit,
        }),
        None => Ok(()),
    }
}
