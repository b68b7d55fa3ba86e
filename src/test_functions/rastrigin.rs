use crate::{traits::CostFunction, DVector, Float, PI};

use super::{check_domain, DomainError};

/// The Rastrigin function, a non-convex function with a single minimum but many local minima.
///
/// ```math
/// f(\vec{x}) = 10n + \sum_{i=1}^n (x_i^2 - 10cos(2\pi x_i))
/// ```
/// where $`x_i \in [-5.12, 5.12]`$. The global minimum is $`f(\vec{0}) = 0`$. Inputs outside of
/// the domain produce a [`DomainError`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Rastrigin;

impl Rastrigin {
    /// Half-width of the input domain.
    pub const LIMIT: Float = 5.12;
}

impl CostFunction<(), DomainError> for Rastrigin {
    #[allow(clippy::suboptimal_flops)]
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, DomainError> {
        check_domain("Rastrigin", x, Self::LIMIT)?;
        Ok(10.0 * x.len() as Float
            + x.iter()
                .map(|xi| xi.powi(2) - 10.0 * Float::cos(2.0 * PI * xi))
                .sum::<Float>())
    }
}
