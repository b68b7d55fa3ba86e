use crate::{traits::CostFunction, DVector, Float, PI};

use super::{check_domain, DomainError};

/// The Ackley function, a nearly flat function with a deep hole at the origin and many local
/// minima.
///
/// ```math
/// f(\vec{x}) = -20\exp\left(-0.2\sqrt{\frac{1}{n}\sum_{i=1}^n x_i^2}\right) - \exp\left(\frac{1}{n}\sum_{i=1}^n \cos(2\pi x_i)\right) + e + 20
/// ```
/// where $`x_i \in [-32, 32]`$. The global minimum is $`f(\vec{0}) = 0`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ackley;

impl Ackley {
    /// Half-width of the input domain.
    pub const LIMIT: Float = 32.0;
}

impl CostFunction<(), DomainError> for Ackley {
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, DomainError> {
        check_domain("Ackley", x, Self::LIMIT)?;
        let n = x.len() as Float;
        let mean_square = x.norm_squared() / n;
        let mean_cos = x.iter().map(|xi| Float::cos(2.0 * PI * xi)).sum::<Float>() / n;
        Ok(-20.0 * Float::exp(-0.2 * mean_square.sqrt()) - mean_cos.exp()
            + Float::exp(1.0)
            + 20.0)
    }
}
