use std::convert::Infallible;

use crate::{traits::CostFunction, DVector, Float};

/// The Rosenbrock function, a non-convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`n \geq 2`$. This function has a minimum at $`f(\vec{1}) = 0`$.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rosenbrock;

impl CostFunction for Rosenbrock {
    #[allow(clippy::suboptimal_flops)]
    fn evaluate(&self, x: &DVector<Float>, _user_data: &mut ()) -> Result<Float, Infallible> {
        Ok(x.as_slice()
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0].powi(2)).powi(2) + (1.0 - w[0]).powi(2))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn test_rosenbrock() {
        assert_relative_eq!(Rosenbrock.evaluate(&dvector![1.0, 1.0, 1.0], &mut ()).unwrap(), 0.0);
        assert_relative_eq!(Rosenbrock.evaluate(&dvector![0.0, 0.0], &mut ()).unwrap(), 1.0);
        assert_relative_eq!(
            Rosenbrock.evaluate(&dvector![-1.0, 2.0], &mut ()).unwrap(),
            104.0
        );
    }
}
