use fastrand::Rng;
use fastrand_contrib::RngExt;

use crate::{DVector, Float};

pub(crate) fn generate_random_vector(
    dimension: usize,
    lb: Float,
    ub: Float,
    rng: &mut Rng,
) -> DVector<Float> {
    DVector::from_vec((0..dimension).map(|_| rng.range(lb, ub)).collect())
}

pub(crate) fn generate_random_vector_in_limits(
    limits: &[(Float, Float)],
    rng: &mut Rng,
) -> DVector<Float> {
    DVector::from_vec(
        limits
            .iter()
            .map(|&(lb, ub)| rng.range(lb, ub))
            .collect(),
    )
}

/// The Minkowski distance of order `p` between two vectors:
///
/// ```math
/// d_p(\vec{a}, \vec{b}) = \left(\sum_i |a_i - b_i|^p\right)^{1/p}
/// ```
///
/// For `p > 2` the differences are scaled by their largest magnitude `m` and the distance is
/// computed as $`m \left(\sum_i (|a_i - b_i| / m)^p\right)^{1/p}`$, which stays finite for any
/// order.
pub fn minkowski_distance(a: &DVector<Float>, b: &DVector<Float>, p: u32) -> Float {
    match p {
        1 => a.iter().zip(b.iter()).map(|(ai, bi)| (ai - bi).abs()).sum(),
        2 => (a - b).norm(),
        _ => {
            let m = a
                .iter()
                .zip(b.iter())
                .map(|(ai, bi)| (ai - bi).abs())
                .fold(0.0, Float::max);
            if m == 0.0 {
                return 0.0;
            }
            let exponent = p as Float;
            m * a
                .iter()
                .zip(b.iter())
                .map(|(ai, bi)| ((ai - bi).abs() / m).powf(exponent))
                .sum::<Float>()
                .powf(exponent.recip())
        }
    }
}

/// A helper trait to get feature-gated floating-point random values
pub trait SampleFloat {
    /// Get a random value in the range `[lower, upper)`
    fn range(&mut self, lower: Float, upper: Float) -> Float;
}
impl SampleFloat for Rng {
    #[cfg(not(feature = "f32"))]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f64_range(lower..upper)
    }
    #[cfg(feature = "f32")]
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        self.f32_range(lower..upper)
    }
}
