use std::convert::Infallible;

use crate::{DVector, Float};

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$
///
/// Such a function may also take a `user_data: &mut U` field which can be used to pass external
/// arguments to the function during optimization, or can be modified by the function itself.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
///
/// Swarms only ever call [`CostFunction::evaluate_batch`], once per iteration, with the current
/// position of every particle. Override it if the cost can be computed more efficiently for the
/// whole swarm at once.
pub trait CostFunction<U = (), E = Infallible> {
    /// The evaluation of the function at a point `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &DVector<Float>, user_data: &mut U) -> Result<Float, E>;

    /// The evaluation of the function at every point in `xs`, in order.
    ///
    /// The returned vector must contain exactly one cost per input position.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any evaluation fails. See [`CostFunction::evaluate`] for more
    /// information.
    fn evaluate_batch(&self, xs: &[DVector<Float>], user_data: &mut U) -> Result<Vec<Float>, E> {
        xs.iter().map(|x| self.evaluate(x, user_data)).collect()
    }
}

/// A wrapper which turns a plain closure `Fn(&DVector<Float>) -> Float` into a [`CostFunction`].
///
/// ```rust
/// use shoal::prelude::*;
///
/// let f = FnObjective(|x: &DVector<Float>| x.map(|xi| xi.abs()).sum());
/// let costs = f
///     .evaluate_batch(&[DVector::from_vec(vec![1.0, -2.0])], &mut ())
///     .unwrap();
/// assert_eq!(costs, vec![3.0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnObjective<F>(pub F);

impl<F> CostFunction for FnObjective<F>
where
    F: Fn(&DVector<Float>) -> Float,
{
    fn evaluate(&self, x: &DVector<Float>, _: &mut ()) -> Result<Float, Infallible> {
        Ok((self.0)(x))
    }
}
