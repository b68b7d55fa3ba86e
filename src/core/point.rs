use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{DVector, Float};

/// Describes a point in parameter space along with the cost evaluated there.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the point's evaluation (`None` if the point has not yet been evaluated)
    pub fx: Option<Float>,
}
impl Point {
    /// Convert the [`Point`] into a position-cost tuple, where an unevaluated point has an
    /// infinite cost.
    pub fn destructure(self) -> (DVector<Float>, Float) {
        let fx = self.cost();
        (self.x, fx)
    }
    /// The cost at this point, or `+inf` if the point has not been evaluated.
    pub fn cost(&self) -> Float {
        self.fx.unwrap_or(Float::INFINITY)
    }
    /// Checks whether the point has been evaluated.
    pub const fn is_evaluated(&self) -> bool {
        self.fx.is_some()
    }
    /// Compare two points by their `fx` value. Unevaluated points compare greater than any
    /// evaluated one.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (&self.fx, &other.fx) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(s), Some(o)) => s.total_cmp(o),
        }
    }
    /// Returns `true` if `cost` is strictly lower than the cost at this point. `NaN` is never
    /// an improvement.
    pub fn is_improved_by(&self, cost: Float) -> bool {
        self.fx.map_or(!cost.is_nan(), |fx| cost < fx)
    }
    /// Move the point to a new position, resetting the evaluation of the point
    pub fn set_position(&mut self, x: DVector<Float>) {
        self.x = x;
        self.fx = None;
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x: {:?}, f(x): {:?}", self.x.as_slice(), self.fx)
    }
}

impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self {
            x: DVector::from_vec(value),
            fx: None,
        }
    }
}
impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self { x: value, fx: None }
    }
}
