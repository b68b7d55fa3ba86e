/// [`Bounds`] type for binding particle positions to a box.
pub mod bound;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// [`OptimizationResult`] type for the result of an optimization run.
pub mod summary;
/// Random sampling and distance helpers.
pub mod utils;

pub use bound::Bounds;
pub use point::Point;
pub use summary::OptimizationResult;
