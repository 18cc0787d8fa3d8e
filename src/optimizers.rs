use ndarray::ArrayD;

use crate::shared::MlNumber;

pub mod sgd;

/// Turns a parameter gradient into the update subtracted from the parameter.
///
/// An optimizer may keep per-parameter state, so use one instance per
/// parameter (clone it).
pub trait Optimizer<A: MlNumber>: Clone {
    fn optimize(&mut self, gradient: &ArrayD<A>) -> ArrayD<A>;
}
