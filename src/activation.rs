use ndarray::{ArcArray, Dimension};

use crate::shared::MlNumber;

pub mod identity;
pub mod leaky_relu;
pub mod relu;
pub mod tanh;

pub trait ActivationFunction<A: MlNumber, D: Dimension> {
    fn compute(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D>;
    fn compute_derivative(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D>;
}

impl<A: MlNumber, D: Dimension, F: ActivationFunction<A, D> + ?Sized> ActivationFunction<A, D>
    for Box<F>
{
    fn compute(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        (**self).compute(inputs)
    }

    fn compute_derivative(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        (**self).compute_derivative(inputs)
    }
}
