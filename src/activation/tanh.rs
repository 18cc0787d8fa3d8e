use ndarray::{ArcArray, Dimension};

use crate::shared::MlNumber;

use super::ActivationFunction;

#[derive(Debug, Default, Clone, Copy)]
pub struct TanhActivation;

impl<A: MlNumber, D: Dimension> ActivationFunction<A, D> for TanhActivation {
    fn compute(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        inputs.mapv(|element| element.tanh()).into_shared()
    }

    fn compute_derivative(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        inputs
            .mapv(|element| {
                let t = element.tanh();
                A::one() - t * t
            })
            .into_shared()
    }
}
