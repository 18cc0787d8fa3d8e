use ndarray::{ArcArray, Dimension};

use crate::shared::MlNumber;

use super::ActivationFunction;

#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityActivation;

impl<A: MlNumber, D: Dimension> ActivationFunction<A, D> for IdentityActivation {
    fn compute(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        inputs
    }

    fn compute_derivative(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        ArcArray::ones(inputs.raw_dim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_identity_and_unit_derivative() {
        let input = array![[-2.0, 0.0], [1.5, 4.0]].into_shared();
        assert_eq!(IdentityActivation.compute(input.clone()), input);
        assert_eq!(
            IdentityActivation.compute_derivative(input),
            array![[1.0, 1.0], [1.0, 1.0]]
        );
    }
}
