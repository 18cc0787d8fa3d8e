use ndarray::{ArcArray, Dimension};

use crate::shared::MlNumber;

use super::ActivationFunction;

#[derive(Debug, Clone, Copy)]
pub struct LeakyReLUActivation<A> {
    negative_slope: A,
}

impl<A: MlNumber> LeakyReLUActivation<A> {
    pub fn new(negative_slope: A) -> Self {
        Self { negative_slope }
    }

    pub fn negative_slope(&self) -> A {
        self.negative_slope
    }

    pub(crate) fn apply(&self, element: A) -> A {
        if element > A::zero() {
            return element;
        }
        element * self.negative_slope
    }

    pub(crate) fn slope_at(&self, element: A) -> A {
        if element > A::zero() {
            return A::one();
        }
        self.negative_slope
    }
}

impl<A: MlNumber> Default for LeakyReLUActivation<A> {
    fn default() -> Self {
        Self::new(A::zero())
    }
}

impl<A: MlNumber, D: Dimension> ActivationFunction<A, D> for LeakyReLUActivation<A> {
    fn compute(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        inputs.mapv(|element| self.apply(element)).into_shared()
    }

    fn compute_derivative(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        inputs.mapv(|element| self.slope_at(element)).into_shared()
    }
}
