use ndarray::{ArcArray, Dimension};

use crate::shared::MlNumber;

use super::ActivationFunction;

/// Rectifier clamping everything at or below `threshold` to `threshold`.
#[derive(Debug, Clone, Copy)]
pub struct ReLUActivation<A> {
    threshold: A,
}

impl<A: MlNumber> ReLUActivation<A> {
    pub fn new() -> Self {
        Self::with_threshold(A::zero())
    }

    pub fn with_threshold(threshold: A) -> Self {
        Self { threshold }
    }
}

impl<A: MlNumber> Default for ReLUActivation<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: MlNumber, D: Dimension> ActivationFunction<A, D> for ReLUActivation<A> {
    fn compute(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        inputs
            .mapv(|element| {
                if element > self.threshold {
                    return element;
                }
                self.threshold
            })
            .into_shared()
    }

    fn compute_derivative(&self, inputs: ArcArray<A, D>) -> ArcArray<A, D> {
        inputs
            .mapv(|element| {
                if element > self.threshold {
                    return A::one();
                }
                A::zero()
            })
            .into_shared()
    }
}
