use ndarray::{ArcArray, Array, IxDyn};
use num_complex::Complex;

use crate::error::Result;
use crate::parameter::Parameter;
use crate::shared::MlNumber;

pub mod complex_activation;
pub mod complex_relu;
mod kernels;

pub trait Layer<A: MlNumber> {
    fn compute(&self, input: ArcArray<Complex<A>, IxDyn>) -> Result<ArcArray<Complex<A>, IxDyn>>;

    /// Returns the gradient with respect to `layer_input` and accumulates
    /// gradients into any trainable parameters.
    fn backpropagate(
        &mut self,
        layer_input: ArcArray<Complex<A>, IxDyn>,
        prior_errors: Array<Complex<A>, IxDyn>,
    ) -> Result<Array<Complex<A>, IxDyn>>;

    fn parameters(&self) -> Vec<&Parameter<A>>;
    fn parameters_mut(&mut self) -> Vec<&mut Parameter<A>>;

    fn zero_grad(&mut self) {
        for parameter in self.parameters_mut() {
            parameter.zero_grad();
        }
    }
}
