use std::fmt;
use std::str::FromStr;

use derive_builder::Builder;
use log::{debug, trace};
use ndarray::{ArcArray, Array, ArrayBase, ArrayD, ArrayViewD, Data, Dimension, IxDyn};
use num_complex::Complex;

use crate::activation::ActivationFunction;
use crate::error::{ActivationError, Result};
use crate::initializer::Initializer;
use crate::parameter::{sum_to_shape, Bias, Parameter};
use crate::shared::MlNumber;

use super::{kernels, Layer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexActivationMode {
    #[default]
    Cartesian,
    Modulus,
    Identity,
}

impl ComplexActivationMode {
    pub const NAMES: &'static [&'static str] = &["cartesian", "modulus", "identity"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexActivationMode::Cartesian => "cartesian",
            ComplexActivationMode::Modulus => "modulus",
            ComplexActivationMode::Identity => "identity",
        }
    }
}

impl fmt::Display for ComplexActivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplexActivationMode {
    type Err = ActivationError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "cartesian" => Ok(ComplexActivationMode::Cartesian),
            "modulus" => Ok(ComplexActivationMode::Modulus),
            "identity" => Ok(ComplexActivationMode::Identity),
            _ => Err(ActivationError::UnknownMode {
                name: name.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Builder)]
#[builder(pattern = "owned", build_fn(error = "ActivationError"))]
pub struct ComplexActivationConfig {
    #[builder(default)]
    pub mode: ComplexActivationMode,
    #[builder(default, setter(strip_option, into))]
    pub bias_shape: Option<Vec<usize>>,
    #[builder(default)]
    pub bias_initializer: Initializer,
}

impl ComplexActivationConfig {
    pub fn builder() -> ComplexActivationConfigBuilder {
        ComplexActivationConfigBuilder::default()
    }
}

/// Lifts a real activation `F` into the complex domain.
#[derive(Debug, Clone)]
pub struct ComplexActivation<A, F> {
    mode: ComplexActivationMode,
    activation: F,
    bias: Bias<A>,
}

impl<A: MlNumber, F: ActivationFunction<A, IxDyn>> ComplexActivation<A, F> {
    pub fn new(activation: F, config: ComplexActivationConfig) -> Self {
        let bias = match config.mode {
            ComplexActivationMode::Modulus => {
                let shape = config.bias_shape.unwrap_or_else(|| vec![1]);
                Bias::trainable(&shape, config.bias_initializer)
            }
            _ => Bias::fixed(),
        };
        debug!(
            "ComplexActivation: mode {}, bias shape {:?} (trainable: {})",
            config.mode,
            bias.value().shape(),
            bias.is_trainable()
        );
        Self {
            mode: config.mode,
            activation,
            bias,
        }
    }

    pub fn with_mode(activation: F, mode: ComplexActivationMode) -> Self {
        Self::new(
            activation,
            ComplexActivationConfig {
                mode,
                ..Default::default()
            },
        )
    }

    pub fn mode(&self) -> ComplexActivationMode {
        self.mode
    }

    pub fn activation(&self) -> &F {
        &self.activation
    }

    pub fn bias(&self) -> &Bias<A> {
        &self.bias
    }

    pub fn bias_mut(&mut self) -> &mut Bias<A> {
        &mut self.bias
    }

    pub fn forward<S, D>(&self, z: &ArrayBase<S, D>) -> Result<Array<Complex<A>, D>>
    where
        S: Data<Elem = Complex<A>>,
        D: Dimension,
    {
        trace!("ComplexActivation: {} forward over {:?}", self.mode, z.shape());
        let output = self.forward_dyn(z.view().into_dyn())?;
        Ok(output.into_dimensionality::<D>()?)
    }

    pub fn backward<S1, S2, D>(
        &mut self,
        z: &ArrayBase<S1, D>,
        grad_output: &ArrayBase<S2, D>,
    ) -> Result<Array<Complex<A>, D>>
    where
        S1: Data<Elem = Complex<A>>,
        S2: Data<Elem = Complex<A>>,
        D: Dimension,
    {
        trace!("ComplexActivation: {} backward over {:?}", self.mode, z.shape());
        let grad_input = self.backward_dyn(z.view().into_dyn(), grad_output.view().into_dyn())?;
        Ok(grad_input.into_dimensionality::<D>()?)
    }

    fn forward_dyn(&self, z: ArrayViewD<Complex<A>>) -> Result<ArrayD<Complex<A>>> {
        match self.mode {
            ComplexActivationMode::Cartesian => kernels::cartesian_forward(&self.activation, z),
            ComplexActivationMode::Modulus => {
                kernels::modulus_forward(&self.activation, z, self.bias.value())
            }
            ComplexActivationMode::Identity => Ok(z.to_owned()),
        }
    }

    fn backward_dyn(
        &mut self,
        z: ArrayViewD<Complex<A>>,
        grad_output: ArrayViewD<Complex<A>>,
    ) -> Result<ArrayD<Complex<A>>> {
        kernels::ensure_same_shape(&z, &grad_output)?;
        match self.mode {
            ComplexActivationMode::Cartesian => {
                kernels::cartesian_backward(&self.activation, z, grad_output)
            }
            ComplexActivationMode::Modulus => {
                let (grad_input, grad_shifted) = kernels::modulus_backward(
                    &self.activation,
                    z,
                    self.bias.value(),
                    grad_output,
                )?;
                if let Some(parameter) = self.bias.parameter_mut() {
                    let shape = parameter.shape().to_vec();
                    parameter.accumulate_grad(sum_to_shape(grad_shifted, &shape)?)?;
                }
                Ok(grad_input)
            }
            ComplexActivationMode::Identity => Ok(grad_output.to_owned()),
        }
    }
}

impl<A: MlNumber, F: ActivationFunction<A, IxDyn>> Layer<A> for ComplexActivation<A, F> {
    fn compute(&self, input: ArcArray<Complex<A>, IxDyn>) -> Result<ArcArray<Complex<A>, IxDyn>> {
        self.forward(&input).map(|output| output.into_shared())
    }

    fn backpropagate(
        &mut self,
        layer_input: ArcArray<Complex<A>, IxDyn>,
        prior_errors: Array<Complex<A>, IxDyn>,
    ) -> Result<Array<Complex<A>, IxDyn>> {
        self.backward(&layer_input, &prior_errors)
    }

    fn parameters(&self) -> Vec<&Parameter<A>> {
        self.bias.parameter().into_iter().collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter<A>> {
        self.bias.parameter_mut().into_iter().collect()
    }
}
