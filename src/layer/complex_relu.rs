use std::fmt;
use std::str::FromStr;

use derive_builder::Builder;
use log::{debug, trace};
use ndarray::{ArcArray, Array, ArrayBase, ArrayD, ArrayViewD, Data, Dimension, IxDyn, Zip};
use num_complex::Complex;

use crate::activation::leaky_relu::LeakyReLUActivation;
use crate::activation::ActivationFunction;
use crate::complex::real_part;
use crate::error::{ActivationError, Result};
use crate::initializer::Initializer;
use crate::parameter::{sum_to_shape, Bias, Parameter};
use crate::shared::MlNumber;

use super::{kernels, Layer};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexReLUMode {
    #[default]
    Cartesian,
    Modulus,
    /// Keep values whose phase minus `bias` lies in `[0, pi/2)`, scale the
    /// rest by the negative slope.
    Halfplane,
    Real,
    Identity,
}

impl ComplexReLUMode {
    pub const NAMES: &'static [&'static str] =
        &["cartesian", "modulus", "halfplane", "real", "identity"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexReLUMode::Cartesian => "cartesian",
            ComplexReLUMode::Modulus => "modulus",
            ComplexReLUMode::Halfplane => "halfplane",
            ComplexReLUMode::Real => "real",
            ComplexReLUMode::Identity => "identity",
        }
    }

    pub fn has_trainable_bias(&self) -> bool {
        matches!(self, ComplexReLUMode::Modulus | ComplexReLUMode::Halfplane)
    }
}

impl fmt::Display for ComplexReLUMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplexReLUMode {
    type Err = ActivationError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "cartesian" => Ok(ComplexReLUMode::Cartesian),
            "modulus" => Ok(ComplexReLUMode::Modulus),
            "halfplane" => Ok(ComplexReLUMode::Halfplane),
            "real" => Ok(ComplexReLUMode::Real),
            "identity" => Ok(ComplexReLUMode::Identity),
            _ => Err(ActivationError::UnknownMode {
                name: name.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    pattern = "owned",
    build_fn(validate = "Self::validate", error = "ActivationError")
)]
pub struct ComplexReLUConfig<A: MlNumber> {
    #[builder(default = "A::zero()")]
    pub negative_slope: A,
    #[builder(default)]
    pub mode: ComplexReLUMode,
    /// Shape of the learned bias, `[1]` when unset.
    #[builder(default, setter(strip_option, into))]
    pub bias_shape: Option<Vec<usize>>,
    #[builder(default)]
    pub bias_initializer: Initializer,
}

impl<A: MlNumber> ComplexReLUConfig<A> {
    pub fn builder() -> ComplexReLUConfigBuilder<A> {
        ComplexReLUConfigBuilder::default()
    }
}

impl<A: MlNumber> Default for ComplexReLUConfig<A> {
    fn default() -> Self {
        Self {
            negative_slope: A::zero(),
            mode: ComplexReLUMode::default(),
            bias_shape: None,
            bias_initializer: Initializer::default(),
        }
    }
}

impl<A: MlNumber> ComplexReLUConfigBuilder<A> {
    fn validate(&self) -> Result<()> {
        if let Some(slope) = self.negative_slope {
            if !slope.is_finite() {
                return Err(ActivationError::InvalidConfig(format!(
                    "negative_slope must be finite, got {slope}"
                )));
            }
        }
        Ok(())
    }
}

/// Complex leaky rectifier.
///
/// `modulus` and `halfplane` own a trainable bias (an offset on the modulus,
/// a rotation of the halfplane respectively). The other modes hold a fixed
/// zero buffer.
#[derive(Debug, Clone)]
pub struct ComplexReLU<A> {
    mode: ComplexReLUMode,
    activation: LeakyReLUActivation<A>,
    bias: Bias<A>,
}

impl<A: MlNumber> ComplexReLU<A> {
    pub fn new(config: ComplexReLUConfig<A>) -> Self {
        let bias = if config.mode.has_trainable_bias() {
            let shape = config.bias_shape.unwrap_or_else(|| vec![1]);
            Bias::trainable(&shape, config.bias_initializer)
        } else {
            Bias::fixed()
        };
        debug!(
            "ComplexReLU: mode {}, negative_slope {}, bias shape {:?} (trainable: {})",
            config.mode,
            config.negative_slope,
            bias.value().shape(),
            bias.is_trainable()
        );
        Self {
            mode: config.mode,
            activation: LeakyReLUActivation::new(config.negative_slope),
            bias,
        }
    }

    pub fn with_mode(negative_slope: A, mode: ComplexReLUMode) -> Self {
        Self::new(ComplexReLUConfig {
            negative_slope,
            mode,
            ..Default::default()
        })
    }

    pub fn mode(&self) -> ComplexReLUMode {
        self.mode
    }

    pub fn negative_slope(&self) -> A {
        self.activation.negative_slope()
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
        trace!("ComplexReLU: {} forward over {:?}", self.mode, z.shape());
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
        trace!("ComplexReLU: {} backward over {:?}", self.mode, z.shape());
        let grad_input = self.backward_dyn(z.view().into_dyn(), grad_output.view().into_dyn())?;
        Ok(grad_input.into_dimensionality::<D>()?)
    }

    fn forward_dyn(&self, z: ArrayViewD<Complex<A>>) -> Result<ArrayD<Complex<A>>> {
        match self.mode {
            ComplexReLUMode::Cartesian => kernels::cartesian_forward(&self.activation, z),
            ComplexReLUMode::Modulus => {
                kernels::modulus_forward(&self.activation, z, self.bias.value())
            }
            ComplexReLUMode::Halfplane => {
                let bias = kernels::broadcast_bias(self.bias.value(), &z.raw_dim())?;
                let slope = self.negative_slope();
                Ok(Zip::from(&z).and(&bias).map_collect(|&c, &b| {
                    if in_halfplane(c, b) {
                        c
                    } else {
                        c * slope
                    }
                }))
            }
            ComplexReLUMode::Real => {
                let mut output = z.to_owned();
                let activated = self.activation.compute(real_part(&z).into_shared());
                Zip::from(&mut output)
                    .and(&activated)
                    .for_each(|c, &re| c.re = re);
                Ok(output)
            }
            ComplexReLUMode::Identity => Ok(z.to_owned()),
        }
    }

    fn backward_dyn(
        &mut self,
        z: ArrayViewD<Complex<A>>,
        grad_output: ArrayViewD<Complex<A>>,
    ) -> Result<ArrayD<Complex<A>>> {
        kernels::ensure_same_shape(&z, &grad_output)?;
        match self.mode {
            ComplexReLUMode::Cartesian => {
                kernels::cartesian_backward(&self.activation, z, grad_output)
            }
            ComplexReLUMode::Modulus => {
                let (grad_input, grad_shifted) = kernels::modulus_backward(
                    &self.activation,
                    z,
                    self.bias.value(),
                    grad_output,
                )?;
                self.accumulate_bias_grad(grad_shifted)?;
                Ok(grad_input)
            }
            ComplexReLUMode::Halfplane => {
                let bias = kernels::broadcast_bias(self.bias.value(), &z.raw_dim())?;
                let slope = self.negative_slope();
                let grad_input = Zip::from(&z).and(&bias).and(&grad_output).map_collect(
                    |&c, &b, &g| {
                        if in_halfplane(c, b) {
                            g
                        } else {
                            g * slope
                        }
                    },
                );
                // The selection is piecewise constant in the bias.
                self.accumulate_bias_grad(ArrayD::zeros(z.raw_dim()))?;
                Ok(grad_input)
            }
            ComplexReLUMode::Real => Ok(Zip::from(&z)
                .and(&grad_output)
                .map_collect(|c, g| Complex::new(g.re * self.activation.slope_at(c.re), g.im))),
            ComplexReLUMode::Identity => Ok(grad_output.to_owned()),
        }
    }

    fn accumulate_bias_grad(&mut self, grad_shifted: ArrayD<A>) -> Result<()> {
        if let Some(parameter) = self.bias.parameter_mut() {
            let shape = parameter.shape().to_vec();
            parameter.accumulate_grad(sum_to_shape(grad_shifted, &shape)?)?;
        }
        Ok(())
    }
}

impl<A: MlNumber> Default for ComplexReLU<A> {
    fn default() -> Self {
        Self::new(ComplexReLUConfig::default())
    }
}

fn in_halfplane<A: MlNumber>(c: Complex<A>, rotation: A) -> bool {
    let shifted = c.im.atan2(c.re) - rotation;
    A::zero() <= shifted && shifted < A::FRAC_PI_2()
}

impl<A: MlNumber> Layer<A> for ComplexReLU<A> {
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
