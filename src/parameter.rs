use log::debug;
use ndarray::{ArrayD, Axis, IxDyn};

use crate::error::{ActivationError, Result};
use crate::initializer::{self, Initializer};
use crate::optimizers::Optimizer;
use crate::shared::MlNumber;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter<A> {
    value: ArrayD<A>,
    grad: Option<ArrayD<A>>,
}

impl<A: MlNumber> Parameter<A> {
    pub fn new(value: ArrayD<A>) -> Self {
        Self { value, grad: None }
    }

    pub fn value(&self) -> &ArrayD<A> {
        &self.value
    }

    /// Direct access to the value, bypassing gradient bookkeeping.
    pub fn value_mut(&mut self) -> &mut ArrayD<A> {
        &mut self.value
    }

    pub fn grad(&self) -> Option<&ArrayD<A>> {
        self.grad.as_ref()
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn accumulate_grad(&mut self, gradient: ArrayD<A>) -> Result<()> {
        if gradient.shape() != self.value.shape() {
            return Err(ActivationError::ShapeMismatch {
                expected: self.value.shape().to_vec(),
                actual: gradient.shape().to_vec(),
                operation: "accumulate_grad".into(),
            });
        }
        self.grad = Some(match self.grad.take() {
            Some(existing) => existing + gradient,
            None => gradient,
        });
        Ok(())
    }

    pub fn zero_grad(&mut self) {
        self.grad = None;
    }

    /// Applies one optimizer update from the accumulated gradient. The
    /// gradient is kept; call `zero_grad` before the next backward pass.
    pub fn step<O: Optimizer<A>>(&mut self, optimizer: &mut O) {
        match &self.grad {
            Some(grad) => {
                let update = optimizer.optimize(grad);
                self.value = &self.value - &update;
            }
            None => debug!("Parameter: no gradient accumulated, skipping step"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Bias<A> {
    Trainable(Parameter<A>),
    Fixed(ArrayD<A>),
}

impl<A: MlNumber> Bias<A> {
    pub fn trainable(shape: &[usize], initializer: Initializer) -> Self {
        Bias::Trainable(Parameter::new(initializer::initialize(
            initializer,
            shape,
            None,
            None,
        )))
    }

    pub fn fixed() -> Self {
        Bias::Fixed(ArrayD::zeros(IxDyn(&[1])))
    }

    pub fn value(&self) -> &ArrayD<A> {
        match self {
            Bias::Trainable(parameter) => parameter.value(),
            Bias::Fixed(buffer) => buffer,
        }
    }

    pub fn is_trainable(&self) -> bool {
        matches!(self, Bias::Trainable(_))
    }

    pub fn parameter(&self) -> Option<&Parameter<A>> {
        match self {
            Bias::Trainable(parameter) => Some(parameter),
            Bias::Fixed(_) => None,
        }
    }

    pub fn parameter_mut(&mut self) -> Option<&mut Parameter<A>> {
        match self {
            Bias::Trainable(parameter) => Some(parameter),
            Bias::Fixed(_) => None,
        }
    }
}

/// Sums `gradient` over the axes that broadcasting expanded, so the result
/// has `shape`.
pub(crate) fn sum_to_shape<A: MlNumber>(gradient: ArrayD<A>, shape: &[usize]) -> Result<ArrayD<A>> {
    let mut gradient = gradient;
    while gradient.ndim() < shape.len() {
        gradient = gradient.insert_axis(Axis(0));
    }
    while gradient.ndim() > shape.len() {
        gradient = gradient.sum_axis(Axis(0));
    }
    for (axis, &len) in shape.iter().enumerate() {
        if len == 1 && gradient.len_of(Axis(axis)) != 1 {
            gradient = gradient.sum_axis(Axis(axis)).insert_axis(Axis(axis));
        }
    }
    if gradient.shape() != shape {
        return Err(ActivationError::ShapeMismatch {
            expected: shape.to_vec(),
            actual: gradient.shape().to_vec(),
            operation: "sum_to_shape".into(),
        });
    }
    Ok(gradient)
}
