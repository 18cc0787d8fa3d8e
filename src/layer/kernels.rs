use ndarray::{Array, ArrayD, ArrayViewD, Axis, Dimension, IxDyn, Zip};
use num_complex::Complex;

use crate::activation::ActivationFunction;
use crate::complex::{as_real_pairs, from_real_pairs, modulus};
use crate::error::{ActivationError, Result};
use crate::shared::MlNumber;

/// Leading size-1 bias axes beyond the input's rank are dropped first, so the
/// default `[1]` bias also applies to 0-d inputs.
pub(crate) fn broadcast_bias<A, D>(bias: &ArrayD<A>, dim: &D) -> Result<Array<A, D>>
where
    A: Clone,
    D: Dimension,
{
    let mut trimmed = bias.view();
    while trimmed.ndim() > dim.ndim() && trimmed.len_of(Axis(0)) == 1 {
        trimmed = trimmed.index_axis_move(Axis(0), 0);
    }
    trimmed
        .broadcast(dim.clone())
        .map(|broadcast| broadcast.to_owned())
        .ok_or_else(|| ActivationError::BiasShapeMismatch {
            bias: bias.shape().to_vec(),
            input: dim.slice().to_vec(),
        })
}

pub(crate) fn ensure_same_shape<A>(
    input: &ArrayViewD<Complex<A>>,
    grad_output: &ArrayViewD<Complex<A>>,
) -> Result<()> {
    if input.shape() != grad_output.shape() {
        return Err(ActivationError::ShapeMismatch {
            expected: input.shape().to_vec(),
            actual: grad_output.shape().to_vec(),
            operation: "backward".into(),
        });
    }
    Ok(())
}

pub(crate) fn cartesian_forward<A, F>(
    activation: &F,
    z: ArrayViewD<Complex<A>>,
) -> Result<ArrayD<Complex<A>>>
where
    A: MlNumber,
    F: ActivationFunction<A, IxDyn>,
{
    let pairs = as_real_pairs(&z)?;
    let activated = activation.compute(pairs.into_shared());
    from_real_pairs(&activated)
}

pub(crate) fn cartesian_backward<A, F>(
    activation: &F,
    z: ArrayViewD<Complex<A>>,
    grad_output: ArrayViewD<Complex<A>>,
) -> Result<ArrayD<Complex<A>>>
where
    A: MlNumber,
    F: ActivationFunction<A, IxDyn>,
{
    let derivative = activation.compute_derivative(as_real_pairs(&z)?.into_shared());
    let grad_pairs = as_real_pairs(&grad_output)? * &derivative;
    from_real_pairs(&grad_pairs)
}

pub(crate) fn modulus_forward<A, F>(
    activation: &F,
    z: ArrayViewD<Complex<A>>,
    bias: &ArrayD<A>,
) -> Result<ArrayD<Complex<A>>>
where
    A: MlNumber,
    F: ActivationFunction<A, IxDyn>,
{
    let bias = broadcast_bias(bias, &z.raw_dim())?;
    let shifted = modulus(&z) + &bias;
    let activated = activation.compute(shifted.into_shared());
    Ok(Zip::from(&z)
        .and(&activated)
        .map_collect(|c, &magnitude| Complex::from_polar(magnitude, c.im.atan2(c.re))))
}

/// Returns the input gradient and the gradient with respect to the shifted
/// modulus `|z| + bias`, still at the input's shape.
///
/// At `z == 0` the phase is taken as zero and only the radial term
/// contributes.
pub(crate) fn modulus_backward<A, F>(
    activation: &F,
    z: ArrayViewD<Complex<A>>,
    bias: &ArrayD<A>,
    grad_output: ArrayViewD<Complex<A>>,
) -> Result<(ArrayD<Complex<A>>, ArrayD<A>)>
where
    A: MlNumber,
    F: ActivationFunction<A, IxDyn>,
{
    let bias = broadcast_bias(bias, &z.raw_dim())?;
    let shifted = modulus(&z) + &bias;
    let activated = activation.compute(shifted.clone().into_shared());
    let derivative = activation.compute_derivative(shifted.into_shared());

    let mut grad_input = ArrayD::<Complex<A>>::zeros(z.raw_dim());
    let mut grad_shifted = ArrayD::<A>::zeros(z.raw_dim());
    Zip::from(&mut grad_input)
        .and(&mut grad_shifted)
        .and(&z)
        .and(&grad_output)
        .and(&activated)
        .and(&derivative)
        .for_each(|grad_in, grad_u, c, g, &value, &slope| {
            let r = (c.re * c.re + c.im * c.im).sqrt();
            let (sin, cos) = c.im.atan2(c.re).sin_cos();
            let radial = (g.re * cos + g.im * sin) * slope;
            *grad_u = radial;
            *grad_in = if r > A::zero() {
                let angular = value * (g.im * cos - g.re * sin) / r;
                Complex::new(radial * cos - angular * sin, radial * sin + angular * cos)
            } else {
                Complex::new(radial * cos, radial * sin)
            };
        });
    Ok((grad_input, grad_shifted))
}
