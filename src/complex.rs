use ndarray::{Array, ArrayBase, ArrayD, Axis, Data, Dimension, IxDyn, Zip};
use num_complex::Complex;

use crate::error::{ActivationError, Result};
use crate::shared::MlNumber;

pub fn real_part<A, S, D>(z: &ArrayBase<S, D>) -> Array<A, D>
where
    A: MlNumber,
    S: Data<Elem = Complex<A>>,
    D: Dimension,
{
    z.map(|c| c.re)
}

pub fn imag_part<A, S, D>(z: &ArrayBase<S, D>) -> Array<A, D>
where
    A: MlNumber,
    S: Data<Elem = Complex<A>>,
    D: Dimension,
{
    z.map(|c| c.im)
}

pub fn from_parts<A, S1, S2, D>(
    re: &ArrayBase<S1, D>,
    im: &ArrayBase<S2, D>,
) -> Result<Array<Complex<A>, D>>
where
    A: MlNumber,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
    D: Dimension,
{
    if re.shape() != im.shape() {
        return Err(ActivationError::ShapeMismatch {
            expected: re.shape().to_vec(),
            actual: im.shape().to_vec(),
            operation: "from_parts".into(),
        });
    }
    Ok(Zip::from(re)
        .and(im)
        .map_collect(|&re, &im| Complex::new(re, im)))
}

/// Copies `z` into a real tensor with a trailing axis of length 2 holding
/// `[re, im]` for every element.
pub fn as_real_pairs<A, S, D>(z: &ArrayBase<S, D>) -> Result<ArrayD<A>>
where
    A: MlNumber,
    S: Data<Elem = Complex<A>>,
    D: Dimension,
{
    let mut shape = z.shape().to_vec();
    shape.push(2);
    let data: Vec<A> = z.iter().flat_map(|c| [c.re, c.im]).collect();
    Ok(Array::from_shape_vec(IxDyn(&shape), data)?)
}

pub fn from_real_pairs<A, S>(pairs: &ArrayBase<S, IxDyn>) -> Result<ArrayD<Complex<A>>>
where
    A: MlNumber,
    S: Data<Elem = A>,
{
    let last = match pairs.shape().last() {
        Some(2) => pairs.ndim() - 1,
        _ => {
            let mut expected = pairs.shape().to_vec();
            match expected.last_mut() {
                Some(len) => *len = 2,
                None => expected.push(2),
            }
            return Err(ActivationError::ShapeMismatch {
                expected,
                actual: pairs.shape().to_vec(),
                operation: "from_real_pairs".into(),
            });
        }
    };
    Ok(Zip::from(pairs.lanes(Axis(last))).map_collect(|lane| Complex::new(lane[0], lane[1])))
}

pub fn modulus<A, S, D>(z: &ArrayBase<S, D>) -> Array<A, D>
where
    A: MlNumber,
    S: Data<Elem = Complex<A>>,
    D: Dimension,
{
    z.map(|c| (c.re * c.re + c.im * c.im).sqrt())
}

pub fn angle<A, S, D>(z: &ArrayBase<S, D>) -> Array<A, D>
where
    A: MlNumber,
    S: Data<Elem = Complex<A>>,
    D: Dimension,
{
    z.map(|c| c.im.atan2(c.re))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_parts_split_and_join() {
        let z = array![[Complex::new(1.0, -2.0), Complex::new(0.5, 3.0)]];
        let re = real_part(&z);
        let im = imag_part(&z);
        assert_eq!(re, array![[1.0, 0.5]]);
        assert_eq!(im, array![[-2.0, 3.0]]);
        assert_eq!(from_parts(&re, &im).unwrap(), z);
    }

    #[test]
    fn test_from_parts_rejects_mismatched_shapes() {
        let re = array![1.0, 2.0];
        let im = array![1.0, 2.0, 3.0];
        let error = from_parts(&re, &im).unwrap_err();
        assert!(matches!(error, ActivationError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_real_pairs_layout() {
        let z = array![Complex::new(1.0, 2.0), Complex::new(-3.0, 4.0)];
        let pairs = as_real_pairs(&z).unwrap();
        assert_eq!(pairs.shape(), &[2, 2]);
        assert_eq!(pairs, array![[1.0, 2.0], [-3.0, 4.0]].into_dyn());
        assert_eq!(from_real_pairs(&pairs).unwrap(), z.into_dyn());
    }

    #[test]
    fn test_from_real_pairs_requires_trailing_pair_axis() {
        let pairs = array![[1.0, 2.0, 3.0]].into_dyn();
        let error = from_real_pairs(&pairs).unwrap_err();
        assert_eq!(
            error,
            ActivationError::ShapeMismatch {
                expected: vec![1, 2],
                actual: vec![1, 3],
                operation: "from_real_pairs".into(),
            }
        );
    }

    #[test]
    fn test_modulus_and_angle() {
        let z = array![Complex::new(3.0, 4.0), Complex::new(-1.0, 0.0)];
        assert_eq!(modulus(&z), array![5.0, 1.0]);
        let theta = angle(&z);
        assert_abs_diff_eq!(theta[0], (4.0f64).atan2(3.0));
        assert_abs_diff_eq!(theta[1], std::f64::consts::PI);
    }
}
