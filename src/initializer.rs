use ndarray::{ArrayD, IxDyn};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use crate::shared::MlNumber;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Initializer {
    #[default]
    Zeros,
    Ones,
    /// Uniform over `[start, end)`, defaulting to `[-1, 1)`.
    Random,
}

pub fn initialize<A: MlNumber>(
    initializer: Initializer,
    shape: &[usize],
    start: Option<A>,
    end: Option<A>,
) -> ArrayD<A> {
    initialize_using(initializer, shape, start, end, &mut rand::thread_rng())
}

pub fn initialize_using<A: MlNumber, R: Rng + ?Sized>(
    initializer: Initializer,
    shape: &[usize],
    start: Option<A>,
    end: Option<A>,
    rng: &mut R,
) -> ArrayD<A> {
    let start = start.unwrap_or_else(|| A::neg(A::one()));
    let end = end.unwrap_or_else(A::one);
    match initializer {
        Initializer::Zeros => ArrayD::zeros(IxDyn(shape)),
        Initializer::Ones => ArrayD::ones(IxDyn(shape)),
        Initializer::Random => {
            let uniform = Uniform::new(start, end);
            ArrayD::random_using(IxDyn(shape), uniform, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_constant_initializers() {
        let zeros: ArrayD<f64> = initialize(Initializer::Zeros, &[2, 1], None, None);
        assert_eq!(zeros.shape(), &[2, 1]);
        assert!(zeros.iter().all(|&value| value == 0.0));

        let ones: ArrayD<f32> = initialize(Initializer::Ones, &[3], None, None);
        assert!(ones.iter().all(|&value| value == 1.0));
    }

    #[test]
    fn test_random_initializer_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let values: ArrayD<f64> =
            initialize_using(Initializer::Random, &[4, 5], Some(0.0), Some(0.5), &mut rng);
        assert_eq!(values.shape(), &[4, 5]);
        assert!(values.iter().all(|&value| (0.0..0.5).contains(&value)));
    }
}
