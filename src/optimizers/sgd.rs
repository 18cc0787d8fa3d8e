use log::debug;
use ndarray::ArrayD;

use crate::shared::MlNumber;

use super::Optimizer;

/// Stochastic gradient descent with optional heavy-ball momentum.
#[derive(Debug, Clone)]
pub struct SGD<A> {
    learning_rate: A,
    momentum: A,
    velocity: Option<ArrayD<A>>,
}

impl<A: MlNumber> SGD<A> {
    pub fn new(learning_rate: A) -> Self {
        Self::with_momentum(learning_rate, A::zero())
    }

    pub fn with_momentum(learning_rate: A, momentum: A) -> Self {
        Self {
            learning_rate,
            momentum,
            velocity: None,
        }
    }
}

impl<A: MlNumber> Optimizer<A> for SGD<A> {
    fn optimize(&mut self, gradient: &ArrayD<A>) -> ArrayD<A> {
        if self.momentum == A::zero() {
            return gradient * self.learning_rate;
        }
        let velocity = match self.velocity.take() {
            Some(previous) if previous.shape() == gradient.shape() => {
                previous * self.momentum + gradient
            }
            Some(previous) => {
                debug!(
                    "SGD: velocity shape {:?} does not match gradient shape {:?}, restarting momentum",
                    previous.shape(),
                    gradient.shape()
                );
                gradient.clone()
            }
            None => gradient.clone(),
        };
        let update = &velocity * self.learning_rate;
        self.velocity = Some(velocity);
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_plain_sgd_scales_gradient() {
        let mut sgd = SGD::new(0.5);
        let update = sgd.optimize(&array![2.0, -4.0].into_dyn());
        assert_eq!(update, array![1.0, -2.0].into_dyn());
    }

    #[test]
    fn test_momentum_accumulates_velocity() {
        let mut sgd = SGD::with_momentum(0.1, 0.9);
        let gradient = array![1.0].into_dyn();
        let first = sgd.optimize(&gradient);
        let second = sgd.optimize(&gradient);
        assert_abs_diff_eq!(first[[0]], 0.1);
        assert_abs_diff_eq!(second[[0]], 0.19, epsilon = 1e-12);
    }

    #[test]
    fn test_momentum_restarts_on_shape_change() {
        let mut sgd = SGD::with_momentum(0.1, 0.9);
        sgd.optimize(&array![1.0].into_dyn());
        let update = sgd.optimize(&array![2.0, 4.0].into_dyn());
        assert_abs_diff_eq!(update[[0]], 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(update[[1]], 0.4, epsilon = 1e-12);

        let next = sgd.optimize(&array![0.0, 0.0].into_dyn());
        assert_abs_diff_eq!(next[[0]], 0.18, epsilon = 1e-12);
        assert_abs_diff_eq!(next[[1]], 0.36, epsilon = 1e-12);
    }
}
