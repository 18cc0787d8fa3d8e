use derive_builder::UninitializedFieldError;
use ndarray::ShapeError;
use thiserror::Error;

/// Errors raised while configuring or running a complex activation.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ActivationError {
    #[error("Unknown activation mode '{name}', expected one of {expected:?}")]
    UnknownMode {
        name: String,
        expected: &'static [&'static str],
    },

    #[error("Bias of shape {bias:?} cannot be broadcast to input of shape {input:?}")]
    BiasShapeMismatch { bias: Vec<usize>, input: Vec<usize> },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),
}

pub type Result<T> = std::result::Result<T, ActivationError>;

impl From<UninitializedFieldError> for ActivationError {
    fn from(error: UninitializedFieldError) -> Self {
        ActivationError::InvalidConfig(error.to_string())
    }
}
