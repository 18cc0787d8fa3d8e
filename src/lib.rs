pub mod activation;
pub mod complex;
pub mod error;
pub mod initializer;
pub mod layer;
pub mod optimizers;
pub mod parameter;
pub mod shared;

pub use error::{ActivationError, Result};
pub use layer::complex_activation::{
    ComplexActivation, ComplexActivationConfig, ComplexActivationMode,
};
pub use layer::complex_relu::{ComplexReLU, ComplexReLUConfig, ComplexReLUMode};
pub use layer::Layer;
