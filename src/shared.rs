use ndarray::NdFloat;
use ndarray_rand::rand_distr::uniform::SampleUniform;
use num_traits::FloatConst;

/// Real scalar type backing a complex tensor.
pub trait MlNumber: NdFloat + SampleUniform + FloatConst {}

impl MlNumber for f32 {}
impl MlNumber for f64 {}
