pub use serde::{Serialize, Deserialize};
pub use std::fs::File;

pub use ndarray::*;
pub use ndarray_rand::RandomExt;
pub use ndarray_rand::rand_distr::Uniform;

pub use crate::models::{Network, TrainingData, TrainingDatum};
pub use crate::config::Configuration;
pub use crate::error::*;

// Internal re-exports
pub use crate::core::{
    Activation,
    Layer,
    Topology,
    Weights,
};
pub use crate::codec::{load_weights, save_weights};
