extern crate plotters;
pub use ndarray;

pub mod codec;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod models;
pub mod output;
pub mod prelude;
pub mod utils;

// Re-export types
pub use crate::config::Configuration;
pub use crate::core::{Activation, Layer, Topology, Weights};
pub use crate::error::{NNError, Result};
pub use crate::models::{Network, TrainingData, TrainingDatum};

pub mod plot {
    pub mod plot_errors_over_epochs;

    pub use plot_errors_over_epochs::plot_errors_over_epochs;
}
