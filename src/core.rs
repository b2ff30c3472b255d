// src/core.rs
pub mod activations;
pub mod layers;
pub mod losses;
pub mod optimizers;
pub mod weights;

// Re-export commonly used items
pub use activations::Activation;
pub use layers::{Layer, Topology};
pub use losses::{l1, output_error};
pub use optimizers::{schedule, sgd_update};
pub use weights::Weights;
