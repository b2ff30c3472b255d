use thiserror::Error;

#[derive(Debug, Error)]
pub enum NNError {
    // Shape related errors
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Weight shape mismatch: {0}")]
    ShapeMismatch(String),

    // Training related errors
    #[error("NaN in backpropagated error of layer {layer}")]
    NumericalInstability { layer: usize },
    #[error("Dataset has no examples")]
    EmptyDataset,

    // Construction related errors
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Input files
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Weight file holds {actual} bytes, topology implies {expected}")]
    WeightFileLength { expected: u64, actual: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] Box<bincode::ErrorKind>),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Plot error: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, NNError>;
