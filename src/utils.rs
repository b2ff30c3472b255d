#[allow(unused)]
use crate::prelude::*;

/// Builds a [`Topology`](crate::core::Topology) from layer sizes, input first.
///
/// ```
/// # fn main() -> ffnet::error::Result<()> {
/// let topology = ffnet::topology![2, 3, 1]?;
/// assert_eq!(topology.output_width(), 1);
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! topology {
    ($($x:expr),* $(,)?) => {
        {
            $crate::core::Topology::new(vec![$($x),*])
        }
    };
}

/// Builds [`TrainingData`](crate::models::TrainingData) from
/// `[inputs] => [expected]` pairs.
#[macro_export]
macro_rules! training_data {
    ($([$($i:expr),*] => [$($o:expr),*]),* $(,)?) => {
        {
            vec![$(
                $crate::models::TrainingDatum::new(
                    $crate::ndarray::array![$($i as f64),*],
                    $crate::ndarray::array![$($o as f64),*],
                )
            ),*]
        }
    };
}
