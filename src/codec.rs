//! Headerless binary weight files.
//!
//! A file is every transition matrix in order, each written row-major as
//! 8-byte `f64` values in native byte order. Shapes are not stored; the
//! reader derives them from the topology.
//!
//! Files written with 4-byte `float` weights are not compatible with this
//! layout and fail the length check on load.

use crate::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const SCALAR_BYTES: usize = std::mem::size_of::<f64>();

/// Byte length of a weight file for `topology`.
pub fn expected_len(topology: &Topology) -> u64 {
    (topology.parameter_count() * SCALAR_BYTES) as u64
}

pub fn save_weights<P: AsRef<Path>>(path: P, weights: &Weights) -> Result<()> {
    let mut file = BufWriter::new(File::create(path.as_ref())?);
    for w in weights.iter() {
        // iteration order of an Array2 is logical row-major
        for x in w.iter() {
            file.write_all(&x.to_ne_bytes())?;
        }
    }
    file.flush()?;
    tracing::debug!(
        path = %path.as_ref().display(),
        matrices = weights.len(),
        "saved weights"
    );
    Ok(())
}

pub fn load_weights<P: AsRef<Path>>(path: P, topology: &Topology) -> Result<Weights> {
    let bytes = fs::read(path.as_ref())?;
    let expected = expected_len(topology);
    if bytes.len() as u64 != expected {
        return Err(NNError::WeightFileLength {
            expected,
            actual: bytes.len() as u64,
        });
    }

    let mut scalars = bytes.chunks_exact(SCALAR_BYTES).map(|chunk| {
        let mut raw = [0u8; SCALAR_BYTES];
        raw.copy_from_slice(chunk);
        f64::from_ne_bytes(raw)
    });

    let mut matrices = Vec::with_capacity(topology.num_layers() - 1);
    for (rows, cols) in topology.weight_shapes() {
        let values: Vec<f64> = scalars.by_ref().take(rows * cols).collect();
        matrices.push(
            Array2::from_shape_vec((rows, cols), values)
                .map_err(|e| NNError::ShapeMismatch(e.to_string()))?,
        );
    }
    tracing::debug!(
        path = %path.as_ref().display(),
        topology = %topology,
        "loaded weights"
    );
    Weights::from_matrices(topology, matrices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.bin");
        let topology = Topology::new(vec![4, 6, 3, 2]).unwrap();
        let weights = Weights::random(&topology);

        save_weights(&path, &weights).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), expected_len(&topology));
        assert_eq!(load_weights(&path, &topology).unwrap(), weights);
    }

    #[test]
    fn layout_is_row_major_by_transition() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.bin");
        let topology = Topology::new(vec![1, 2]).unwrap();
        let weights = Weights::from_matrices(&topology, vec![array![[1.0, 2.0], [3.0, 4.0]]]).unwrap();
        save_weights(&path, &weights).unwrap();

        let bytes = fs::read(&path).unwrap();
        let values: Vec<f64> = bytes
            .chunks_exact(8)
            .map(|c| f64::from_ne_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn length_mismatch_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.bin");
        let small = Topology::new(vec![2, 2, 1]).unwrap();
        let large = Topology::new(vec![2, 3, 1]).unwrap();
        save_weights(&path, &Weights::random(&small)).unwrap();

        match load_weights(&path, &large) {
            Err(NNError::WeightFileLength { expected, actual }) => {
                assert_eq!(expected, 13 * 8);
                assert_eq!(actual, 9 * 8);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("weights.bin");
        let topology = Topology::new(vec![1, 1]).unwrap();
        assert!(matches!(
            save_weights(&path, &Weights::random(&topology)),
            Err(NNError::Io(_))
        ));
        assert!(matches!(load_weights(&path, &topology), Err(NNError::Io(_))));
    }
}
