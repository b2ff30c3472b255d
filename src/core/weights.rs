use crate::prelude::*;
use rand::Rng;

/// Initial weights are drawn uniformly from this range.
pub const INIT_LOW: f64 = -1.0;
pub const INIT_HIGH: f64 = 1.0;

/// One matrix per layer transition, `topology.len() - 1` in total.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Weights {
    matrices: Vec<Array2<f64>>,
}

impl Weights {
    pub fn random(topology: &Topology) -> Self {
        let matrices = topology
            .weight_shapes()
            .into_iter()
            .map(|shape| Array2::random(shape, Uniform::new(INIT_LOW, INIT_HIGH)))
            .collect();
        Self { matrices }
    }

    pub fn random_using<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Self {
        let matrices = topology
            .weight_shapes()
            .into_iter()
            .map(|shape| Array2::random_using(shape, Uniform::new(INIT_LOW, INIT_HIGH), &mut *rng))
            .collect();
        Self { matrices }
    }

    /// Adopts pre-built matrices after checking them against `topology`.
    pub fn from_matrices(topology: &Topology, matrices: Vec<Array2<f64>>) -> Result<Self> {
        let shapes = topology.weight_shapes();
        if matrices.len() != shapes.len() {
            return Err(NNError::ShapeMismatch(format!(
                "topology {} needs {} matrices, got {}",
                topology,
                shapes.len(),
                matrices.len()
            )));
        }
        for (t, (w, &(rows, cols))) in matrices.iter().zip(shapes.iter()).enumerate() {
            if w.dim() != (rows, cols) {
                return Err(NNError::ShapeMismatch(format!(
                    "transition {} expects ({}, {}), got {:?}",
                    t,
                    rows,
                    cols,
                    w.dim()
                )));
            }
        }
        Ok(Self { matrices })
    }

    /// Checks an existing store against `topology`.
    pub fn check(&self, topology: &Topology) -> Result<()> {
        let shapes = topology.weight_shapes();
        let dims: Vec<(usize, usize)> = self.matrices.iter().map(|w| w.dim()).collect();
        if dims != shapes {
            return Err(NNError::ShapeMismatch(format!(
                "topology {} expects {:?}, got {:?}",
                topology, shapes, dims
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Array2<f64>> {
        self.matrices.iter()
    }

    pub fn matrices(&self) -> &[Array2<f64>] {
        &self.matrices
    }

    pub(crate) fn matrices_mut(&mut self) -> &mut [Array2<f64>] {
        &mut self.matrices
    }

    pub fn parameter_count(&self) -> usize {
        self.matrices.iter().map(|w| w.len()).sum()
    }
}

impl std::ops::Index<usize> for Weights {
    type Output = Array2<f64>;

    fn index(&self, transition: usize) -> &Array2<f64> {
        &self.matrices[transition]
    }
}
