use crate::prelude::*;

/// Per-layer neuron counts, input layer first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology(Vec<usize>);

impl Topology {
    pub fn new(sizes: Vec<usize>) -> Result<Self> {
        if sizes.len() < 2 {
            return Err(NNError::InvalidTopology(format!(
                "need at least an input and an output layer, got {} layer(s)",
                sizes.len()
            )));
        }
        if let Some(i) = sizes.iter().position(|&n| n == 0) {
            return Err(NNError::InvalidTopology(format!("layer {} has no neurons", i)));
        }
        Ok(Self(sizes))
    }

    pub fn sizes(&self) -> &[usize] {
        &self.0
    }

    pub fn num_layers(&self) -> usize {
        self.0.len()
    }

    pub fn input_width(&self) -> usize {
        self.0[0]
    }

    pub fn output_width(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    /// Every layer but the output carries a bias unit.
    pub fn has_bias(&self, layer: usize) -> bool {
        layer + 1 < self.0.len()
    }

    /// Working width of a layer, bias slot included.
    pub fn layer_width(&self, layer: usize) -> usize {
        self.0[layer] + usize::from(self.has_bias(layer))
    }

    /// `(rows, cols)` of every transition matrix. Rows include the source
    /// bias slot, columns never include the destination's.
    pub fn weight_shapes(&self) -> Vec<(usize, usize)> {
        (0..self.0.len() - 1)
            .map(|t| (self.layer_width(t), self.0[t + 1]))
            .collect()
    }

    pub fn parameter_count(&self) -> usize {
        self.weight_shapes().iter().map(|(r, c)| r * c).sum()
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = String;

    fn try_from(sizes: Vec<usize>) -> std::result::Result<Self, String> {
        Topology::new(sizes).map_err(|e| e.to_string())
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Vec<usize> {
        topology.0
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let sizes: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "[{}]", sizes.join(", "))
    }
}

/// Neuron, pre-activation and error buffers of one layer.
///
/// The logical width and the bias flag are kept apart from the buffer length;
/// when present the bias unit is the last slot and stays at `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    width: usize,
    has_bias: bool,
    pub(crate) neurons: Array1<f64>,
    pub(crate) pre_activation: Array1<f64>,
    pub(crate) error: Array1<f64>,
}

impl Layer {
    pub fn new(width: usize, has_bias: bool) -> Self {
        let physical = width + usize::from(has_bias);
        let mut neurons = Array1::<f64>::zeros(physical);
        let mut pre_activation = Array1::<f64>::zeros(physical);
        if has_bias {
            neurons[width] = 1.0;
            pre_activation[width] = 1.0;
        }
        Self {
            width,
            has_bias,
            neurons,
            pre_activation,
            error: Array1::zeros(physical),
        }
    }

    /// Builds every layer of a topology.
    pub fn stack(topology: &Topology) -> Vec<Layer> {
        topology
            .sizes()
            .iter()
            .enumerate()
            .map(|(i, &n)| Layer::new(n, topology.has_bias(i)))
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn has_bias(&self) -> bool {
        self.has_bias
    }

    pub fn physical_width(&self) -> usize {
        self.neurons.len()
    }

    pub fn bias(&self) -> Option<f64> {
        self.has_bias.then(|| self.neurons[self.width])
    }

    /// Non-bias neuron values.
    pub fn values(&self) -> ArrayView1<f64> {
        self.neurons.slice(s![..self.width])
    }

    pub fn neurons(&self) -> ArrayView1<f64> {
        self.neurons.view()
    }

    pub fn pre_activation(&self) -> ArrayView1<f64> {
        self.pre_activation.view()
    }

    pub fn error(&self) -> ArrayView1<f64> {
        self.error.view()
    }

    pub(crate) fn set_values(&mut self, values: ArrayView1<f64>) {
        self.neurons.slice_mut(s![..self.width]).assign(&values);
    }

    /// Writes the weighted sums and their activations into the non-bias slots.
    pub(crate) fn activate(&mut self, z: ArrayView1<f64>, activation: Activation) {
        let width = self.width;
        self.pre_activation.slice_mut(s![..width]).assign(&z);
        let a = activation.forward(z);
        self.neurons.slice_mut(s![..width]).assign(&a);
    }

    pub(crate) fn reset_error(&mut self) {
        self.error.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_rejects_degenerate_shapes() {
        assert!(matches!(Topology::new(vec![3]), Err(NNError::InvalidTopology(_))));
        assert!(matches!(Topology::new(vec![]), Err(NNError::InvalidTopology(_))));
        assert!(matches!(Topology::new(vec![2, 0, 1]), Err(NNError::InvalidTopology(_))));
    }

    #[test]
    fn deserializing_validates_sizes() {
        let t = Topology::new(vec![2, 3, 1]).unwrap();
        let bytes = bincode::serialize(&t).unwrap();
        assert_eq!(bincode::deserialize::<Topology>(&bytes).unwrap(), t);

        for sizes in [vec![], vec![4], vec![2, 0, 1]] {
            let bytes = bincode::serialize(&sizes).unwrap();
            assert!(bincode::deserialize::<Topology>(&bytes).is_err());
        }
    }

    #[test]
    fn widths_and_weight_shapes() {
        let t = Topology::new(vec![2, 3, 1]).unwrap();
        assert_eq!(t.layer_width(0), 3);
        assert_eq!(t.layer_width(1), 4);
        assert_eq!(t.layer_width(2), 1);
        assert_eq!(t.weight_shapes(), vec![(3, 3), (4, 1)]);
        assert_eq!(t.parameter_count(), 13);
        assert_eq!(t.to_string(), "[2, 3, 1]");
    }

    #[test]
    fn bias_slots_start_at_one() {
        let layers = Layer::stack(&Topology::new(vec![4, 2, 3]).unwrap());
        assert_eq!(layers.len(), 3);
        for layer in &layers[..2] {
            assert_eq!(layer.bias(), Some(1.0));
            assert_eq!(layer.pre_activation[layer.width()], 1.0);
            assert_eq!(layer.physical_width(), layer.width() + 1);
            assert_eq!(layer.error().len(), layer.physical_width());
        }
        assert_eq!(layers[2].bias(), None);
        assert_eq!(layers[2].physical_width(), 3);
    }

    #[test]
    fn activate_leaves_bias_alone() {
        let mut layer = Layer::new(2, true);
        layer.activate(array![-1.0, 2.0].view(), Activation::BinaryStep);
        assert_eq!(layer.neurons, array![0.0, 1.0, 1.0]);
        assert_eq!(layer.pre_activation, array![-1.0, 2.0, 1.0]);
        assert_eq!(layer.values(), array![0.0, 1.0]);
    }
}
