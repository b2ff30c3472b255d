use crate::prelude::*;
use crate::core::losses::{l1, mean_abs_error, output_error};
use crate::core::optimizers::{schedule, sgd_update};
use rand::Rng;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One input/expected-output pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrainingDatum {
    pub input: Array1<f64>,
    pub expected: Array1<f64>,
}

impl TrainingDatum {
    pub fn new(input: Array1<f64>, expected: Array1<f64>) -> Self {
        Self { input, expected }
    }
}

pub type TrainingData = Vec<TrainingDatum>;

/// Multilayer feedforward network trained one example at a time.
#[derive(Debug, Clone)]
pub struct Network {
    config: Configuration,
    topology: Topology,
    layers: Vec<Layer>,
    weights: Weights,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    config: Configuration,
    topology: Topology,
    weights: Weights,
}

impl Network {
    /// Builds a network with uniformly random weights.
    pub fn new(config: Configuration, topology: Topology) -> Result<Self> {
        let weights = Weights::random(&topology);
        Self::assemble(config, topology, weights)
    }

    /// Same as [`Network::new`] with weights drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        config: Configuration,
        topology: Topology,
        rng: &mut R,
    ) -> Result<Self> {
        let weights = Weights::random_using(&topology, rng);
        Self::assemble(config, topology, weights)
    }

    /// Builds a network around existing weights, e.g. from the weight codec.
    pub fn with_weights(config: Configuration, topology: Topology, weights: Weights) -> Result<Self> {
        weights.check(&topology)?;
        Self::assemble(config, topology, weights)
    }

    fn assemble(config: Configuration, topology: Topology, weights: Weights) -> Result<Self> {
        config.validate()?;
        let layers = Layer::stack(&topology);
        Ok(Self {
            config,
            topology,
            layers,
            weights,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn into_weights(self) -> Weights {
        self.weights
    }

    /// Output layer values from the most recent forward pass.
    pub fn output(&self) -> ArrayView1<f64> {
        self.layers[self.layers.len() - 1].neurons()
    }

    pub fn summary(&self) -> String {
        let mut res = "\nNetwork\n".to_string();
        res.push_str("-------------------------------------------------------------\n");
        res.push_str("Layer\t Neurons\t Bias\t Activation\t No.of params\n");
        let num_layers = self.layers.len();
        for (i, layer) in self.layers.iter().enumerate() {
            let (activation, params) = if i == 0 {
                ("input".to_string(), 0)
            } else {
                (
                    self.config.activation_for(i, num_layers).to_string(),
                    self.weights[i - 1].len(),
                )
            };
            res.push_str(&format!(
                "{}\t {}\t\t {}\t {}\t\t {}\n",
                i,
                layer.width(),
                if layer.has_bias() { "yes" } else { "no" },
                activation,
                params
            ));
        }
        res.push_str("-------------------------------------------------------------\n");
        res.push_str(&format!("Total params: {}\n", self.weights.parameter_count()));
        res
    }

    /// Forward pass. Returns a copy of the output layer.
    pub fn generate(&mut self, input: &Array1<f64>) -> Result<Array1<f64>> {
        if input.len() != self.topology.input_width() {
            return Err(NNError::DimensionMismatch {
                what: "input",
                expected: self.topology.input_width(),
                actual: input.len(),
            });
        }
        self.layers[0].set_values(input.view());

        let num_layers = self.layers.len();
        for i in 1..num_layers {
            let z = self.layers[i - 1].neurons.dot(&self.weights[i - 1]);
            let activation = self.config.activation_for(i, num_layers);
            self.layers[i].activate(z.view(), activation);
        }
        Ok(self.layers[num_layers - 1].neurons.clone())
    }

    /// Backpropagates `expected` against the last forward pass and returns
    /// the output-layer error.
    pub fn propagate_error(&mut self, expected: &Array1<f64>) -> Result<Array1<f64>> {
        let num_layers = self.layers.len();
        let last = num_layers - 1;

        let out = output_error(self.layers[last].neurons.view(), expected.view())?;
        if out.iter().any(|e| e.is_nan()) {
            return Err(NNError::NumericalInstability { layer: last });
        }
        self.layers[last].error.assign(&out);

        // Hidden layers, last one first. The input layer carries no error.
        for layer in (1..last).rev() {
            let upstream = {
                let next = &self.layers[layer + 1];
                next.error.slice(s![..next.width()]).to_owned()
            };
            let mut err = self.weights[layer].dot(&upstream);

            // the step next to the output follows the output activation
            let activation = if layer + 1 == last {
                self.config.output_activation
            } else {
                self.config.hidden_activation
            };
            err *= &activation.backward(self.layers[layer].pre_activation.view());

            if err.iter().any(|e| e.is_nan()) {
                return Err(NNError::NumericalInstability { layer });
            }
            self.layers[layer].error.assign(&err);
        }
        Ok(out)
    }

    /// Applies one SGD step per transition using the stored errors.
    pub fn update_weights(&mut self, learning_rate: f64) {
        for (t, w) in self.weights.matrices_mut().iter_mut().enumerate() {
            let dest = &self.layers[t + 1];
            sgd_update(
                w,
                self.layers[t].neurons.view(),
                dest.error.slice(s![..dest.width()]),
                learning_rate,
            );
        }
    }

    pub fn reset_error(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.reset_error();
        }
    }

    /// Forward pass, backpropagation and weight update for one example.
    ///
    /// Returns the output error measured before the update.
    pub fn teach(
        &mut self,
        input: &Array1<f64>,
        expected: &Array1<f64>,
        learning_rate: f64,
    ) -> Result<Array1<f64>> {
        self.generate(input)?;
        let score = match self.propagate_error(expected) {
            Ok(score) => score,
            Err(err) => {
                self.reset_error();
                return Err(err);
            }
        };
        self.update_weights(learning_rate);
        self.reset_error();
        Ok(score)
    }

    /// Runs `epochs` passes over `data`, calling `observer(epoch, mean_abs_error, rate)`
    /// after each one. Returns the per-epoch mean absolute errors.
    pub fn train<F>(&mut self, data: &[TrainingDatum], epochs: usize, mut observer: F) -> Result<Vec<f64>>
    where
        F: FnMut(usize, f64, f64),
    {
        if data.is_empty() {
            return Err(NNError::EmptyDataset);
        }
        let mut history = Vec::with_capacity(epochs);
        for epoch in 0..epochs {
            let rate = schedule(&self.config, epoch);
            let mut total = 0.0;
            for datum in data {
                let score = self.teach(&datum.input, &datum.expected, rate)?;
                total += l1(score.view());
            }
            let error = mean_abs_error(total, data.len())?;
            observer(epoch, error, rate);
            history.push(error);
        }
        Ok(history)
    }

    /// Mean absolute error over `data` without touching the weights.
    /// `observer(input, output, error)` sees every example.
    pub fn test<F>(&mut self, data: &[TrainingDatum], mut observer: F) -> Result<f64>
    where
        F: FnMut(&Array1<f64>, &Array1<f64>, f64),
    {
        if data.is_empty() {
            return Err(NNError::EmptyDataset);
        }
        let mut total = 0.0;
        for datum in data {
            let output = self.generate(&datum.input)?;
            let error = l1(output_error(output.view(), datum.expected.view())?.view());
            observer(&datum.input, &output, error);
            total += error;
        }
        mean_abs_error(total, data.len())
    }

    /// Saves configuration, topology and weights in one bincode file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = Snapshot {
            config: self.config.clone(),
            topology: self.topology.clone(),
            weights: self.weights.clone(),
        };
        let writer = BufWriter::new(File::create(path.as_ref())?);
        bincode::serialize_into(writer, &snapshot)?;
        tracing::debug!(path = %path.as_ref().display(), "saved network snapshot");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let snapshot: Snapshot = bincode::deserialize_from(reader)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            topology = %snapshot.topology,
            "loaded network snapshot"
        );
        Network::with_weights(snapshot.config, snapshot.topology, snapshot.weights)
    }
}
