use crate::prelude::*;

/// Learning-rate schedule parameters and per-layer activations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Configuration {
    pub top_rate: f64,
    pub bot_rate: f64,
    pub decay_rate: f64,
    pub cycle_length: usize,
    pub hidden_activation: Activation,
    pub output_activation: Activation,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            top_rate: 0.01,
            bot_rate: 0.0001,
            decay_rate: 0.0,
            cycle_length: 1,
            hidden_activation: Activation::Identity,
            output_activation: Activation::Identity,
        }
    }
}

impl Configuration {
    pub fn new(
        top_rate: f64,
        bot_rate: f64,
        decay_rate: f64,
        cycle_length: usize,
        hidden_activation: Activation,
        output_activation: Activation,
    ) -> Result<Self> {
        let config = Self {
            top_rate,
            bot_rate,
            decay_rate,
            cycle_length,
            hidden_activation,
            output_activation,
        };
        config.validate()?;
        Ok(config)
    }

    /// A schedule that always yields `rate`.
    pub fn constant(rate: f64, hidden: Activation, output: Activation) -> Self {
        Self {
            top_rate: rate,
            bot_rate: rate,
            decay_rate: 0.0,
            cycle_length: 1,
            hidden_activation: hidden,
            output_activation: output,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cycle_length == 0 {
            return Err(NNError::InvalidConfiguration(
                "cycle_length must be positive".to_string(),
            ));
        }
        for (name, v) in [
            ("top_rate", self.top_rate),
            ("bot_rate", self.bot_rate),
            ("decay_rate", self.decay_rate),
        ] {
            if !v.is_finite() {
                return Err(NNError::InvalidConfiguration(format!("{} is {}", name, v)));
            }
        }
        Ok(())
    }

    /// Activation producing layer `layer` of a network with `num_layers` layers.
    pub fn activation_for(&self, layer: usize, num_layers: usize) -> Activation {
        if layer + 1 < num_layers {
            self.hidden_activation
        } else {
            self.output_activation
        }
    }

    pub fn learning_rate(&self, epoch: usize) -> f64 {
        crate::core::optimizers::schedule(self, epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cycle_is_rejected() {
        let err = Configuration::new(0.1, 0.01, 0.0, 0, Activation::Tanh, Activation::Tanh);
        assert!(matches!(err, Err(NNError::InvalidConfiguration(_))));
    }

    #[test]
    fn non_finite_rate_is_rejected() {
        let err = Configuration::new(f64::NAN, 0.01, 0.0, 3, Activation::Tanh, Activation::Tanh);
        assert!(matches!(err, Err(NNError::InvalidConfiguration(_))));
    }

    #[test]
    fn output_layer_uses_output_activation() {
        let c = Configuration::constant(0.1, Activation::Tanh, Activation::Sigmoid);
        assert_eq!(c.activation_for(1, 3), Activation::Tanh);
        assert_eq!(c.activation_for(2, 3), Activation::Sigmoid);
        assert_eq!(c.learning_rate(12), 0.1);
    }
}
