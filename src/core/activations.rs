use crate::prelude::*;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Identity,
    Sigmoid,
    Tanh,
    BinaryStep,
}

impl Activation {
    /// Resolves a configuration-file name. Anything unrecognized is `Identity`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "sigmoid" => Self::Sigmoid,
            "tanh" => Self::Tanh,
            "binary" => Self::BinaryStep,
            _ => Self::Identity,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "none",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::BinaryStep => "binary",
        }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Sigmoid => sigmoid(x),
            Self::Tanh => x.tanh(),
            Self::BinaryStep => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Derivative with respect to the pre-activation `x`.
    ///
    /// `BinaryStep` reports 1 everywhere so the chain rule stays usable.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Self::Identity | Self::BinaryStep => 1.0,
            Self::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            Self::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }

    pub fn forward(&self, z: ArrayView1<f64>) -> Array1<f64> {
        z.mapv(|z| self.apply(z))
    }

    pub fn backward(&self, z: ArrayView1<f64>) -> Array1<f64> {
        z.mapv(|z| self.derivative(z))
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
