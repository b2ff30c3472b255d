//! Whitespace-separated text formats for topology, configuration and
//! training data files.

use crate::prelude::*;
use std::fs;
use std::path::Path;
use std::str::FromStr;

fn parse_token<T: FromStr>(token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| NNError::Parse(format!("{} `{}`", what, token)))
}

/// Parses a topology, e.g. `"2 3 1"`.
pub fn parse_topology(text: &str) -> Result<Topology> {
    let sizes = text
        .split_whitespace()
        .map(|t| parse_token(t, "layer size"))
        .collect::<Result<Vec<usize>>>()?;
    Topology::new(sizes)
}

pub fn read_topology<P: AsRef<Path>>(path: P) -> Result<Topology> {
    let topology = parse_topology(&fs::read_to_string(path.as_ref())?)?;
    tracing::debug!(path = %path.as_ref().display(), %topology, "read topology");
    Ok(topology)
}

/// Parses `top_rate bot_rate decay_rate cycle_length hidden output`.
pub fn parse_configuration(text: &str) -> Result<Configuration> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 6 {
        return Err(NNError::InvalidConfiguration(format!(
            "expected 6 fields (top_rate bot_rate decay_rate cycle_length hidden output), got {}",
            tokens.len()
        )));
    }
    Configuration::new(
        parse_token(tokens[0], "top_rate")?,
        parse_token(tokens[1], "bot_rate")?,
        parse_token(tokens[2], "decay_rate")?,
        parse_token(tokens[3], "cycle_length")?,
        Activation::from_name(tokens[4]),
        Activation::from_name(tokens[5]),
    )
}

pub fn read_configuration<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    let config = parse_configuration(&fs::read_to_string(path.as_ref())?)?;
    tracing::debug!(path = %path.as_ref().display(), ?config, "read configuration");
    Ok(config)
}

/// Parses consecutive groups of `input_width + output_width` values.
pub fn parse_training_data(text: &str, topology: &Topology) -> Result<TrainingData> {
    let values = text
        .split_whitespace()
        .map(|t| parse_token(t, "value"))
        .collect::<Result<Vec<f64>>>()?;

    let (n_in, n_out) = (topology.input_width(), topology.output_width());
    let group = n_in + n_out;
    if values.len() % group != 0 {
        return Err(NNError::InvalidData(format!(
            "{} values do not split into examples of {} ({} in, {} out)",
            values.len(),
            group,
            n_in,
            n_out
        )));
    }
    Ok(values
        .chunks_exact(group)
        .map(|chunk| {
            TrainingDatum::new(
                Array1::from_vec(chunk[..n_in].to_vec()),
                Array1::from_vec(chunk[n_in..].to_vec()),
            )
        })
        .collect())
}

pub fn read_training_data<P: AsRef<Path>>(path: P, topology: &Topology) -> Result<TrainingData> {
    let data = parse_training_data(&fs::read_to_string(path.as_ref())?, topology)?;
    tracing::debug!(path = %path.as_ref().display(), examples = data.len(), "read training data");
    Ok(data)
}
