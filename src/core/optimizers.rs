use crate::prelude::*;

/// Decayed cyclical learning rate for `epoch`.
///
/// Within a cycle the rate ramps linearly from `top_rate` down towards
/// `bot_rate`, and the whole curve is divided by `1 + decay_rate * epoch`.
pub fn schedule(config: &Configuration, epoch: usize) -> f64 {
    let cycle = config.cycle_length.max(1);
    let phase = (epoch % cycle) as f64 / cycle as f64;
    (config.top_rate - (config.top_rate - config.bot_rate) * phase)
        / (1.0 + config.decay_rate * epoch as f64)
}

/// Plain SGD step: `w[row, col] -= rate * error[col] * activations[row]`.
///
/// `error` must already be restricted to the destination's non-bias columns.
pub fn sgd_update(
    weights: &mut Array2<f64>,
    activations: ArrayView1<f64>,
    error: ArrayView1<f64>,
    learning_rate: f64,
) {
    debug_assert_eq!(weights.nrows(), activations.len());
    debug_assert_eq!(weights.ncols(), error.len());
    let grad = activations
        .insert_axis(Axis(1))
        .dot(&error.insert_axis(Axis(0)));
    weights.scaled_add(-learning_rate, &grad);
}
