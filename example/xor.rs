use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ffnet::prelude::*;
use ffnet::{topology, training_data};

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data: TrainingData = training_data![
        [0, 0] => [0],
        [0, 1] => [1],
        [1, 0] => [1],
        [1, 1] => [0],
    ];

    let config = Configuration::new(0.8, 0.2, 0.0005, 50, Activation::Sigmoid, Activation::Sigmoid)?;
    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::with_rng(config, topology![2, 3, 1]?, &mut rng)?;

    println!("{}", network.summary());

    network.train(&data, 5000, |epoch, error, rate| {
        if epoch % 500 == 0 {
            info!("Epoch: {} error: {:.5} rate: {:.5}", epoch, error, rate);
        }
    })?;

    let error = network.test(&data, |input, output, _| {
        println!("{} -> {:.4}", input, output[0]);
    })?;
    println!("\nmean absolute error: {}\n", error);

    network.save("./xor.model")?;

    Ok(())
}
