//! Interactive console for a network folder.
//!
//! The folder holds `topology.txt` and optionally `config.txt`, `weights.bin`,
//! `training_data.txt` and `test_data.txt`.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use ffnet::io::{read_configuration, read_topology, read_training_data};
use ffnet::output::{EpochLog, ExampleLog};
use ffnet::plot::plot_errors_over_epochs;
use ffnet::{codec, Configuration, NNError, Network};

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Train and query a feedforward network stored in a folder", long_about = None)]
struct Cli {
    /// Network folder
    folder: PathBuf,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

struct Files {
    topology: PathBuf,
    config: PathBuf,
    weights: PathBuf,
    training_data: PathBuf,
    test_data: PathBuf,
    training_stats: PathBuf,
    test_stats: PathBuf,
    error_plot: PathBuf,
}

impl Files {
    fn new(folder: &Path) -> Self {
        Self {
            topology: folder.join("topology.txt"),
            config: folder.join("config.txt"),
            weights: folder.join("weights.bin"),
            training_data: folder.join("training_data.txt"),
            test_data: folder.join("test_data.txt"),
            training_stats: folder.join("training_stats.csv"),
            test_stats: folder.join("test_stats.csv"),
            error_plot: folder.join("errors.png"),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

struct Console {
    files: Files,
    network: Network,
    history: Vec<f64>,
}

impl Console {
    fn open(folder: &Path) -> Result<Self> {
        let files = Files::new(folder);
        if !files.topology.exists() {
            bail!("topology file {} does not exist", files.topology.display());
        }
        let topology = read_topology(&files.topology).context("reading topology")?;

        let config = if files.config.exists() {
            read_configuration(&files.config).context("reading configuration")?
        } else {
            info!("No config.txt found, using default configuration");
            Configuration::default()
        };

        let network = if files.weights.exists() {
            info!("Loading weights from {}...", files.weights.display());
            let weights = codec::load_weights(&files.weights, &topology).context("reading weights")?;
            Network::with_weights(config, topology, weights)?
        } else {
            info!("No weights file found. Creating new network with random weights...");
            Network::new(config, topology)?
        };

        Ok(Self {
            files,
            network,
            history: Vec::new(),
        })
    }

    fn run(&mut self, command: &str, args: &[&str]) -> Result<Flow> {
        match command {
            "exit" => return Ok(Flow::Exit),
            "save" => self.save()?,
            "train" => {
                let epochs = args
                    .first()
                    .ok_or_else(|| anyhow!("usage: train <epochs>"))?
                    .parse::<usize>()
                    .context("epochs must be a non-negative integer")?;
                self.train(epochs)?;
            }
            "test" => self.query(args)?,
            "eval" => self.eval()?,
            "rate" => self.rate(args)?,
            "plot" => {
                plot_errors_over_epochs(&self.history, &self.files.error_plot)?;
                info!("Error plot saved as {}", self.files.error_plot.display());
            }
            "summary" => println!("{}", self.network.summary()),
            _ => bail!("command `{}` not recognised", command),
        }
        Ok(Flow::Continue)
    }

    fn save(&self) -> Result<()> {
        codec::save_weights(&self.files.weights, self.network.weights())
            .with_context(|| format!("saving weights to {}", self.files.weights.display()))?;
        info!("Weights saved to file {}.", self.files.weights.display());
        Ok(())
    }

    fn train(&mut self, epochs: usize) -> Result<()> {
        if !self.files.training_data.exists() {
            bail!("training data file (training_data.txt) does not exist");
        }
        let data = read_training_data(&self.files.training_data, self.network.topology())?;
        info!("Training network for {} epochs on {} examples.", epochs, data.len());

        let mut log = EpochLog::create(&self.files.training_stats)?;
        let mut log_failure: Option<NNError> = None;
        let start = Instant::now();
        let history = self.network.train(&data, epochs, |epoch, error, rate| {
            debug!(epoch, error, rate, "epoch finished");
            if log_failure.is_none() {
                if let Err(e) = log.record(epoch, error, rate) {
                    log_failure = Some(e);
                }
            }
        })?;
        let elapsed = start.elapsed();
        log.finish()?;
        if let Some(e) = log_failure {
            error!("Could not write training statistics: {}", e);
        }

        info!("Training complete.");
        if let Some(last) = history.last() {
            info!("Final mean absolute error: {}", last);
        }
        if epochs > 0 {
            let per_epoch = elapsed.as_secs_f64() * 1000.0 / epochs as f64;
            info!("Training took {:.3} ms per epoch on average.", per_epoch);
        }
        self.history.extend(history);
        Ok(())
    }

    fn query(&mut self, args: &[&str]) -> Result<()> {
        let values = args
            .iter()
            .map(|a| a.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .context("inputs must be numbers")?;
        let output = self.network.generate(&values.into())?;
        println!("Output: {}", output);
        Ok(())
    }

    fn eval(&mut self) -> Result<()> {
        if !self.files.test_data.exists() {
            bail!("test data file (test_data.txt) does not exist");
        }
        let data = read_training_data(&self.files.test_data, self.network.topology())?;
        let mut log = ExampleLog::create(&self.files.test_stats, self.network.topology())?;
        let mut log_failure: Option<NNError> = None;
        let error = self.network.test(&data, |input, output, error| {
            if log_failure.is_none() {
                if let Err(e) = log.record(input, output, error) {
                    log_failure = Some(e);
                }
            }
        })?;
        log.finish()?;
        if let Some(e) = log_failure {
            error!("Could not write test statistics: {}", e);
        }
        info!("Mean absolute error over {} examples: {}", data.len(), error);
        Ok(())
    }

    /// Rebuilds the network under new schedule bounds, keeping its weights.
    fn rate(&mut self, args: &[&str]) -> Result<()> {
        let [bot, top] = args else {
            bail!("usage: rate <bot_rate> <top_rate>");
        };
        let config = Configuration {
            bot_rate: bot.parse().context("bot_rate must be a number")?,
            top_rate: top.parse().context("top_rate must be a number")?,
            ..self.network.config().clone()
        };
        self.network = Network::with_weights(
            config,
            self.network.topology().clone(),
            self.network.weights().clone(),
        )?;
        info!(
            "Learning rate now ramps from {} to {}.",
            self.network.config().top_rate,
            self.network.config().bot_rate
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Welcome to the Neural Network Console.");
    let mut console = Console::open(&cli.folder)?;
    info!("Network topology {}", console.network.topology());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();
        match console.run(command, &args) {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => error!("{:#}", e),
        }
    }
    Ok(())
}
