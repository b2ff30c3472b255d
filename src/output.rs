use crate::prelude::*;
use csv::Writer;
use std::path::Path;

/// CSV sink for per-epoch training statistics.
pub struct EpochLog {
    wtr: Writer<File>,
}

impl EpochLog {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut wtr = Writer::from_path(path)?;
        wtr.write_record(["epoch", "mean_abs_error", "learning_rate"])?;
        Ok(Self { wtr })
    }

    pub fn record(&mut self, epoch: usize, error: f64, learning_rate: f64) -> Result<()> {
        self.wtr.write_record(&[
            epoch.to_string(),
            error.to_string(),
            learning_rate.to_string(),
        ])?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

/// CSV sink for per-example test results: inputs, outputs, then the L1 error.
pub struct ExampleLog {
    wtr: Writer<File>,
}

impl ExampleLog {
    pub fn create<P: AsRef<Path>>(path: P, topology: &Topology) -> Result<Self> {
        let mut wtr = Writer::from_path(path)?;
        let header: Vec<String> = (0..topology.input_width())
            .map(|i| format!("in{}", i))
            .chain((0..topology.output_width()).map(|i| format!("out{}", i)))
            .chain(std::iter::once("error".to_string()))
            .collect();
        wtr.write_record(&header)?;
        Ok(Self { wtr })
    }

    pub fn record(&mut self, input: &Array1<f64>, output: &Array1<f64>, error: f64) -> Result<()> {
        let record: Vec<String> = input
            .iter()
            .chain(output.iter())
            .chain(std::iter::once(&error))
            .map(|x| x.to_string())
            .collect();
        self.wtr.write_record(&record)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn epoch_log_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");
        let mut log = EpochLog::create(&path).unwrap();
        log.record(0, 0.5, 0.1).unwrap();
        log.record(1, 0.25, 0.05).unwrap();
        log.finish().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "epoch,mean_abs_error,learning_rate\n0,0.5,0.1\n1,0.25,0.05\n"
        );
    }

    #[test]
    fn example_log_collects_test_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.csv");
        let topology = Topology::new(vec![2, 1]).unwrap();
        let weights = Weights::from_matrices(&topology, vec![array![[1.0], [1.0], [0.0]]]).unwrap();
        let config = Configuration::constant(0.1, Activation::Identity, Activation::Identity);
        let mut net = Network::with_weights(config, topology.clone(), weights).unwrap();
        let data = vec![TrainingDatum::new(array![1.0, 2.0], array![2.5])];

        let mut log = ExampleLog::create(&path, &topology).unwrap();
        let mut failures = Vec::new();
        net.test(&data, |input, output, error| {
            if let Err(e) = log.record(input, output, error) {
                failures.push(e);
            }
        })
        .unwrap();
        log.finish().unwrap();
        assert!(failures.is_empty());

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "in0,in1,out0,error\n1,2,3,0.5\n");
    }
}
