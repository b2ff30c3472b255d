use crate::error::{NNError, Result};
use plotters::prelude::*;
use std::path::Path;

/// Draws the per-epoch mean absolute error on a log10 scale to a PNG.
///
/// Only the bitmap backend is used, so the chart carries no text.
pub fn plot_errors_over_epochs<P: AsRef<Path>>(errors: &[f64], filename: P) -> Result<()> {
    draw(errors, filename.as_ref()).map_err(|e| NNError::Plot(e.to_string()))
}

fn draw(errors: &[f64], filename: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
    if errors.is_empty() {
        return Err("no epochs to plot".into());
    }
    let root = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    // Adjust errors to avoid log of zero or negative numbers
    let log_errors: Vec<f64> = errors
        .iter()
        .map(|&e| if e <= 0.0 || !e.is_finite() { 1e-10 } else { e })
        .map(|e| e.log10())
        .collect();

    let y_min = log_errors.iter().cloned().fold(f64::INFINITY, f64::min).floor();
    let mut y_max = log_errors
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max)
        .ceil();
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(0..errors.len(), y_min..y_max)?;

    chart.draw_series(LineSeries::new(
        log_errors.iter().enumerate().map(|(epoch, &e)| (epoch, e)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = plot_errors_over_epochs(&[], dir.path().join("errors.png"));
        assert!(matches!(res, Err(NNError::Plot(_))));
    }

    #[test]
    fn writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.png");
        plot_errors_over_epochs(&[0.5, 0.4, 0.1, 0.0], &path).unwrap();
        assert!(path.exists());
    }
}
