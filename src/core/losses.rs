use crate::prelude::*;

/// Raw output error `y_hat - y`.
///
/// No activation derivative is applied here; the error seeds backpropagation
/// as is.
pub fn output_error(y_hat: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
    if y_hat.len() != y.len() {
        return Err(NNError::DimensionMismatch {
            what: "expected output",
            expected: y_hat.len(),
            actual: y.len(),
        });
    }
    Ok(&y_hat - &y)
}

/// Sum of absolute components.
pub fn l1(error: ArrayView1<f64>) -> f64 {
    error.iter().map(|e| e.abs()).sum()
}

/// Mean of per-example L1 errors.
pub fn mean_abs_error(total: f64, examples: usize) -> Result<f64> {
    if examples == 0 {
        return Err(NNError::EmptyDataset);
    }
    Ok(total / examples as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_error_is_signed_difference() {
        let e = output_error(array![0.5, 1.0].view(), array![1.0, 0.0].view()).unwrap();
        assert_eq!(e, array![-0.5, 1.0]);
        assert_eq!(l1(e.view()), 1.5);
    }

    #[test]
    fn width_mismatch_is_reported() {
        let err = output_error(array![0.5].view(), array![1.0, 0.0].view());
        assert!(matches!(
            err,
            Err(NNError::DimensionMismatch { expected: 1, actual: 2, .. })
        ));
    }

    #[test]
    fn mean_needs_examples() {
        assert!(matches!(mean_abs_error(1.0, 0), Err(NNError::EmptyDataset)));
        assert_eq!(mean_abs_error(3.0, 2).unwrap(), 1.5);
    }
}
