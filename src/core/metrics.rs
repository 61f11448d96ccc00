//! Error statistics between a reference ("experiment") series and a
//! comparison ("simulation") series.

use crate::core::error::AnalysisError;

/// Per-element and aggregate discrepancy between two equal-length series.
///
/// `rmse` and `mae` are normalized by the mean absolute reference value and
/// are dimensionless fractions; `rel_err` is a per-element percentage.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorSummary {
    pub rel_err: Vec<f64>,
    pub rmse: f64,
    pub mae: f64,
}

/// Compare `sim` against the reference `exp`, index to index.
///
/// Per-element relative error follows IEEE semantics where the reference is
/// zero: infinite for a nonzero difference, NaN for zero over zero. A
/// reference with zero mean absolute value leaves both aggregates undefined
/// and is rejected as `ZeroReference`.
pub fn compute_error(exp: &[f64], sim: &[f64]) -> Result<ErrorSummary, AnalysisError> {
    if exp.len() != sim.len() {
        return Err(AnalysisError::invalid(format!(
            "reference has {} samples, comparison has {}",
            exp.len(),
            sim.len()
        )));
    }
    if exp.is_empty() {
        return Err(AnalysisError::invalid("cannot compare empty series"));
    }

    let n = exp.len() as f64;
    let mean_abs_ref = exp.iter().map(|v| v.abs()).sum::<f64>() / n;
    if mean_abs_ref == 0.0 {
        return Err(AnalysisError::ZeroReference);
    }

    let rel_err: Vec<f64> = exp
        .iter()
        .zip(sim)
        .map(|(e, s)| 100.0 * (e - s).abs() / e)
        .collect();

    let mse = exp
        .iter()
        .zip(sim)
        .map(|(e, s)| (e - s) * (e - s))
        .sum::<f64>()
        / n;
    let rmse = mse.sqrt() / mean_abs_ref;

    let mae = exp
        .iter()
        .zip(sim)
        .map(|(e, s)| (e - s).abs())
        .sum::<f64>()
        / n
        / mean_abs_ref;

    Ok(ErrorSummary { rel_err, rmse, mae })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_series_have_zero_error() {
        let x = vec![1.0, -2.5, 3.75, 100.0];
        let out = compute_error(&x, &x).unwrap();
        assert!(out.rel_err.iter().all(|&e| e == 0.0));
        assert_eq!(out.rmse, 0.0);
        assert_eq!(out.mae, 0.0);
    }

    #[test]
    fn reference_values_match_hand_computation() {
        let exp = vec![1.0, 2.0, 3.0, 4.0];
        let sim = vec![1.0, 2.0, 3.0, 5.0];
        let out = compute_error(&exp, &sim).unwrap();
        assert_eq!(out.rel_err, vec![0.0, 0.0, 0.0, 25.0]);
        // sqrt(0.25) / 2.5 and 0.25 / 2.5
        assert!((out.rmse - 0.2).abs() < 1e-12);
        assert!((out.mae - 0.1).abs() < 1e-12);
    }

    #[test]
    fn zero_reference_element_propagates_ieee_values() {
        let exp = vec![0.0, 2.0];
        let sim = vec![1.0, 2.0];
        let out = compute_error(&exp, &sim).unwrap();
        assert!(out.rel_err[0].is_infinite());
        assert_eq!(out.rel_err[1], 0.0);
        assert!(out.rmse.is_finite());
    }

    #[test]
    fn all_zero_reference_is_rejected() {
        let err = compute_error(&[0.0, 0.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::ZeroReference));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        assert!(compute_error(&[1.0], &[1.0, 2.0]).is_err());
        assert!(compute_error(&[], &[]).is_err());
    }
}
