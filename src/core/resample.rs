//! Linear resampling of a displacement/force history on its index grid.
//!
//! Samples are implicitly indexed 1..=N; resampling evaluates both channels
//! at positions 1, 1+step, 1+2*step, ... up to N by linear interpolation
//! between neighbouring integer-indexed samples. A step below 1 upsamples.

use crate::core::error::AnalysisError;

/// Resample `disp` and `force` at a fixed index stride.
///
/// Returns two new equal-length vectors. `step >= N` degenerates to a single
/// point (the first sample); a non-positive or non-finite step is rejected.
pub fn interpolate_data(
    disp: &[f64],
    force: &[f64],
    step: f64,
) -> Result<(Vec<f64>, Vec<f64>), AnalysisError> {
    if disp.len() != force.len() {
        return Err(AnalysisError::invalid(format!(
            "displacement has {} samples, force has {}",
            disp.len(),
            force.len()
        )));
    }
    if disp.len() < 2 {
        return Err(AnalysisError::invalid(format!(
            "need at least 2 samples, got {}",
            disp.len()
        )));
    }
    if !(step.is_finite() && step > 0.0) {
        return Err(AnalysisError::invalid(format!(
            "resample step must be positive and finite, got {step}"
        )));
    }

    let positions = index_positions(disp.len(), step);
    let new_disp = sample_at(disp, &positions);
    let new_force = sample_at(force, &positions);
    Ok((new_disp, new_force))
}

/// Positions 1, 1+step, ... <= n on the 1-based index axis.
fn index_positions(n: usize, step: f64) -> Vec<f64> {
    let last = n as f64;
    let count = ((last - 1.0) / step).floor() as usize + 1;
    (0..count).map(|i| 1.0 + i as f64 * step).collect()
}

fn sample_at(values: &[f64], positions: &[f64]) -> Vec<f64> {
    let n = values.len();
    positions
        .iter()
        .map(|&p| {
            // p lies in [1, n]; clamp guards the exact right endpoint.
            let base = (p - 1.0).floor() as usize;
            let base = base.min(n - 1);
            let frac = (p - 1.0) - base as f64;
            if base + 1 < n && frac > 0.0 {
                values[base] * (1.0 - frac) + values[base + 1] * frac
            } else {
                values[base]
            }
        })
        .collect()
}
