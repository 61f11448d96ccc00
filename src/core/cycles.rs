//! Cycle segmentation and dissipated-energy integration.
//!
//! A loading cycle is the span between two consecutive sign changes of the
//! displacement channel. The energy dissipated over a cycle is the absolute
//! trapezoidal integral of force with respect to displacement across that
//! span. Note that this is a net signed area taken absolutely, not a true
//! enclosed-loop area: a path that retraces itself integrates to zero, and
//! a near-linear loading path integrates to near zero.

use crate::core::error::AnalysisError;

/// Per-cycle energy table: 1-based cycle numbers, dissipated energy per
/// cycle, and the running cumulative sum.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CycleEnergies {
    pub numbers: Vec<usize>,
    pub energies: Vec<f64>,
    pub cumulative: Vec<f64>,
}

impl CycleEnergies {
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

#[inline]
fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Indices `i` where `sign(disp[i]) != sign(disp[i+1])`.
pub fn zero_crossings(disp: &[f64]) -> Vec<usize> {
    disp.windows(2)
        .enumerate()
        .filter(|(_, w)| sign(w[0]) != sign(w[1]))
        .map(|(i, _)| i)
        .collect()
}

/// Composite trapezoidal rule: integral of `y` with respect to `x`.
pub fn trapz(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xw, yw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum()
}

/// Segment a force-displacement history into cycles and integrate the
/// dissipated energy of each.
///
/// Fewer than two zero crossings is a degenerate input and yields an empty
/// table; mismatched channel lengths are a caller contract violation.
pub fn compute_cycle_energies(
    disp: &[f64],
    force: &[f64],
) -> Result<CycleEnergies, AnalysisError> {
    if disp.len() != force.len() {
        return Err(AnalysisError::invalid(format!(
            "displacement has {} samples, force has {}",
            disp.len(),
            force.len()
        )));
    }

    let crossings = zero_crossings(disp);
    let mut out = CycleEnergies::default();
    if crossings.len() < 2 {
        return Ok(out);
    }

    let mut running = 0.0;
    for (k, pair) in crossings.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        let energy = trapz(&force[start..=end], &disp[start..=end]).abs();
        running += energy;
        out.numbers.push(k + 1);
        out.energies.push(energy);
        out.cumulative.push(running);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_history(cycles: usize, samples_per_cycle: usize) -> (Vec<f64>, Vec<f64>) {
        let n = cycles * samples_per_cycle;
        let mut disp = Vec::with_capacity(n);
        let mut force = Vec::with_capacity(n);
        for i in 0..n {
            let t = i as f64 / samples_per_cycle as f64 * std::f64::consts::TAU;
            // Phase-shifted response traces a genuine loop per cycle.
            disp.push(t.sin());
            force.push(10.0 * (t - 0.6).sin());
        }
        (disp, force)
    }

    #[test]
    fn no_crossings_gives_empty_table() {
        let disp = vec![1.0, 2.0, 3.0, 2.0, 1.5];
        let force = vec![0.0, 5.0, 8.0, 5.0, 2.0];
        let out = compute_cycle_energies(&disp, &force).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn single_crossing_gives_empty_table() {
        let out = compute_cycle_energies(&[-1.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn crossing_indices_match_sign_changes() {
        let disp = vec![-1.0, -0.5, 0.5, 1.0, -1.0];
        assert_eq!(zero_crossings(&disp), vec![1, 3]);
    }

    #[test]
    fn exact_zero_sample_counts_as_crossing() {
        // numpy sign convention: 0 is its own sign, so touching zero
        // produces a crossing on both sides.
        let disp = vec![-1.0, 0.0, 1.0];
        assert_eq!(zero_crossings(&disp), vec![0, 1]);
    }

    #[test]
    fn cumulative_is_non_decreasing() {
        let (disp, force) = sine_history(4, 64);
        let out = compute_cycle_energies(&disp, &force).unwrap();
        assert!(!out.is_empty());
        assert!(out.cumulative.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn cycle_numbers_are_sequential_from_one() {
        let (disp, force) = sine_history(3, 48);
        let out = compute_cycle_energies(&disp, &force).unwrap();
        let expect: Vec<usize> = (1..=out.len()).collect();
        assert_eq!(out.numbers, expect);
    }

    #[test]
    fn reversing_a_cycle_span_preserves_energy_magnitude() {
        let (disp, force) = sine_history(2, 64);
        let out = compute_cycle_energies(&disp, &force).unwrap();
        let crossings = zero_crossings(&disp);
        assert!(crossings.len() >= 2);

        for (k, pair) in crossings.windows(2).enumerate() {
            let (s, e) = (pair[0], pair[1]);
            let rd: Vec<f64> = disp[s..=e].iter().rev().copied().collect();
            let rf: Vec<f64> = force[s..=e].iter().rev().copied().collect();
            let reversed = trapz(&rf, &rd).abs();
            assert!(
                (reversed - out.energies[k]).abs() < 1e-12,
                "cycle {k}: {reversed} vs {}",
                out.energies[k]
            );
        }
    }

    #[test]
    fn triangular_retrace_integrates_to_zero() {
        // A path that retraces itself has zero net signed area under the
        // trapezoidal rule, and therefore zero "dissipated" energy.
        let disp = vec![0.0, 1.0, 0.0];
        let force = vec![0.0, 10.0, 0.0];
        assert_eq!(trapz(&force, &disp), 0.0);
    }

    #[test]
    fn trapz_matches_closed_form() {
        // f(x) = 2x over [0, 2] integrates to 4 exactly (piecewise linear).
        let x = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        assert!((trapz(&y, &x) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn trapz_is_order_sensitive() {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 4.0];
        let xr: Vec<f64> = x.iter().rev().copied().collect();
        let yr: Vec<f64> = y.iter().rev().copied().collect();
        assert_eq!(trapz(&y, &x), -trapz(&yr, &xr));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = compute_cycle_energies(&[0.0, 1.0], &[0.0]).unwrap_err();
        assert!(matches!(
            err,
            crate::core::error::AnalysisError::InvalidArgument(_)
        ));
    }
}
