//! Chart rendering and table export for the energy comparison.
//!
//! One figure per comparison kind, one panel per dataset. Charts go through
//! plotters' bitmap backend; the per-cycle tables are written as plain CSV
//! next to the charts.

use std::error::Error;
use std::fs::write;
use std::path::Path;

use plotters::prelude::*;

use crate::config::PlotConfig;
use crate::core::{CycleEnergies, ErrorSummary};

/// One dataset's slot in the cumulative-energy figure.
pub struct EnergyPanel<'a> {
    pub name: &'a str,
    pub exp: &'a CycleEnergies,
    pub sim: &'a CycleEnergies,
    /// Normalized RMSE between the cumulative sequences, annotated in-panel.
    pub rmse: f64,
}

/// One dataset's slot in the hysteresis-overlay figure.
pub struct HysteresisPanel<'a> {
    pub name: &'a str,
    pub exp_disp: &'a [f64],
    pub exp_force: &'a [f64],
    pub sim_disp: &'a [f64],
    pub sim_force: &'a [f64],
}

/// Cycle number vs. cumulative dissipated energy, experiment against
/// simulation, one panel per dataset.
pub fn render_energy_comparison(
    out_path: &Path,
    panels: &[EnergyPanel<'_>],
    cfg: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    if panels.is_empty() {
        return Ok(());
    }

    let width = cfg.panel_width * panels.len() as u32;
    let root = BitMapBackend::new(out_path, (width, cfg.panel_height)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, panels.len()));

    for (panel, area) in panels.iter().zip(areas.iter()) {
        let x_max = panel
            .exp
            .numbers
            .iter()
            .chain(panel.sim.numbers.iter())
            .copied()
            .max()
            .unwrap_or(1) as f64;
        let y_max = panel
            .exp
            .cumulative
            .iter()
            .chain(panel.sim.cumulative.iter())
            .copied()
            .fold(0.0f64, f64::max)
            .max(1e-12)
            * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Dissipated Energy ({})", panel.name),
                ("sans-serif", cfg.caption_size as i32),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0f64..x_max.max(1.0), 0.0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Cycle Number")
            .y_desc("Dissipated Energy (kN-m)")
            .x_labels((x_max as usize + 1).min(20))
            .draw()?;

        let exp_points: Vec<(f64, f64)> = panel
            .exp
            .numbers
            .iter()
            .zip(&panel.exp.cumulative)
            .map(|(&n, &e)| (n as f64, e))
            .collect();
        let sim_points: Vec<(f64, f64)> = panel
            .sim
            .numbers
            .iter()
            .zip(&panel.sim.cumulative)
            .map(|(&n, &e)| (n as f64, e))
            .collect();

        chart
            .draw_series(LineSeries::new(exp_points.iter().copied(), &BLACK))?
            .label("Experiment")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));
        chart.draw_series(
            exp_points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLACK.filled())),
        )?;

        chart
            .draw_series(LineSeries::new(sim_points.iter().copied(), &RED))?
            .label("Simulation")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
        chart.draw_series(
            sim_points
                .iter()
                .map(|&(x, y)| Cross::new((x, y), 4, RED.filled())),
        )?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperMiddle)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        chart.plotting_area().draw(&Text::new(
            format!("RMSE: {:.1}%", panel.rmse * 100.0),
            (0.3 * x_max, 0.5 * y_max),
            ("sans-serif", 16),
        ))?;
    }

    root.present()?;
    Ok(())
}

/// Force vs. displacement loops, experiment against simulation, one panel
/// per dataset.
pub fn render_hysteresis_overlay(
    out_path: &Path,
    panels: &[HysteresisPanel<'_>],
    cfg: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    if panels.is_empty() {
        return Ok(());
    }

    let width = cfg.panel_width * panels.len() as u32;
    let root = BitMapBackend::new(out_path, (width, cfg.panel_height)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, panels.len()));

    for (panel, area) in panels.iter().zip(areas.iter()) {
        let (x_min, x_max) = padded_range(panel.exp_disp.iter().chain(panel.sim_disp.iter()));
        let (y_min, y_max) = padded_range(panel.exp_force.iter().chain(panel.sim_force.iter()));

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Hysteresis ({})", panel.name),
                ("sans-serif", cfg.caption_size as i32),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Displacement")
            .y_desc("Force (kN)")
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                panel
                    .exp_disp
                    .iter()
                    .zip(panel.exp_force)
                    .map(|(&d, &f)| (d, f)),
                &BLACK,
            ))?
            .label("Experiment")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

        chart
            .draw_series(LineSeries::new(
                panel
                    .sim_disp
                    .iter()
                    .zip(panel.sim_force)
                    .map(|(&d, &f)| (d, f)),
                &BLUE,
            ))?
            .label("Simulation")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Per-cycle table for one dataset: energies, cumulative sums, and the
/// relative error between the cumulative sequences.
pub fn write_cycle_table(
    out_path: &Path,
    exp: &CycleEnergies,
    sim: &CycleEnergies,
    cumulative_error: &ErrorSummary,
) -> Result<(), Box<dyn Error>> {
    let n = exp.len().min(sim.len());
    let mut csv = String::from("cycle,energy_exp,cum_exp,energy_sim,cum_sim,rel_err_cum\n");
    for i in 0..n {
        csv.push_str(&format!(
            "{},{:.6},{:.6},{:.6},{:.6},{:.3}\n",
            exp.numbers[i],
            exp.energies[i],
            exp.cumulative[i],
            sim.energies[i],
            sim.cumulative[i],
            cumulative_error.rel_err.get(i).copied().unwrap_or(f64::NAN),
        ));
    }
    write(out_path, csv)?;
    Ok(())
}

fn padded_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() || (hi - lo).abs() < 1e-12 {
        return (-1.0, 1.0);
    }
    let pad = 0.05 * (hi - lo);
    (lo - pad, hi + pad)
}
