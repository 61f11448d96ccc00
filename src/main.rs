// Entry point: loads each configured dataset pair, runs the energy
// pipeline, prints the scalar diagnostics, and renders comparison charts.

use std::error::Error;
use std::fs::create_dir_all;
use std::path::Path;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cyclenergy::cli::Args;
use cyclenergy::config::{Config, DatasetConfig};
use cyclenergy::core::{
    AnalysisError, CycleEnergies, ErrorSummary, compute_cycle_energies, compute_error,
    interpolate_data,
};
use cyclenergy::dataset::{LoadedSeries, load_series};
use cyclenergy::plot::{
    EnergyPanel, HysteresisPanel, render_energy_comparison, render_hysteresis_overlay,
    write_cycle_table,
};

struct DatasetReport {
    name: String,
    exp_series: LoadedSeries,
    sim_series: LoadedSeries,
    exp_cycles: CycleEnergies,
    sim_cycles: CycleEnergies,
    cycle_error: ErrorSummary,
    cumulative_error: ErrorSummary,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();
    let mut cfg = Config::load_or_default(&args.config);
    if let Some(dir) = args.out_dir {
        cfg.output_dir = dir;
    }
    if let Some(step) = args.resample {
        cfg.resample_step = Some(step);
    }

    if cfg.datasets.is_empty() {
        warn!("no datasets configured in {}; nothing to do", args.config);
        return Ok(());
    }

    let out_dir = Path::new(&cfg.output_dir);
    create_dir_all(out_dir)?;

    // A failing dataset aborts only its own metrics and charts.
    let mut reports: Vec<DatasetReport> = Vec::new();
    for ds in &cfg.datasets {
        match analyze_dataset(ds, cfg.resample_step) {
            Ok(report) => {
                print_report(&report);
                reports.push(report);
            }
            Err(err) => {
                error!(dataset = %ds.name, "analysis failed: {err}");
            }
        }
    }

    if args.no_plots || reports.is_empty() {
        return Ok(());
    }

    let energy_panels: Vec<EnergyPanel<'_>> = reports
        .iter()
        .map(|r| EnergyPanel {
            name: &r.name,
            exp: &r.exp_cycles,
            sim: &r.sim_cycles,
            rmse: r.cumulative_error.rmse,
        })
        .collect();
    let energy_path = out_dir.join("energy_comparison.png");
    render_energy_comparison(&energy_path, &energy_panels, &cfg.plot)?;

    let hysteresis_panels: Vec<HysteresisPanel<'_>> = reports
        .iter()
        .map(|r| HysteresisPanel {
            name: &r.name,
            exp_disp: &r.exp_series.disp,
            exp_force: &r.exp_series.force,
            sim_disp: &r.sim_series.disp,
            sim_force: &r.sim_series.force,
        })
        .collect();
    let hysteresis_path = out_dir.join("hysteresis_comparison.png");
    render_hysteresis_overlay(&hysteresis_path, &hysteresis_panels, &cfg.plot)?;

    for report in &reports {
        let table_path = out_dir.join(format!("{}_cycle_energies.csv", report.name));
        write_cycle_table(
            &table_path,
            &report.exp_cycles,
            &report.sim_cycles,
            &report.cumulative_error,
        )?;
    }

    info!("saved charts and tables to {}", out_dir.display());
    Ok(())
}

fn analyze_dataset(
    ds: &DatasetConfig,
    resample_step: Option<f64>,
) -> Result<DatasetReport, AnalysisError> {
    let mut exp = load_series(Path::new(&ds.experiment))?;
    let mut sim = load_series(Path::new(&ds.simulated))?;
    exp.scale_displacement(ds.displacement_scale);
    sim.scale_displacement(ds.displacement_scale);

    if let Some(step) = resample_step {
        exp = resampled(&exp, step)?;
        sim = resampled(&sim, step)?;
    }

    info!(
        dataset = %ds.name,
        exp_samples = exp.len(),
        sim_samples = sim.len(),
        "segmenting cycles"
    );

    let exp_cycles = compute_cycle_energies(&exp.disp, &exp.force)?;
    let sim_cycles = compute_cycle_energies(&sim.disp, &sim.force)?;

    // Comparison is index-to-index with no realignment; differing cycle
    // counts between experiment and simulation fail this dataset.
    let cycle_error = compute_error(&exp_cycles.energies, &sim_cycles.energies)?;
    let cumulative_error = compute_error(&exp_cycles.cumulative, &sim_cycles.cumulative)?;

    Ok(DatasetReport {
        name: ds.name.clone(),
        exp_series: exp,
        sim_series: sim,
        exp_cycles,
        sim_cycles,
        cycle_error,
        cumulative_error,
    })
}

fn resampled(series: &LoadedSeries, step: f64) -> Result<LoadedSeries, AnalysisError> {
    let (disp, force) = interpolate_data(&series.disp, &series.force, step)?;
    Ok(LoadedSeries { disp, force })
}

fn print_report(report: &DatasetReport) {
    println!("== {} ==", report.name);
    println!("cycles: {}", report.exp_cycles.len());
    println!("cum energy (exp): {:?}", report.exp_cycles.cumulative);
    println!("cum energy (sim): {:?}", report.sim_cycles.cumulative);
    println!(
        "per-cycle   rmse {:.4}  mae {:.4}",
        report.cycle_error.rmse, report.cycle_error.mae
    );
    println!(
        "cumulative  rmse {:.4}  mae {:.4}",
        report.cumulative_error.rmse, report.cumulative_error.mae
    );
}
