//! Hysteretic energy-dissipation analysis for cyclic load-displacement
//! tests: cycle segmentation, per-cycle dissipated-energy integration, and
//! normalized error statistics between experiment and simulation, with
//! static comparison charts.

pub mod cli;
pub mod config;
pub mod core;
pub mod dataset;
pub mod plot;
