//! Numeric core: resampling, cycle segmentation, energy integration, and
//! error statistics. Pure functions over in-memory series; everything else
//! in the crate is glue around these.

pub mod cycles;
pub mod error;
pub mod metrics;
pub mod resample;

pub use cycles::{CycleEnergies, compute_cycle_energies, trapz, zero_crossings};
pub use error::AnalysisError;
pub use metrics::{ErrorSummary, compute_error};
pub use resample::interpolate_data;
