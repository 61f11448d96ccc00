//! Loader for two-column delimited load-displacement histories.
//!
//! Expected layout: a header row, then one record per sample with the
//! displacement in the first column and the force in the second. Extra
//! columns are ignored.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::core::AnalysisError;

/// One measured or simulated loading history.
#[derive(Clone, Debug, Default)]
pub struct LoadedSeries {
    pub disp: Vec<f64>,
    pub force: Vec<f64>,
}

impl LoadedSeries {
    pub fn len(&self) -> usize {
        self.disp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disp.is_empty()
    }

    /// Multiply the displacement channel in place (unit conversion, e.g.
    /// 0.001 for mm to m).
    pub fn scale_displacement(&mut self, scale: f64) {
        if scale != 1.0 {
            for d in &mut self.disp {
                *d *= scale;
            }
        }
    }
}

/// Read a history from a comma-delimited file with one header row.
pub fn load_series(path: &Path) -> Result<LoadedSeries, AnalysisError> {
    let file = File::open(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut out = LoadedSeries::default();
    for result in reader.records() {
        let record = result.map_err(|err| AnalysisError::Malformed {
            path: path.to_path_buf(),
            line: err.position().map(|p| p.line()).unwrap_or(0),
            reason: err.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() < 2 {
            return Err(AnalysisError::Malformed {
                path: path.to_path_buf(),
                line,
                reason: format!("expected 2 columns, got {}", record.len()),
            });
        }
        let parse = |field: &str, name: &str| {
            field.parse::<f64>().map_err(|_| AnalysisError::Malformed {
                path: path.to_path_buf(),
                line,
                reason: format!("{name} value {field:?} is not a number"),
            })
        };
        out.disp.push(parse(&record[0], "displacement")?);
        out.force.push(parse(&record[1], "force")?);
    }

    if out.is_empty() {
        return Err(AnalysisError::Malformed {
            path: path.to_path_buf(),
            line: 1,
            reason: "no data records after header".into(),
        });
    }

    debug!(path = %path.display(), samples = out.len(), "loaded series");
    Ok(out)
}
