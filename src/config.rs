use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "PlotConfig::default_panel_width")]
    pub panel_width: u32,
    #[serde(default = "PlotConfig::default_panel_height")]
    pub panel_height: u32,
    #[serde(default = "PlotConfig::default_caption_size")]
    pub caption_size: u32,
}

impl PlotConfig {
    fn default_panel_width() -> u32 {
        700
    }
    fn default_panel_height() -> u32 {
        600
    }
    fn default_caption_size() -> u32 {
        20
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            panel_width: Self::default_panel_width(),
            panel_height: Self::default_panel_height(),
            caption_size: Self::default_caption_size(),
        }
    }
}

/// One experiment/simulation pair to analyze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    pub experiment: String,
    pub simulated: String,
    /// Multiplier applied to the displacement column after load
    /// (e.g. 0.001 for mm input and energies in kN-m).
    #[serde(default = "DatasetConfig::default_displacement_scale")]
    pub displacement_scale: f64,
}

impl DatasetConfig {
    fn default_displacement_scale() -> f64 {
        1.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_output_dir")]
    pub output_dir: String,
    /// Optional index-grid resampling step applied to every series before
    /// cycle segmentation. Unset means no resampling.
    #[serde(default)]
    pub resample_step: Option<f64>,
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default, rename = "dataset")]
    pub datasets: Vec<DatasetConfig>,
}

impl Config {
    fn default_output_dir() -> String {
        "target/plots".to_string()
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        if let Ok(text) = toml::to_string_pretty(&default_cfg) {
            let _ = fs::write(path_obj, text);
        }
        default_cfg
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
            resample_step: None,
            plot: PlotConfig::default(),
            datasets: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.output_dir, cfg.output_dir);
        assert_eq!(back.resample_step, None);
        assert!(back.datasets.is_empty());
    }

    #[test]
    fn parses_dataset_entries_with_partial_fields() {
        let text = r#"
            output_dir = "out"
            resample_step = 0.5

            [[dataset]]
            name = "c0"
            experiment = "c0/experiment.csv"
            simulated = "c0/simulated.csv"
            displacement_scale = 0.001

            [[dataset]]
            name = "c5"
            experiment = "c5/experiment.csv"
            simulated = "c5/simulated.csv"
        "#;
        let cfg: Config = toml::from_str(text).unwrap();
        assert_eq!(cfg.output_dir, "out");
        assert_eq!(cfg.resample_step, Some(0.5));
        assert_eq!(cfg.datasets.len(), 2);
        assert_eq!(cfg.datasets[0].displacement_scale, 0.001);
        assert_eq!(cfg.datasets[1].displacement_scale, 1.0);
        assert_eq!(cfg.plot.panel_width, 700);
    }

    #[test]
    fn load_or_default_reads_existing() {
        let path = std::env::temp_dir().join("cyclenergy_config_read.toml");
        fs::write(&path, "output_dir = \"elsewhere\"\n").unwrap();
        let cfg = Config::load_or_default(path.to_str().unwrap());
        assert_eq!(cfg.output_dir, "elsewhere");
    }
}
