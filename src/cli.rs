use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Output directory for charts and tables (overrides config)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Resample step on the index grid before segmentation (overrides config)
    #[arg(long)]
    pub resample: Option<f64>,

    /// Compute and print metrics only, skip chart rendering
    #[arg(long, default_value_t = false)]
    pub no_plots: bool,
}
