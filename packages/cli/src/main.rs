#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather vigilance map generator.
//!
//! ```text
//! vigilance_map [--config vigilance.toml] [--seed 42] [--points 1000]
//!               [--regions <url|path>] [--forecast <url|path>]
//!               [--output-dir maps] [--no-render]
//! vigilance_map --print-config > vigilance.toml
//! ```
//!
//! Samples points over mainland France, resolves each to its administrative
//! region, joins them against the day-by-day vigilance forecast and writes
//! one map per forecast day.
//!
//! Uses `indicatif-log-bridge` (via [`vigilance_map_cli_utils::init_logger`])
//! so that log lines and the region-resolution progress bar share the
//! terminal cleanly.

mod config;
mod pipeline;

use std::path::PathBuf;

use clap::Parser;

use crate::config::PipelineConfig;

#[derive(Parser)]
#[command(
    name = "vigilance_map",
    about = "Map weather vigilance levels onto sampled points"
)]
struct Cli {
    /// TOML configuration file (defaults are built in)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for point sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Number of points to sample
    #[arg(long)]
    points: Option<usize>,

    /// Region boundaries: URL or local `GeoJSON` file
    #[arg(long)]
    regions: Option<String>,

    /// Vigilance forecast: URL or local JSON file
    #[arg(long)]
    forecast: Option<String>,

    /// Directory for the generated maps
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the day summaries without writing any files
    #[arg(long)]
    no_render: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn apply(self, config: &mut PipelineConfig) {
        if let Some(seed) = self.seed {
            config.sampling.seed = seed;
        }
        if let Some(points) = self.points {
            config.sampling.count = points;
        }
        if let Some(regions) = self.regions {
            config.sources.regions = regions;
        }
        if let Some(forecast) = self.forecast {
            config.sources.forecast = forecast;
        }
        if let Some(dir) = self.output_dir {
            config.output.directory = dir;
        }
        if self.no_render {
            config.output.render = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = vigilance_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let print_config = cli.print_config;
    cli.apply(&mut config);

    if print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let output = pipeline::run(&config, &multi).await?;

    println!(
        "{} points matched a region, {} fell outside every region",
        output.assignment.matched(),
        output.assignment.unmatched
    );

    if output.days.is_empty() {
        println!("Forecast contains no periods.");
        return Ok(());
    }

    for table in &output.days {
        println!(
            "  {:<4} {:>6} rows  {:>6} points",
            table.label(),
            table.rows.len(),
            table.point_count()
        );
    }

    if !config.output.render {
        return Ok(());
    }

    let rendered = vigilance_map_render::render_all(&output.days, &config.output.directory)?;
    for day in &rendered {
        println!("{}", day.html_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "vigilance_map",
            "--seed",
            "7",
            "--points",
            "25",
            "--forecast",
            "fixtures/vigilance.json",
            "--no-render",
        ]);
        let mut config = PipelineConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.sampling.seed, 7);
        assert_eq!(config.sampling.count, 25);
        assert_eq!(config.sources.forecast, "fixtures/vigilance.json");
        assert_eq!(config.sources.regions, config::SourcesConfig::default().regions);
        assert!(!config.output.render);
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let cli = Cli::parse_from(["vigilance_map"]);
        let mut config = PipelineConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, PipelineConfig::default());
    }
}
