#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the NYC neighborhood boundary datasets.
//!
//! Each subcommand maps onto one operation in [`nyc_boundaries::pipeline`].
//! Running without a subcommand opens an interactive menu instead.

mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nyc_boundaries::centroids::CentroidProperties;
use nyc_boundaries::paths::{DEFAULT_DATA_DIR, DatasetPaths};
use nyc_boundaries::pipeline::{self, GenerateOptions};
use nyc_boundaries::validate::{ValidationReport, ValidationRules};
use nyc_boundaries_models::OutputFormat;

/// Minimum feature count the curated boundary file is expected to hold.
const DEFAULT_MIN_FEATURES: usize = 250;

#[derive(Parser)]
#[command(
    name = "nyc_boundaries",
    about = "Maintain the NYC neighborhood boundary and centroid datasets"
)]
struct Cli {
    /// Directory holding both dataset files
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Boundary file (overrides `--data-dir`)
    #[arg(long, global = true)]
    boundaries: Option<PathBuf>,

    /// Centroid file (overrides `--data-dir`)
    #[arg(long, global = true)]
    centroids: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn dataset_paths(&self) -> DatasetPaths {
        let mut paths = DatasetPaths::in_dir(&self.data_dir);
        if let Some(boundaries) = &self.boundaries {
            paths.boundaries.clone_from(boundaries);
        }
        if let Some(centroids) = &self.centroids {
            paths.centroids.clone_from(centroids);
        }
        paths
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the centroid file from the boundary file
    GenerateCentroids {
        /// Output layout
        #[arg(long, default_value_t = OutputFormat::CompactLines)]
        format: OutputFormat,

        /// Copy only `slug`, `name`, and `color` onto each centroid
        #[arg(long)]
        curated: bool,

        /// Merge boundary properties into the centroids before writing
        #[arg(long)]
        apply_properties: bool,
    },
    /// Copy `name` and `color` from boundaries onto centroids by slug
    ApplyProperties {
        /// Output layout
        #[arg(long, default_value_t = OutputFormat::CompactLines)]
        format: OutputFormat,
    },
    /// Rewrite both dataset files in canonical order and layout
    FormatGeojson {
        /// Output layout
        #[arg(long, default_value_t = OutputFormat::CompactLines)]
        format: OutputFormat,
    },
    /// Check the boundary file against the dataset rules
    Validate {
        /// Minimum number of features required
        #[arg(long, default_value_t = DEFAULT_MIN_FEATURES)]
        min_features: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let cli = Cli::parse();

    run(&cli).inspect_err(|e| log::error!("{e}"))
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let paths = cli.dataset_paths();

    let Some(command) = &cli.command else {
        return interactive::run(&paths);
    };

    match *command {
        Commands::GenerateCentroids {
            format,
            curated,
            apply_properties,
        } => {
            let options = GenerateOptions {
                properties: if curated {
                    CentroidProperties::Curated
                } else {
                    CentroidProperties::All
                },
                apply_properties,
                format,
            };
            pipeline::generate_centroids_file(&paths, &options)?;
        }
        Commands::ApplyProperties { format } => {
            pipeline::apply_properties_file(&paths, format)?;
        }
        Commands::FormatGeojson { format } => {
            pipeline::format_files(&paths, format)?;
        }
        Commands::Validate { min_features } => {
            let report =
                pipeline::validate_file(&paths.boundaries, &ValidationRules { min_features })?;
            report_violations(&report)?;
        }
    }

    Ok(())
}

/// Logs every violation and fails if there were any.
fn report_violations(report: &ValidationReport) -> Result<(), Box<dyn std::error::Error>> {
    for violation in &report.violations {
        log::error!("{violation}");
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(format!("Validation failed with {} violation(s)", report.violations.len()).into())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flagless_generate_uses_defaults() {
        let cli = Cli::try_parse_from(["nyc_boundaries", "generate-centroids"]).unwrap();

        assert_eq!(cli.dataset_paths(), DatasetPaths::default());
        assert!(matches!(
            cli.command,
            Some(Commands::GenerateCentroids {
                format: OutputFormat::CompactLines,
                curated: false,
                apply_properties: false,
            })
        ));
    }

    #[test]
    fn path_flags_override_data_dir() {
        let cli = Cli::try_parse_from([
            "nyc_boundaries",
            "format-geojson",
            "--data-dir",
            "/srv/nyc",
            "--centroids",
            "/tmp/points.geojson",
            "--format",
            "pretty",
        ])
        .unwrap();

        let paths = cli.dataset_paths();
        assert_eq!(
            paths.boundaries,
            Path::new("/srv/nyc/nyc-neighborhood-boundaries.geojson")
        );
        assert_eq!(paths.centroids, Path::new("/tmp/points.geojson"));
        assert!(matches!(
            cli.command,
            Some(Commands::FormatGeojson {
                format: OutputFormat::Pretty
            })
        ));
    }

    #[test]
    fn validate_defaults_to_curated_minimum() {
        let cli = Cli::try_parse_from(["nyc_boundaries", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Validate { min_features: 250 })
        ));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(
            Cli::try_parse_from(["nyc_boundaries", "apply-properties", "--format", "yaml"])
                .is_err()
        );
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["nyc_boundaries"]).unwrap();
        assert!(cli.command.is_none());
    }
}
