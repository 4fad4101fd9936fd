//! Interactive menu shown when no subcommand is given.
//!
//! Walks through the same options the subcommands expose as flags.

use dialoguer::{Confirm, Input, Select};
use nyc_boundaries::centroids::CentroidProperties;
use nyc_boundaries::paths::DatasetPaths;
use nyc_boundaries::pipeline::{self, GenerateOptions};
use nyc_boundaries::validate::ValidationRules;
use nyc_boundaries_models::OutputFormat;

use crate::{DEFAULT_MIN_FEATURES, report_violations};

/// Top-level actions offered by the menu.
enum Action {
    GenerateCentroids,
    ApplyProperties,
    FormatGeojson,
    Validate,
}

impl Action {
    const ALL: &[Self] = &[
        Self::GenerateCentroids,
        Self::ApplyProperties,
        Self::FormatGeojson,
        Self::Validate,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::GenerateCentroids => "Generate centroids",
            Self::ApplyProperties => "Apply boundary properties to centroids",
            Self::FormatGeojson => "Format GeoJSON files",
            Self::Validate => "Validate boundaries",
        }
    }
}

/// Runs the interactive menu against `paths`.
///
/// # Errors
///
/// Returns an error if user input fails or the chosen operation fails.
pub fn run(paths: &DatasetPaths) -> Result<(), Box<dyn std::error::Error>> {
    println!("NYC Neighborhood Boundaries");
    println!("  boundaries: {}", paths.boundaries.display());
    println!("  centroids:  {}", paths.centroids.display());
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::GenerateCentroids => {
            let curated = Confirm::new()
                .with_prompt("Copy only slug, name, and color onto centroids?")
                .default(false)
                .interact()?;

            let apply_properties = Confirm::new()
                .with_prompt("Apply boundary properties before writing?")
                .default(false)
                .interact()?;

            let options = GenerateOptions {
                properties: if curated {
                    CentroidProperties::Curated
                } else {
                    CentroidProperties::All
                },
                apply_properties,
                format: select_format()?,
            };
            pipeline::generate_centroids_file(paths, &options)?;
        }
        Action::ApplyProperties => {
            pipeline::apply_properties_file(paths, select_format()?)?;
        }
        Action::FormatGeojson => {
            pipeline::format_files(paths, select_format()?)?;
        }
        Action::Validate => {
            let min_str: String = Input::new()
                .with_prompt("Minimum feature count")
                .default(DEFAULT_MIN_FEATURES.to_string())
                .interact_text()?;

            let min_features: usize = min_str
                .trim()
                .parse()
                .map_err(|e| format!("Invalid count '{min_str}': {e}"))?;

            let report =
                pipeline::validate_file(&paths.boundaries, &ValidationRules { min_features })?;
            report_violations(&report)?;
        }
    }

    Ok(())
}

fn select_format() -> Result<OutputFormat, Box<dyn std::error::Error>> {
    const FORMATS: &[OutputFormat] = &[OutputFormat::CompactLines, OutputFormat::Pretty];

    let labels: Vec<&str> = FORMATS.iter().map(AsRef::<str>::as_ref).collect();

    let idx = Select::new()
        .with_prompt("Output format")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(FORMATS[idx])
}
