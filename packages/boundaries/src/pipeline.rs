//! File-level operations behind each CLI subcommand.
//!
//! Each function reads its inputs whole, transforms in memory, and writes
//! its output atomically. Nothing is written when any step fails.

use std::path::Path;

use nyc_boundaries_models::OutputFormat;

use crate::BoundaryError;
use crate::centroids::{CentroidProperties, generate_centroids};
use crate::collection::FeatureCollection;
use crate::files::{parse_collection, read_collection, read_text, write_atomic};
use crate::format::render;
use crate::merge::{MergeStats, apply_properties};
use crate::paths::DatasetPaths;
use crate::validate::{ValidationReport, ValidationRules, validate_boundaries};

/// Options for [`generate_centroids_file`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Which boundary properties each centroid starts with.
    pub properties: CentroidProperties,
    /// Run the property merge before writing.
    pub apply_properties: bool,
    /// Layout of the written file.
    pub format: OutputFormat,
}

/// Result of [`format_files`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSummary {
    /// Files rewritten.
    pub formatted: usize,
    /// Files skipped because they do not exist.
    pub skipped: usize,
}

/// Canonicalizes, renders, and atomically writes a collection.
///
/// # Errors
///
/// Returns [`BoundaryError`] if serialization or the write fails.
pub fn write_collection(
    path: &Path,
    collection: &FeatureCollection,
    format: OutputFormat,
) -> Result<(), BoundaryError> {
    let output = render(collection, format)?;
    write_atomic(path, &output)?;
    log::info!(
        "Wrote {} features to {}",
        collection.len(),
        path.display()
    );
    Ok(())
}

/// Regenerates the centroid file from the boundary file.
///
/// Returns the number of centroids written.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the boundary file cannot be read, any
/// feature has no computable centroid, or the write fails.
pub fn generate_centroids_file(
    paths: &DatasetPaths,
    options: &GenerateOptions,
) -> Result<usize, BoundaryError> {
    let boundaries = read_collection(&paths.boundaries)?;
    let mut centroids = generate_centroids(&boundaries, options.properties)?;

    if options.apply_properties {
        let stats = apply_properties(&boundaries, &mut centroids);
        if stats.unmatched > 0 {
            log::warn!("{} centroids have no matching boundary", stats.unmatched);
        }
    }

    write_collection(&paths.centroids, &centroids, options.format)?;
    Ok(centroids.len())
}

/// Rewrites centroid properties from the boundary file, joined on `slug`.
///
/// # Errors
///
/// Returns [`BoundaryError`] if either file cannot be read or the write
/// fails.
pub fn apply_properties_file(
    paths: &DatasetPaths,
    format: OutputFormat,
) -> Result<MergeStats, BoundaryError> {
    let boundaries = read_collection(&paths.boundaries)?;
    let mut centroids = read_collection(&paths.centroids)?;

    let stats = apply_properties(&boundaries, &mut centroids);

    write_collection(&paths.centroids, &centroids, format)?;
    Ok(stats)
}

/// Rewrites one file in canonical form.
///
/// Returns the number of features in the file.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the file is missing, not a feature
/// collection, or cannot be written.
pub fn format_file(path: &Path, format: OutputFormat) -> Result<usize, BoundaryError> {
    let text = read_text(path)?;
    let collection = parse_collection(&text, path)?;
    let output = render(&collection, format)?;

    if output == text {
        log::info!("{} is already formatted", path.display());
    } else {
        write_atomic(path, &output)?;
        log::info!(
            "Formatted {} ({} features)",
            path.display(),
            collection.len()
        );
    }

    Ok(collection.len())
}

/// Formats both dataset files, skipping any that do not exist.
///
/// # Errors
///
/// Returns [`BoundaryError`] for the first file that exists but cannot be
/// formatted.
pub fn format_files(
    paths: &DatasetPaths,
    format: OutputFormat,
) -> Result<FormatSummary, BoundaryError> {
    let mut summary = FormatSummary::default();

    for path in paths.all() {
        match format_file(path, format) {
            Ok(_) => summary.formatted += 1,
            Err(BoundaryError::FileNotFound { path }) => {
                log::warn!("Skipping {}: file not found", path.display());
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

/// Validates a boundary file, including its line layout.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the file is missing or not a feature
/// collection. Rule violations are reported in the returned
/// [`ValidationReport`], not as errors.
pub fn validate_file(
    path: &Path,
    rules: &ValidationRules,
) -> Result<ValidationReport, BoundaryError> {
    let text = read_text(path)?;
    let collection = parse_collection(&text, path)?;
    Ok(validate_boundaries(&collection, Some(&text), rules))
}
