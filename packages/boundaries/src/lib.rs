#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data preparation for the NYC neighborhood boundary dataset.
//!
//! The curated boundary file (`nyc-neighborhood-boundaries.geojson`) is the
//! source of truth. From it this crate derives the centroid file, copies the
//! `slug`/`name`/`color` properties across by slug, and rewrites both files
//! in a canonical layout: features sorted by borough then name, one compact
//! feature per line. [`validate`] checks the invariants the curated file
//! must hold.
//!
//! Every operation reads whole files into memory and only writes once the
//! full transform has succeeded.

pub mod centroids;
pub mod collate;
pub mod collection;
pub mod files;
pub mod format;
pub mod merge;
pub mod paths;
pub mod pipeline;
pub mod slug;
pub mod validate;

use std::path::PathBuf;

use nyc_boundaries_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur while reading, transforming, or writing the
/// boundary datasets.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// An input file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An input file is not valid JSON.
    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Serializing an in-memory document failed.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A feature's geometry has no computable centroid.
    #[error("Feature {index} (id: {id}): {source}")]
    Feature {
        /// Zero-based position of the feature in the input collection.
        index: usize,
        /// The feature's `id`, or `none`.
        id: String,
        /// Why the centroid could not be computed.
        source: GeometryError,
    },

    /// A document does not have the expected shape.
    #[error("Schema violation: {message}")]
    SchemaViolation {
        /// Description of what went wrong.
        message: String,
    },
}
