#![allow(clippy::module_name_repetitions)]
//! Canonical file names for the boundary datasets.
//!
//! Both files live side by side in a data directory, `data/` by default.

use std::path::{Path, PathBuf};

/// File name of the curated boundary polygons.
pub const BOUNDARIES_FILE: &str = "nyc-neighborhood-boundaries.geojson";

/// File name of the derived centroid points.
pub const CENTROIDS_FILE: &str = "nyc-neighborhood-boundaries-centroids.geojson";

/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Locations of the two dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// The curated boundary file.
    pub boundaries: PathBuf,
    /// The derived centroid file.
    pub centroids: PathBuf,
}

impl DatasetPaths {
    /// Returns the canonical file locations inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            boundaries: dir.join(BOUNDARIES_FILE),
            centroids: dir.join(CENTROIDS_FILE),
        }
    }

    /// Both files, boundaries first.
    #[must_use]
    pub fn all(&self) -> [&Path; 2] {
        [&self.boundaries, &self.centroids]
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::in_dir(Path::new(DEFAULT_DATA_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_are_under_data() {
        let paths = DatasetPaths::default();
        assert_eq!(
            paths.boundaries,
            Path::new("data/nyc-neighborhood-boundaries.geojson")
        );
        assert_eq!(
            paths.centroids,
            Path::new("data/nyc-neighborhood-boundaries-centroids.geojson")
        );
    }

    #[test]
    fn all_lists_boundaries_first() {
        let paths = DatasetPaths::in_dir(Path::new("/tmp/nyc"));
        let [first, second] = paths.all();
        assert!(first.ends_with(BOUNDARIES_FILE));
        assert!(second.ends_with(CENTROIDS_FILE));
    }
}
