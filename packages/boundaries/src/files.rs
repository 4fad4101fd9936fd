//! Reading and atomically writing `GeoJSON` files.

use std::path::Path;

use crate::BoundaryError;
use crate::collection::FeatureCollection;

/// Reads a file into a string, mapping a missing file to
/// [`BoundaryError::FileNotFound`].
///
/// # Errors
///
/// Returns [`BoundaryError`] if the file is missing or unreadable.
pub fn read_text(path: &Path) -> Result<String, BoundaryError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BoundaryError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BoundaryError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Parses file contents into a [`FeatureCollection`].
///
/// `path` is only used for error context.
///
/// # Errors
///
/// Returns [`BoundaryError::Json`] for malformed JSON and
/// [`BoundaryError::SchemaViolation`] for JSON that is not a feature
/// collection.
pub fn parse_collection(text: &str, path: &Path) -> Result<FeatureCollection, BoundaryError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| BoundaryError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;

    FeatureCollection::from_value(value)
}

/// Reads and parses a `GeoJSON` `FeatureCollection` file.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the file is missing, unreadable, or not a
/// valid feature collection.
pub fn read_collection(path: &Path) -> Result<FeatureCollection, BoundaryError> {
    let text = read_text(path)?;
    let collection = parse_collection(&text, path)?;
    log::debug!(
        "Read {} features from {}",
        collection.len(),
        path.display()
    );
    Ok(collection)
}

/// Writes `contents` to `path` via a sibling `.tmp` file and a rename, so
/// an interrupted run never leaves a truncated dataset behind.
///
/// # Errors
///
/// Returns [`BoundaryError::Io`] if the temp file cannot be written or
/// renamed into place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), BoundaryError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents).map_err(|e| BoundaryError::Io {
        path: tmp_path.clone(),
        source: e,
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| BoundaryError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
