//! Canonical serialization of feature collections.
//!
//! Both dataset files are committed in this layout, and downstream tooling
//! relies on it: every feature sits on exactly one line.
//!
//! ```text
//! {
//!   "type": "FeatureCollection",
//!   "metadata": {"features_count":277},
//!   "features": [
//!     {"type":"Feature","properties":{...},"geometry":{...}},
//!     {"type":"Feature","properties":{...},"geometry":{...}}
//!   ]
//! }
//! ```

use std::fmt::Write as _;

use nyc_boundaries_models::{OutputFormat, PROPERTY_BOROUGH, PROPERTY_NAME};
use serde_json::{Map, Value};

use crate::BoundaryError;
use crate::collate::locale_cmp;
use crate::collection::{Feature, FeatureCollection, property_str};

/// Feature members that lead every serialized feature, in order.
const LEADING_FEATURE_KEYS: &[&str] = &["type", "properties", "geometry"];

/// Stable-sorts features by `(borough, name)`.
///
/// Missing or non-string values sort as the empty string.
pub fn sort_features(features: &mut [Feature]) {
    features.sort_by(|a, b| {
        let borough_a = property_str(a, PROPERTY_BOROUGH).unwrap_or_default();
        let borough_b = property_str(b, PROPERTY_BOROUGH).unwrap_or_default();
        locale_cmp(borough_a, borough_b).then_with(|| {
            let name_a = property_str(a, PROPERTY_NAME).unwrap_or_default();
            let name_b = property_str(b, PROPERTY_NAME).unwrap_or_default();
            locale_cmp(name_a, name_b)
        })
    });
}

/// Reorders a feature's members to `type, properties, geometry`, followed
/// by the remaining members in their original order.
#[must_use]
pub fn reorder_feature(feature: &Feature) -> Feature {
    let mut reordered = Map::new();

    for &key in LEADING_FEATURE_KEYS {
        if let Some(value) = feature.get(key) {
            reordered.insert(key.to_string(), value.clone());
        }
    }

    for (key, value) in feature {
        if !LEADING_FEATURE_KEYS.contains(&key.as_str()) {
            reordered.insert(key.clone(), value.clone());
        }
    }

    reordered
}

/// Returns a sorted copy of the collection with every feature reordered.
#[must_use]
pub fn canonicalize(collection: &FeatureCollection) -> FeatureCollection {
    let mut features = collection.features.clone();
    sort_features(&mut features);

    FeatureCollection {
        kind: collection.kind.clone(),
        members: collection.members.clone(),
        features: features.iter().map(reorder_feature).collect(),
    }
}

/// Renders an already canonical collection one feature per line.
///
/// Ordering is taken as-is; see [`canonicalize`].
///
/// # Errors
///
/// Returns [`serde_json::Error`] if a member fails to serialize.
///
/// # Panics
///
/// Panics if writing to the output `String` fails.
pub fn render_compact_lines(collection: &FeatureCollection) -> Result<String, serde_json::Error> {
    let mut output = String::from("{\n");

    writeln!(
        output,
        "  \"type\": {},",
        serde_json::to_string(&collection.kind)?
    )
    .unwrap();

    for (key, value) in &collection.members {
        writeln!(
            output,
            "  {}: {},",
            serde_json::to_string(key)?,
            serde_json::to_string(value)?
        )
        .unwrap();
    }

    output.push_str("  \"features\": [\n");

    let last = collection.features.len().saturating_sub(1);
    for (index, feature) in collection.features.iter().enumerate() {
        let comma = if index < last { "," } else { "" };
        writeln!(output, "    {}{comma}", serde_json::to_string(feature)?).unwrap();
    }

    output.push_str("  ]\n");
    output.push_str("}\n");

    Ok(output)
}

/// Renders an already canonical collection as two-space indented JSON
/// with a trailing newline.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if the document fails to serialize.
pub fn render_pretty(collection: &FeatureCollection) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string_pretty(&collection.to_value())?;
    output.push('\n');
    Ok(output)
}

/// Canonicalizes and renders a collection in the requested layout.
///
/// # Errors
///
/// Returns [`BoundaryError::Serialize`] if serialization fails.
pub fn render(
    collection: &FeatureCollection,
    format: OutputFormat,
) -> Result<String, BoundaryError> {
    let canonical = canonicalize(collection);
    let output = match format {
        OutputFormat::CompactLines => render_compact_lines(&canonical)?,
        OutputFormat::Pretty => render_pretty(&canonical)?,
    };
    Ok(output)
}
