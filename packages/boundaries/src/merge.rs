//! Copies `name` and `color` from boundary features onto centroid
//! features, joined on `slug`.

use std::collections::BTreeMap;

use nyc_boundaries_models::{PROPERTY_COLOR, PROPERTY_NAME, PROPERTY_SLUG};
use serde_json::{Map, Value};

use crate::collection::{Feature, FeatureCollection, property_str};

/// Outcome of a property merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Centroid features whose slug was found in the boundary set.
    pub matched: u64,
    /// Centroid features with no slug or an unknown slug.
    pub unmatched: u64,
}

/// The properties a boundary contributes to its centroid.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceProperties {
    name: Option<Value>,
    color: Option<Value>,
}

/// Builds the `slug -> {name, color}` lookup from boundary features.
///
/// Features without a non-empty string `slug` are left out.
fn property_index(boundaries: &FeatureCollection) -> BTreeMap<&str, SourceProperties> {
    let mut index = BTreeMap::new();

    for feature in &boundaries.features {
        let Some(slug) = slug_of(feature) else {
            continue;
        };
        let props = feature.get("properties").and_then(Value::as_object);
        let source = SourceProperties {
            name: props.and_then(|p| p.get(PROPERTY_NAME)).cloned(),
            color: props.and_then(|p| p.get(PROPERTY_COLOR)).cloned(),
        };
        if index.insert(slug, source).is_some() {
            log::warn!("Duplicate boundary slug {slug:?}; the last occurrence wins");
        }
    }

    index
}

/// Rewrites every centroid's properties from the boundary set.
///
/// Matched centroids end up with exactly `{slug, name, color}`; unmatched
/// ones with `{}`. Geometry and other members are untouched.
pub fn apply_properties(
    boundaries: &FeatureCollection,
    centroids: &mut FeatureCollection,
) -> MergeStats {
    let index = property_index(boundaries);
    let mut stats = MergeStats::default();

    for feature in &mut centroids.features {
        let merged = slug_of(feature).and_then(|slug| {
            index
                .get(slug)
                .map(|source| merged_properties(slug, source))
        });

        let props = if let Some(props) = merged {
            stats.matched += 1;
            props
        } else {
            stats.unmatched += 1;
            Map::new()
        };

        feature.insert("properties".to_string(), Value::Object(props));
    }

    log::info!(
        "Applied properties: {} matched, {} unmatched",
        stats.matched,
        stats.unmatched
    );

    stats
}

fn slug_of(feature: &Feature) -> Option<&str> {
    property_str(feature, PROPERTY_SLUG).filter(|slug| !slug.is_empty())
}

fn merged_properties(slug: &str, source: &SourceProperties) -> Map<String, Value> {
    let mut props = Map::new();
    props.insert(PROPERTY_SLUG.to_string(), Value::from(slug));
    if let Some(name) = &source.name {
        props.insert(PROPERTY_NAME.to_string(), name.clone());
    }
    if let Some(color) = &source.color {
        props.insert(PROPERTY_COLOR.to_string(), color.clone());
    }
    props
}
