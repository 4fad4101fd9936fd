//! Derives one centroid `Point` feature per boundary feature.

use nyc_boundaries_geometry::{GeometryError, geojson_centroid};
use nyc_boundaries_models::CENTROID_PROPERTIES;
use serde_json::{Map, Value, json};

use crate::BoundaryError;
use crate::collection::{Feature, FeatureCollection, METADATA_KEY, describe_id};

/// Which boundary properties are copied onto each centroid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CentroidProperties {
    /// Every property, unchanged.
    #[default]
    All,
    /// Only `slug`, `name`, and `color`, in that order.
    Curated,
}

/// Builds the centroid collection for a boundary collection.
///
/// Each output feature keeps the input's `id` (when present) and an
/// independent copy of its properties. Top-level `metadata` is carried
/// forward with `features_count` updated.
///
/// # Errors
///
/// Returns [`BoundaryError::Feature`] for the first feature whose
/// geometry is not a non-degenerate `Polygon` or `MultiPolygon`. No
/// partial result is produced.
pub fn generate_centroids(
    boundaries: &FeatureCollection,
    properties: CentroidProperties,
) -> Result<FeatureCollection, BoundaryError> {
    let features = boundaries
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            centroid_feature(feature, properties).map_err(|source| BoundaryError::Feature {
                index,
                id: describe_id(feature),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut centroids = FeatureCollection::new(features);
    if let Some(metadata) = boundaries.members.get(METADATA_KEY) {
        centroids
            .members
            .insert(METADATA_KEY.to_string(), metadata.clone());
    }
    centroids.sync_features_count();

    log::info!("Generated {} centroid points", centroids.len());

    Ok(centroids)
}

/// Builds the centroid `Point` feature for a single boundary feature.
///
/// # Errors
///
/// Returns [`GeometryError`] if the feature's geometry has no centroid.
pub fn centroid_feature(
    feature: &Feature,
    properties: CentroidProperties,
) -> Result<Feature, GeometryError> {
    let geometry_value = feature.get("geometry").cloned().unwrap_or(Value::Null);
    let geometry = geojson::Geometry::from_json_value(geometry_value)?;
    let centroid = geojson_centroid(&geometry)?;

    let source_properties = feature
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let props = match properties {
        CentroidProperties::All => source_properties,
        CentroidProperties::Curated => curated(&source_properties),
    };

    let mut point = Map::new();
    point.insert("type".to_string(), Value::from("Feature"));
    point.insert("properties".to_string(), Value::Object(props));
    point.insert(
        "geometry".to_string(),
        json!({
            "type": "Point",
            "coordinates": [centroid.x, centroid.y],
        }),
    );
    if let Some(id) = feature.get("id") {
        point.insert("id".to_string(), id.clone());
    }

    Ok(point)
}

fn curated(source: &Map<String, Value>) -> Map<String, Value> {
    CENTROID_PROPERTIES
        .iter()
        .filter_map(|&key| {
            source
                .get(key)
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn boundary(id: Option<Value>, geometry: Value) -> Feature {
        let mut feature = json!({
            "type": "Feature",
            "properties": {
                "name": "Two Bridges",
                "borough": "manhattan",
                "color": 3,
                "wikipedia_url": "https://en.wikipedia.org/wiki/Two_Bridges,_Manhattan",
                "slug": "two-bridges-manhattan"
            },
            "geometry": geometry
        })
        .as_object()
        .unwrap()
        .clone();
        if let Some(id) = id {
            feature.insert("id".to_string(), id);
        }
        feature
    }

    fn square(x: f64, y: f64, size: f64) -> Value {
        json!([[
            [x, y],
            [x + size, y],
            [x + size, y + size],
            [x, y + size],
            [x, y]
        ]])
    }

    fn coordinates(feature: &Feature) -> (f64, f64) {
        let coords = feature["geometry"]["coordinates"].as_array().unwrap();
        (coords[0].as_f64().unwrap(), coords[1].as_f64().unwrap())
    }

    #[test]
    fn polygon_centroid_point() {
        let feature = boundary(
            Some(json!("two-bridges")),
            json!({"type": "Polygon", "coordinates": square(0.0, 0.0, 2.0)}),
        );

        let point = centroid_feature(&feature, CentroidProperties::All).unwrap();

        assert_eq!(point["type"], "Feature");
        assert_eq!(point["geometry"]["type"], "Point");
        assert_eq!(coordinates(&point), (1.0, 1.0));
        assert_eq!(point["id"], "two-bridges");
        assert_eq!(point["properties"], feature["properties"]);
    }

    #[test]
    fn point_feature_key_order() {
        let feature = boundary(
            Some(json!(4)),
            json!({"type": "Polygon", "coordinates": square(0.0, 0.0, 2.0)}),
        );
        let point = centroid_feature(&feature, CentroidProperties::All).unwrap();
        let keys: Vec<&str> = point.keys().map(String::as_str).collect();
        assert_eq!(keys, ["type", "properties", "geometry", "id"]);
    }

    #[test]
    fn omits_missing_id() {
        let feature = boundary(
            None,
            json!({"type": "Polygon", "coordinates": square(0.0, 0.0, 2.0)}),
        );
        let point = centroid_feature(&feature, CentroidProperties::All).unwrap();
        assert!(!point.contains_key("id"));
    }

    #[test]
    fn curated_properties_keep_slug_name_color() {
        let feature = boundary(
            None,
            json!({"type": "Polygon", "coordinates": square(0.0, 0.0, 2.0)}),
        );
        let point = centroid_feature(&feature, CentroidProperties::Curated).unwrap();

        let props = point["properties"].as_object().unwrap();
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, ["slug", "name", "color"]);
        assert_eq!(props["name"], "Two Bridges");
    }

    #[test]
    fn multipolygon_uses_largest_part() {
        let feature = boundary(
            None,
            json!({
                "type": "MultiPolygon",
                "coordinates": [square(50.0, 50.0, 0.001), square(10.0, 10.0, 4.0)]
            }),
        );
        let point = centroid_feature(&feature, CentroidProperties::All).unwrap();
        assert_eq!(coordinates(&point), (12.0, 12.0));
    }

    #[test]
    fn output_properties_are_independent_copies() {
        let boundaries = FeatureCollection::new(vec![boundary(
            None,
            json!({"type": "Polygon", "coordinates": square(0.0, 0.0, 2.0)}),
        )]);

        let mut centroids = generate_centroids(&boundaries, CentroidProperties::All).unwrap();
        centroids.features[0]["properties"]["name"] = json!("Changed");

        assert_eq!(boundaries.features[0]["properties"]["name"], "Two Bridges");
    }

    #[test]
    fn carries_metadata_and_recounts() {
        let mut boundaries = FeatureCollection::new(vec![
            boundary(
                None,
                json!({"type": "Polygon", "coordinates": square(0.0, 0.0, 2.0)}),
            ),
            boundary(
                None,
                json!({"type": "Polygon", "coordinates": square(5.0, 5.0, 2.0)}),
            ),
        ]);
        boundaries.members.insert(
            "metadata".to_string(),
            json!({"features_count": 7, "source": "curated"}),
        );
        boundaries
            .members
            .insert("name".to_string(), json!("boundaries"));

        let centroids = generate_centroids(&boundaries, CentroidProperties::All).unwrap();

        assert_eq!(centroids.len(), 2);
        assert_eq!(
            centroids.members["metadata"],
            json!({"features_count": 2, "source": "curated"})
        );
        assert!(!centroids.members.contains_key("name"));
    }

    #[test]
    fn unsupported_geometry_aborts_with_index_and_id() {
        let boundaries = FeatureCollection::new(vec![
            boundary(
                None,
                json!({"type": "Polygon", "coordinates": square(0.0, 0.0, 2.0)}),
            ),
            boundary(
                Some(json!("stray-point")),
                json!({"type": "Point", "coordinates": [1.0, 2.0]}),
            ),
        ]);

        match generate_centroids(&boundaries, CentroidProperties::All) {
            Err(BoundaryError::Feature { index, id, source }) => {
                assert_eq!(index, 1);
                assert_eq!(id, "stray-point");
                assert!(matches!(source, GeometryError::Unsupported { .. }));
            }
            other => panic!("expected Feature error, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_geometry_aborts() {
        let boundaries = FeatureCollection::new(vec![boundary(
            None,
            json!({
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [0.0, 0.0]]]
            }),
        )]);

        match generate_centroids(&boundaries, CentroidProperties::All) {
            Err(BoundaryError::Feature { source, .. }) => {
                assert!(matches!(source, GeometryError::Degenerate));
            }
            other => panic!("expected Feature error, got {other:?}"),
        }
    }

    #[test]
    fn null_geometry_is_rejected() {
        let feature = boundary(None, Value::Null);
        assert!(centroid_feature(&feature, CentroidProperties::All).is_err());
    }
}
