//! Ordered in-memory model of a `GeoJSON` `FeatureCollection`.
//!
//! Features are kept as raw JSON objects (insertion-ordered) rather than
//! typed `geojson::Feature` values so that unknown members survive a
//! round trip in their original position.

use serde_json::{Map, Value};

use crate::BoundaryError;

/// A single feature, with members in document order.
pub type Feature = Map<String, Value>;

/// The `type` value of a feature collection.
pub const FEATURE_COLLECTION_TYPE: &str = "FeatureCollection";

/// Top-level member holding free-form dataset metadata.
pub const METADATA_KEY: &str = "metadata";

/// Metadata member that must equal the number of features.
pub const FEATURES_COUNT_KEY: &str = "features_count";

/// A `FeatureCollection` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCollection {
    /// The document's `type` member.
    pub kind: String,
    /// Top-level members other than `type` and `features`, in document
    /// order.
    pub members: Map<String, Value>,
    /// The `features` array.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates a collection with no extra top-level members.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: FEATURE_COLLECTION_TYPE.to_string(),
            members: Map::new(),
            features,
        }
    }

    /// Builds a collection from a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::SchemaViolation`] if the document is not an
    /// object, lacks a string `type`, or its `features` member is not an
    /// array of objects.
    pub fn from_value(value: Value) -> Result<Self, BoundaryError> {
        let Value::Object(mut object) = value else {
            return Err(schema("document is not a JSON object"));
        };

        let kind = match object.shift_remove("type") {
            Some(Value::String(kind)) => kind,
            Some(_) => return Err(schema("`type` is not a string")),
            None => return Err(schema("document has no `type`")),
        };

        let features = match object.shift_remove("features") {
            Some(Value::Array(features)) => features,
            Some(_) => return Err(schema("`features` is not an array")),
            None => return Err(schema("document has no `features`")),
        };

        let features = features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| match feature {
                Value::Object(feature) => Ok(feature),
                _ => Err(schema(&format!("feature {index} is not a JSON object"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            members: object,
            features,
        })
    }

    /// Converts back to a JSON document ordered `type`, other members,
    /// `features`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(self.kind.clone()));
        for (key, value) in &self.members {
            object.insert(key.clone(), value.clone());
        }
        object.insert(
            "features".to_string(),
            Value::Array(self.features.iter().cloned().map(Value::Object).collect()),
        );
        Value::Object(object)
    }

    /// Returns the `metadata` object, if present.
    #[must_use]
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.members.get(METADATA_KEY).and_then(Value::as_object)
    }

    /// Rewrites `metadata.features_count` to the current feature count.
    ///
    /// Does nothing unless the metadata already declares a count.
    pub fn sync_features_count(&mut self) {
        let count = self.features.len();
        if let Some(Value::Object(metadata)) = self.members.get_mut(METADATA_KEY)
            && let Some(declared) = metadata.get_mut(FEATURES_COUNT_KEY)
        {
            *declared = Value::from(count);
        }
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Whether a feature's `type` member is `"Feature"`.
#[must_use]
pub fn is_feature(feature: &Feature) -> bool {
    feature.get("type").and_then(Value::as_str) == Some("Feature")
}

/// Returns a feature's `properties` object, if present.
#[must_use]
pub fn properties(feature: &Feature) -> Option<&Map<String, Value>> {
    feature.get("properties").and_then(Value::as_object)
}

/// Returns a string property of a feature.
#[must_use]
pub fn property_str<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    properties(feature)
        .and_then(|props| props.get(key))
        .and_then(Value::as_str)
}

/// Describes a feature's `id` for log and error messages.
#[must_use]
pub fn describe_id(feature: &Feature) -> String {
    match feature.get("id") {
        None | Some(Value::Null) => "none".to_string(),
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
    }
}

fn schema(message: &str) -> BoundaryError {
    BoundaryError::SchemaViolation {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_top_level_member_order() {
        let value = json!({
            "type": "FeatureCollection",
            "name": "nyc",
            "metadata": {"features_count": 0},
            "features": [],
            "crs": {"type": "name"}
        });

        let collection = FeatureCollection::from_value(value).unwrap();
        let keys: Vec<&str> = collection.members.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "metadata", "crs"]);

        let round_trip = collection.to_value();
        let keys: Vec<&str> = round_trip
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["type", "name", "metadata", "crs", "features"]);
    }

    #[test]
    fn rejects_missing_features() {
        let result = FeatureCollection::from_value(json!({"type": "FeatureCollection"}));
        assert!(matches!(
            result,
            Err(BoundaryError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn rejects_non_object_feature() {
        let result = FeatureCollection::from_value(json!({
            "type": "FeatureCollection",
            "features": [1]
        }));
        assert!(matches!(
            result,
            Err(BoundaryError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn syncs_declared_feature_count() {
        let mut collection = FeatureCollection::from_value(json!({
            "type": "FeatureCollection",
            "metadata": {"features_count": 99, "source": "test"},
            "features": [{"type": "Feature", "properties": {}, "geometry": null}]
        }))
        .unwrap();

        collection.sync_features_count();

        assert_eq!(
            collection.metadata().unwrap(),
            json!({"features_count": 1, "source": "test"})
                .as_object()
                .unwrap()
        );
    }

    #[test]
    fn sync_leaves_metadata_without_count_alone() {
        let mut collection = FeatureCollection::from_value(json!({
            "type": "FeatureCollection",
            "metadata": {"source": "test"},
            "features": []
        }))
        .unwrap();

        collection.sync_features_count();

        assert!(!collection.metadata().unwrap().contains_key("features_count"));
    }

    #[test]
    fn describes_ids() {
        let string_id = json!({"id": "abc"});
        let number_id = json!({"id": 7});
        let no_id = json!({});

        assert_eq!(describe_id(string_id.as_object().unwrap()), "abc");
        assert_eq!(describe_id(number_id.as_object().unwrap()), "7");
        assert_eq!(describe_id(no_id.as_object().unwrap()), "none");
    }
}
