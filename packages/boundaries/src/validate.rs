//! Structural and semantic checks for the curated boundary file.
//!
//! Every rule is evaluated and every violation collected, so a single run
//! reports everything that needs fixing.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use nyc_boundaries_models::{
    ALLOWED_PROPERTIES, Borough, MAX_COLOR, MIN_COLOR, PROPERTY_BOROUGH, PROPERTY_COLOR,
    PROPERTY_NAME, PROPERTY_SLUG, REQUIRED_PROPERTIES,
};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::BoundaryError;
use crate::collection::{
    FEATURE_COLLECTION_TYPE, FEATURES_COUNT_KEY, FeatureCollection, is_feature,
};
use crate::slug::boundary_slug;

/// Marker identifying a feature line in the compact-lines layout.
const FEATURE_LINE_MARKER: &str = "\"type\":\"Feature\"";

/// Tunable thresholds for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Minimum number of features the collection must hold.
    pub min_features: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self { min_features: 1 }
    }
}

/// A single broken rule. Feature numbers are one-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The top-level `type` is not `FeatureCollection`.
    #[error("Document type is {found:?}, expected \"FeatureCollection\"")]
    NotFeatureCollection {
        /// The `type` found.
        found: String,
    },

    /// The collection holds fewer features than required.
    #[error("Expected at least {minimum} features, found {found}")]
    TooFewFeatures {
        /// Features present.
        found: usize,
        /// Features required.
        minimum: usize,
    },

    /// `metadata.features_count` is missing or wrong.
    #[error("metadata.features_count is {declared}, but there are {actual} features")]
    FeaturesCountMismatch {
        /// The declared value as JSON, or `missing`.
        declared: String,
        /// Features present.
        actual: usize,
    },

    /// A feature's `type` is not `Feature`.
    #[error("Feature {feature} should have type \"Feature\"")]
    NotAFeature {
        /// Feature number.
        feature: usize,
    },

    /// A feature has no `properties` object.
    #[error("Feature {feature} should have properties")]
    MissingProperties {
        /// Feature number.
        feature: usize,
    },

    /// A feature's geometry is null or lacks `type`/`coordinates`.
    #[error("Feature {feature} should have a geometry with type and coordinates")]
    MissingGeometry {
        /// Feature number.
        feature: usize,
    },

    /// The number of single-line features differs from the feature count.
    #[error("Found {found} single-line features, expected {expected}")]
    FeatureLineCount {
        /// Feature lines found in the text.
        found: usize,
        /// Features in the collection.
        expected: usize,
    },

    /// A feature line has unbalanced braces.
    #[error("Feature on line {line} spans multiple lines (unbalanced braces)")]
    MultiLineFeature {
        /// One-based line number.
        line: usize,
    },

    /// A required property is absent.
    #[error("Feature {feature} should have a {key:?} property")]
    MissingProperty {
        /// Feature number.
        feature: usize,
        /// The missing key.
        key: &'static str,
    },

    /// A property outside the allowed set is present.
    #[error("Feature {feature} has unexpected property {key:?}")]
    UnexpectedProperty {
        /// Feature number.
        feature: usize,
        /// The unexpected key.
        key: String,
    },

    /// `name` or `borough` is not a non-empty string.
    #[error("Feature {feature} {key:?} should be a non-empty string")]
    EmptyString {
        /// Feature number.
        feature: usize,
        /// The offending key.
        key: &'static str,
    },

    /// `color` is not an integer in range.
    #[error("Feature {feature} color should be an integer between 0-4, found {found}")]
    InvalidColor {
        /// Feature number.
        feature: usize,
        /// The value found, as JSON.
        found: String,
    },

    /// `slug` does not match the name and borough.
    #[error("Feature {name:?} in {borough:?} should have slug {expected:?}, found {found:?}")]
    SlugMismatch {
        /// The feature's name.
        name: String,
        /// The feature's borough.
        borough: String,
        /// The slug derived from name and borough.
        expected: String,
        /// The slug present, if any.
        found: Option<String>,
    },

    /// Two or more features share a slug.
    #[error("Slug {slug:?} is used by more than one feature")]
    DuplicateSlug {
        /// The shared slug.
        slug: String,
    },

    /// `borough` is not one of the five boroughs.
    #[error("Feature {feature} borough {borough:?} is not a valid NYC borough")]
    InvalidBorough {
        /// Feature number.
        feature: usize,
        /// The value found.
        borough: String,
    },

    /// A borough has no features.
    #[error("No neighborhoods in {borough}")]
    MissingBorough {
        /// The absent borough.
        borough: Borough,
    },

    /// A name appears more than once within a borough.
    #[error("Neighborhood name {name:?} appears more than once in {borough}")]
    DuplicateName {
        /// The borough.
        borough: String,
        /// The repeated name.
        name: String,
    },
}

/// Every violation found in one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Violations in discovery order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether no rule was broken.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Converts a failing report into [`BoundaryError::SchemaViolation`].
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::SchemaViolation`] if any violation was
    /// recorded.
    pub fn into_result(self) -> Result<(), BoundaryError> {
        if self.is_valid() {
            return Ok(());
        }
        Err(BoundaryError::SchemaViolation {
            message: format!(
                "{} violation(s), first: {}",
                self.violations.len(),
                self.violations[0]
            ),
        })
    }
}

/// Validates a boundary collection.
///
/// `raw_text` is the file contents the collection was parsed from; when
/// given, the single-line layout is checked as well.
#[must_use]
pub fn validate_boundaries(
    collection: &FeatureCollection,
    raw_text: Option<&str>,
    rules: &ValidationRules,
) -> ValidationReport {
    let mut violations = Vec::new();

    check_document(collection, rules, &mut violations);

    if let Some(text) = raw_text {
        violations.extend(check_line_layout(text, collection.len()));
    }

    let mut slugs: BTreeMap<String, usize> = BTreeMap::new();
    let mut names: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();

    for (index, feature) in collection.features.iter().enumerate() {
        let number = index + 1;

        if !is_feature(feature) {
            violations.push(Violation::NotAFeature { feature: number });
        }

        check_geometry(feature.get("geometry"), number, &mut violations);

        let Some(props) = feature.get("properties").and_then(Value::as_object) else {
            violations.push(Violation::MissingProperties { feature: number });
            continue;
        };

        check_properties(props, number, &mut violations);

        let name = props.get(PROPERTY_NAME).and_then(Value::as_str);
        let borough = props.get(PROPERTY_BOROUGH).and_then(Value::as_str);

        if let (Some(name), Some(borough)) = (name, borough) {
            let expected = boundary_slug(name, borough);
            let found = props.get(PROPERTY_SLUG).and_then(Value::as_str);
            if found != Some(expected.as_str()) {
                violations.push(Violation::SlugMismatch {
                    name: name.to_string(),
                    borough: borough.to_string(),
                    expected,
                    found: found.map(str::to_string),
                });
            }

            *names
                .entry(borough.to_string())
                .or_default()
                .entry(name.to_string())
                .or_default() += 1;
        }

        if let Some(slug) = props.get(PROPERTY_SLUG).and_then(Value::as_str) {
            *slugs.entry(slug.to_string()).or_default() += 1;
        }
    }

    for (slug, count) in slugs {
        if count > 1 {
            violations.push(Violation::DuplicateSlug { slug });
        }
    }

    for (borough, counts) in &names {
        for (name, &count) in counts {
            if count > 1 {
                violations.push(Violation::DuplicateName {
                    borough: borough.clone(),
                    name: name.clone(),
                });
            }
        }
    }

    let present: BTreeSet<Borough> = names
        .keys()
        .filter_map(|borough| Borough::from_str(borough).ok())
        .collect();
    for &borough in Borough::ALL {
        if !present.contains(&borough) {
            violations.push(Violation::MissingBorough { borough });
        }
    }

    if violations.is_empty() {
        log::info!("Validated {} features: no violations", collection.len());
    } else {
        log::warn!(
            "Validated {} features: {} violation(s)",
            collection.len(),
            violations.len()
        );
    }

    ValidationReport { violations }
}

/// Checks that every feature occupies exactly one line of `text`.
///
/// Lines containing `"type":"Feature"` are counted as feature lines and
/// must have balanced braces.
#[must_use]
pub fn check_line_layout(text: &str, feature_count: usize) -> Vec<Violation> {
    let mut violations = Vec::new();

    let feature_lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains(FEATURE_LINE_MARKER))
        .collect();

    if feature_lines.len() != feature_count {
        violations.push(Violation::FeatureLineCount {
            found: feature_lines.len(),
            expected: feature_count,
        });
    }

    for (index, line) in feature_lines {
        if brace_balance(line) != 0 {
            violations.push(Violation::MultiLineFeature { line: index + 1 });
        }
    }

    violations
}

fn check_document(
    collection: &FeatureCollection,
    rules: &ValidationRules,
    violations: &mut Vec<Violation>,
) {
    if collection.kind != FEATURE_COLLECTION_TYPE {
        violations.push(Violation::NotFeatureCollection {
            found: collection.kind.clone(),
        });
    }

    if collection.len() < rules.min_features {
        violations.push(Violation::TooFewFeatures {
            found: collection.len(),
            minimum: rules.min_features,
        });
    }

    if let Some(metadata) = collection.metadata() {
        let declared = metadata.get(FEATURES_COUNT_KEY);
        let matches = declared
            .and_then(Value::as_u64)
            .is_some_and(|count| usize::try_from(count).ok() == Some(collection.len()));
        if !matches {
            violations.push(Violation::FeaturesCountMismatch {
                declared: declared.map_or_else(|| "missing".to_string(), Value::to_string),
                actual: collection.len(),
            });
        }
    }
}

fn check_geometry(geometry: Option<&Value>, feature: usize, violations: &mut Vec<Violation>) {
    let complete = geometry
        .and_then(Value::as_object)
        .is_some_and(|geometry| {
            geometry.get("type").is_some_and(|t| !t.is_null())
                && geometry.get("coordinates").is_some_and(|c| !c.is_null())
        });
    if !complete {
        violations.push(Violation::MissingGeometry { feature });
    }
}

fn check_properties(props: &Map<String, Value>, feature: usize, violations: &mut Vec<Violation>) {
    for &key in REQUIRED_PROPERTIES {
        if !props.contains_key(key) {
            violations.push(Violation::MissingProperty { feature, key });
        }
    }

    for key in props.keys() {
        if !ALLOWED_PROPERTIES.contains(&key.as_str()) {
            violations.push(Violation::UnexpectedProperty {
                feature,
                key: key.clone(),
            });
        }
    }

    for key in [PROPERTY_NAME, PROPERTY_BOROUGH] {
        if let Some(value) = props.get(key)
            && !value.as_str().is_some_and(|s| !s.is_empty())
        {
            violations.push(Violation::EmptyString { feature, key });
        }
    }

    if let Some(color) = props.get(PROPERTY_COLOR)
        && !integer_value(color).is_some_and(|c| (MIN_COLOR..=MAX_COLOR).contains(&c))
    {
        violations.push(Violation::InvalidColor {
            feature,
            found: color.to_string(),
        });
    }

    if let Some(borough) = props.get(PROPERTY_BOROUGH).and_then(Value::as_str)
        && !borough.is_empty()
        && Borough::from_str(borough).is_err()
    {
        violations.push(Violation::InvalidBorough {
            feature,
            borough: borough.to_string(),
        });
    }
}

/// Integer value of a JSON number, accepting integral floats like `2.0`.
#[allow(clippy::cast_possible_truncation)]
fn integer_value(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
            .map(|f| f as i64)
    })
}

fn brace_balance(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}
