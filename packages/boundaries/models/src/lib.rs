#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the NYC neighborhood boundary dataset.
//!
//! Defines the canonical borough set, the property keys the curated
//! boundary file may carry, and the output layouts the formatter can
//! produce.

use strum_macros::{AsRefStr, Display, EnumString};

/// Property holding the neighborhood name.
pub const PROPERTY_NAME: &str = "name";

/// Property holding the borough slug (e.g. `"staten-island"`).
pub const PROPERTY_BOROUGH: &str = "borough";

/// Property holding the map color index.
pub const PROPERTY_COLOR: &str = "color";

/// Property holding the optional Wikipedia article URL.
pub const PROPERTY_WIKIPEDIA_URL: &str = "wikipedia_url";

/// Property holding the `name-borough` join key.
pub const PROPERTY_SLUG: &str = "slug";

/// Properties every boundary feature must carry.
pub const REQUIRED_PROPERTIES: &[&str] = &[PROPERTY_NAME, PROPERTY_BOROUGH, PROPERTY_COLOR];

/// Every property a boundary feature is allowed to carry.
pub const ALLOWED_PROPERTIES: &[&str] = &[
    PROPERTY_NAME,
    PROPERTY_BOROUGH,
    PROPERTY_COLOR,
    PROPERTY_WIKIPEDIA_URL,
    PROPERTY_SLUG,
];

/// Properties kept on centroid features, in output order.
pub const CENTROID_PROPERTIES: &[&str] = &[PROPERTY_SLUG, PROPERTY_NAME, PROPERTY_COLOR];

/// Smallest valid `color` value.
pub const MIN_COLOR: i64 = 0;

/// Largest valid `color` value.
pub const MAX_COLOR: i64 = 4;

/// One of the five NYC boroughs, as spelled in the `borough` property.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Borough {
    /// `manhattan`
    Manhattan,
    /// `queens`
    Queens,
    /// `bronx`
    Bronx,
    /// `brooklyn`
    Brooklyn,
    /// `staten-island`
    StatenIsland,
}

impl Borough {
    /// All boroughs, in the order the dataset documentation lists them.
    pub const ALL: &[Self] = &[
        Self::Manhattan,
        Self::Queens,
        Self::Bronx,
        Self::Brooklyn,
        Self::StatenIsland,
    ];
}

/// On-disk layout for a written `FeatureCollection`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    /// Header members on their own lines, then one compact feature per line.
    #[default]
    CompactLines,
    /// Two-space indented JSON.
    Pretty,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn borough_strings_are_kebab_case() {
        assert_eq!(Borough::StatenIsland.as_ref(), "staten-island");
        assert_eq!(Borough::Bronx.to_string(), "bronx");
        assert_eq!(
            Borough::from_str("staten-island").unwrap(),
            Borough::StatenIsland
        );
    }

    #[test]
    fn format_parse_error_boxes_into_error() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            OutputFormat::from_str("yaml").unwrap_err().into();
        assert!(!err.to_string().is_empty());
        assert_eq!(
            OutputFormat::from_str("compact-lines").unwrap(),
            OutputFormat::CompactLines
        );
    }

    #[test]
    fn borough_rejects_display_names() {
        assert!(Borough::from_str("Staten Island").is_err());
        assert!(Borough::from_str("Manhattan").is_err());
    }

    #[test]
    fn all_boroughs_listed_once() {
        let mut seen = std::collections::BTreeSet::new();
        for borough in Borough::ALL {
            assert!(seen.insert(borough), "Duplicate borough: {borough}");
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn output_format_parses() {
        assert_eq!(
            OutputFormat::from_str("compact-lines").unwrap(),
            OutputFormat::CompactLines
        );
        assert_eq!(OutputFormat::from_str("pretty").unwrap(), OutputFormat::Pretty);
        assert_eq!(OutputFormat::default(), OutputFormat::CompactLines);
    }

    #[test]
    fn centroid_properties_are_allowed_boundary_properties() {
        for key in CENTROID_PROPERTIES {
            assert!(ALLOWED_PROPERTIES.contains(key), "{key} not allowed");
        }
        for key in REQUIRED_PROPERTIES {
            assert!(ALLOWED_PROPERTIES.contains(key), "{key} not allowed");
        }
    }
}
