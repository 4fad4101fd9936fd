#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Area and centroid math for neighborhood boundary polygons.
//!
//! Centroids are area-weighted (shoelace formula) over the outer ring of a
//! polygon. Holes are ignored. For a `MultiPolygon` the centroid of the
//! part with the largest outer ring is used, so islands and slivers never
//! pull the label point into the water.

use geo::{Coord, Geometry, LineString};
use thiserror::Error;

/// Scale used when rounding coordinates (6 decimal places, ~0.11 m at
/// NYC latitudes).
pub const COORDINATE_SCALE: f64 = 1e6;

/// Errors that can occur while computing a centroid.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The ring encloses zero area, so the centroid is undefined.
    #[error("Degenerate geometry: ring has zero area")]
    Degenerate,

    /// Only `Polygon` and `MultiPolygon` geometries have centroids here.
    #[error("Unsupported geometry type: {geometry_type}")]
    Unsupported {
        /// `GeoJSON` type name of the rejected geometry.
        geometry_type: String,
    },

    /// The polygon has no rings, or the multipolygon has no parts.
    #[error("Empty geometry: no rings to measure")]
    Empty,

    /// A position has fewer than two ordinates.
    #[error("Invalid position: expected [lon, lat], found {len} value(s)")]
    InvalidPosition {
        /// Number of ordinates found.
        len: usize,
    },

    /// The `GeoJSON` geometry could not be converted to `geo` types.
    #[error("Invalid GeoJSON geometry: {0}")]
    Invalid(#[from] geojson::Error),
}

/// Signed area of a ring using the shoelace formula.
///
/// Counter-clockwise rings are positive, clockwise rings negative.
#[must_use]
pub fn ring_area(ring: &LineString<f64>) -> f64 {
    ring.lines()
        .map(|line| cross(line.start, line.end))
        .sum::<f64>()
        / 2.0
}

/// Area-weighted centroid of a ring.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if the ring's signed area is zero
/// (e.g. all points collinear).
pub fn ring_centroid(ring: &LineString<f64>) -> Result<Coord<f64>, GeometryError> {
    let area = ring_area(ring);

    if area == 0.0 || !area.is_finite() {
        return Err(GeometryError::Degenerate);
    }

    let (sum_x, sum_y) = ring.lines().fold((0.0, 0.0), |(sum_x, sum_y), line| {
        let f = cross(line.start, line.end);
        (
            (line.start.x + line.end.x).mul_add(f, sum_x),
            (line.start.y + line.end.y).mul_add(f, sum_y),
        )
    });

    let factor = 1.0 / (6.0 * area);

    Ok(Coord {
        x: sum_x * factor,
        y: sum_y * factor,
    })
}

/// Centroid of a `Polygon` or `MultiPolygon`.
///
/// # Errors
///
/// Returns [`GeometryError::Unsupported`] for other geometry types,
/// [`GeometryError::Empty`] when there is no outer ring, and
/// [`GeometryError::Degenerate`] when the chosen ring has zero area.
pub fn geometry_centroid(geometry: &Geometry<f64>) -> Result<Coord<f64>, GeometryError> {
    match geometry {
        Geometry::Polygon(polygon) => {
            if polygon.exterior().0.is_empty() {
                return Err(GeometryError::Empty);
            }
            ring_centroid(polygon.exterior())
        }
        Geometry::MultiPolygon(multi) => {
            let mut largest: Option<(usize, f64)> = None;

            for (i, polygon) in multi.0.iter().enumerate() {
                let area = ring_area(polygon.exterior()).abs();
                match largest {
                    Some((_, best)) if area <= best => {}
                    _ => largest = Some((i, area)),
                }
            }

            let (index, area) = largest.ok_or(GeometryError::Empty)?;
            log::trace!(
                "Using part {index} of {} (area {area}) for multipolygon centroid",
                multi.0.len()
            );

            ring_centroid(multi.0[index].exterior())
        }
        other => Err(GeometryError::Unsupported {
            geometry_type: geo_type_name(other).to_string(),
        }),
    }
}

/// Centroid of a `GeoJSON` geometry, rounded to [`COORDINATE_SCALE`].
///
/// Non-polygonal geometries are rejected before conversion so the error
/// carries the `GeoJSON` type name.
///
/// # Errors
///
/// Returns [`GeometryError`] if the geometry is not a polygon, is
/// malformed, or has zero area.
pub fn geojson_centroid(geometry: &geojson::Geometry) -> Result<Coord<f64>, GeometryError> {
    match &geometry.value {
        geojson::Value::Polygon(rings) => {
            check_rings(rings)?;
        }
        geojson::Value::MultiPolygon(polygons) => {
            for rings in polygons {
                check_rings(rings)?;
            }
        }
        other => {
            return Err(GeometryError::Unsupported {
                geometry_type: geojson_type_name(other).to_string(),
            });
        }
    }

    let converted: Geometry<f64> = geometry.clone().try_into()?;
    let centroid = geometry_centroid(&converted)?;

    Ok(Coord {
        x: round_coordinate(centroid.x),
        y: round_coordinate(centroid.y),
    })
}

/// Rounds a coordinate to six decimal places.
#[must_use]
pub fn round_coordinate(value: f64) -> f64 {
    (value * COORDINATE_SCALE).round() / COORDINATE_SCALE
}

fn cross(a: Coord<f64>, b: Coord<f64>) -> f64 {
    a.x.mul_add(b.y, -(b.x * a.y))
}

/// Positions are indexed directly during conversion, so short ones must
/// be rejected up front.
fn check_rings(rings: &[Vec<Vec<f64>>]) -> Result<(), GeometryError> {
    for position in rings.iter().flatten() {
        if position.len() < 2 {
            return Err(GeometryError::InvalidPosition {
                len: position.len(),
            });
        }
    }
    Ok(())
}

const fn geojson_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

const fn geo_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
