//! In-memory maritime network: coordinates, restriction tags, and the
//! GeoJSON parser that turns a published network document into features.

use std::fmt;
use std::str::FromStr;

use geo::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// A `(longitude, latitude)` pair in degrees.
///
/// Longitudes are nominally within `[-180, 180]`, but shifted graph variants and
/// meridian queries produce unwrapped values outside that range, so nothing in
/// this type enforces it. Use [`Coordinate::validate_waypoint`] for user input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Return a copy with the longitude replaced.
    pub fn with_lon(self, lon: f64) -> Self {
        Self { lon, ..self }
    }

    /// Reject values that cannot describe a point on the globe.
    pub fn validate_waypoint(&self) -> Result<()> {
        let valid = self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat);
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate {
                longitude: self.lon,
                latitude: self.lat,
            })
        }
    }

    /// Squared planar distance in degree space, used for vertex snapping.
    pub fn planar_distance_squared(&self, other: &Coordinate) -> f64 {
        let dx = self.lon - other.lon;
        let dy = self.lat - other.lat;
        dx * dx + dy * dy
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.lon, value.lat]
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(value: Coordinate) -> Self {
        Point::new(value.lon, value.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parse `"LON,LAT"`, tolerating whitespace around either component.
    fn from_str(s: &str) -> Result<Self> {
        let parse_error = || Error::CoordinateParse {
            input: s.to_string(),
        };
        let (lon, lat) = s.split_once(',').ok_or_else(parse_error)?;
        let lon: f64 = lon.trim().parse().map_err(|_| parse_error())?;
        let lat: f64 = lat.trim().parse().map_err(|_| parse_error())?;
        Ok(Self::new(lon, lat))
    }
}

/// Restriction categories carried by network segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionTag {
    /// Traffic-separation scheme lane.
    TrafficLane,
    Suez,
    Panama,
}

impl RestrictionTag {
    /// Map the network's `desc_` property onto a tag.
    pub fn from_desc(desc: &str) -> Option<Self> {
        match desc.trim().to_ascii_lowercase().as_str() {
            "irtc" => Some(RestrictionTag::TrafficLane),
            "suez" => Some(RestrictionTag::Suez),
            "panama" => Some(RestrictionTag::Panama),
            _ => None,
        }
    }
}

impl fmt::Display for RestrictionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RestrictionTag::TrafficLane => "traffic-lane",
            RestrictionTag::Suez => "suez",
            RestrictionTag::Panama => "panama",
        };
        f.write_str(value)
    }
}

/// One polyline of the network with its optional restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkFeature {
    pub coordinates: Vec<Coordinate>,
    pub tag: Option<RestrictionTag>,
}

impl NetworkFeature {
    pub fn new(coordinates: Vec<Coordinate>, tag: Option<RestrictionTag>) -> Self {
        Self { coordinates, tag }
    }

    /// Number of consecutive coordinate pairs, i.e. undirected segments.
    pub fn segment_count(&self) -> usize {
        self.coordinates.len().saturating_sub(1)
    }
}

/// The loaded maritime network. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkModel {
    features: Vec<NetworkFeature>,
}

impl NetworkModel {
    pub fn new(features: Vec<NetworkFeature>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[NetworkFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Total number of segments across all features.
    pub fn segment_count(&self) -> usize {
        self.features.iter().map(NetworkFeature::segment_count).sum()
    }

    /// Count of features carrying the given tag.
    pub fn tagged_count(&self, tag: RestrictionTag) -> usize {
        self.features
            .iter()
            .filter(|feature| feature.tag == Some(tag))
            .count()
    }

    /// Parse a GeoJSON `FeatureCollection` document.
    ///
    /// `LineString` features become one [`NetworkFeature`]; each member of a
    /// `MultiLineString` becomes its own feature sharing the parent's tag.
    /// Other geometry types are skipped with a warning.
    pub fn from_geojson_str(document: &str) -> Result<Self> {
        let collection: RawFeatureCollection =
            serde_json::from_str(document).map_err(|err| Error::NetworkParse {
                message: err.to_string(),
            })?;
        Self::from_raw(collection)
    }

    /// Parse a GeoJSON document from a reader.
    pub fn from_geojson_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let collection: RawFeatureCollection =
            serde_json::from_reader(reader).map_err(|err| Error::NetworkParse {
                message: err.to_string(),
            })?;
        Self::from_raw(collection)
    }

    fn from_raw(collection: RawFeatureCollection) -> Result<Self> {
        if collection.kind != "FeatureCollection" {
            return Err(Error::NetworkParse {
                message: format!("expected a FeatureCollection, found '{}'", collection.kind),
            });
        }

        let mut features = Vec::with_capacity(collection.features.len());
        let mut skipped = 0usize;

        for (index, raw) in collection.features.into_iter().enumerate() {
            let tag = raw
                .properties
                .as_ref()
                .and_then(|props| props.desc.as_deref())
                .and_then(|desc| {
                    let tag = RestrictionTag::from_desc(desc);
                    if tag.is_none() {
                        debug!(feature = index, desc, "ignoring unknown restriction tag");
                    }
                    tag
                });

            match raw.geometry {
                Some(RawGeometry::LineString { coordinates }) => {
                    features.push(NetworkFeature::new(parse_positions(&coordinates)?, tag));
                }
                Some(RawGeometry::MultiLineString { coordinates }) => {
                    for line in &coordinates {
                        features.push(NetworkFeature::new(parse_positions(line)?, tag));
                    }
                }
                Some(RawGeometry::Other) | None => {
                    skipped += 1;
                    warn!(feature = index, "skipping non-line geometry in network");
                }
            }
        }

        let model = Self::new(features);
        info!(
            features = model.len(),
            segments = model.segment_count(),
            skipped,
            "parsed maritime network"
        );
        Ok(model)
    }
}

fn parse_positions(positions: &[Vec<f64>]) -> Result<Vec<Coordinate>> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => {
                Ok(Coordinate::new(*lon, *lat))
            }
            [lon, lat, ..] => Err(Error::InvalidCoordinate {
                longitude: *lon,
                latitude: *lat,
            }),
            _ => Err(Error::InvalidCoordinate {
                longitude: position.first().copied().unwrap_or(f64::NAN),
                latitude: f64::NAN,
            }),
        })
        .collect()
}

#[derive(Deserialize)]
struct RawFeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<RawProperties>,
}

#[derive(Deserialize)]
struct RawProperties {
    #[serde(rename = "desc_", default)]
    desc: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    LineString {
        coordinates: Vec<Vec<f64>>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_text() {
        let coordinate: Coordinate = " 162.47 , 56.18".parse().expect("valid coordinate");
        assert_eq!(coordinate, Coordinate::new(162.47, 56.18));
        assert!("162.47".parse::<Coordinate>().is_err());
        assert!("east,north".parse::<Coordinate>().is_err());
    }

    #[test]
    fn waypoint_validation_rejects_out_of_range_values() {
        assert!(Coordinate::new(180.0, 90.0).validate_waypoint().is_ok());
        assert!(Coordinate::new(181.0, 0.0).validate_waypoint().is_err());
        assert!(Coordinate::new(0.0, -90.5).validate_waypoint().is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).validate_waypoint().is_err());
    }

    #[test]
    fn coordinate_serializes_as_position_array() {
        let json = serde_json::to_string(&Coordinate::new(1.5, -2.0)).expect("serialize");
        assert_eq!(json, "[1.5,-2.0]");
    }

    #[test]
    fn parses_lines_tags_and_skips_points() {
        let document = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"desc_": "suez"},
                 "geometry": {"type": "LineString", "coordinates": [[32.5, 29.9], [32.3, 31.2]]}},
                {"type": "Feature", "properties": {"desc_": "something"},
                 "geometry": {"type": "MultiLineString",
                              "coordinates": [[[0, 0], [1, 0]], [[1, 0], [2, 0, 5]]]}},
                {"type": "Feature", "properties": null,
                 "geometry": {"type": "Point", "coordinates": [3, 3]}}
            ]
        }"#;

        let model = NetworkModel::from_geojson_str(document).expect("network parses");
        assert_eq!(model.len(), 3);
        assert_eq!(model.features()[0].tag, Some(RestrictionTag::Suez));
        assert_eq!(model.features()[1].tag, None);
        assert_eq!(model.features()[2].coordinates[1], Coordinate::new(2.0, 0.0));
        assert_eq!(model.segment_count(), 3);
    }

    #[test]
    fn short_position_is_an_error() {
        let document = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {},
             "geometry": {"type": "LineString", "coordinates": [[0, 0], [1]]}}
        ]}"#;
        let err = NetworkModel::from_geojson_str(document).expect_err("short position");
        assert!(matches!(err, Error::InvalidCoordinate { .. }));
    }

    #[test]
    fn non_collection_is_rejected() {
        let err = NetworkModel::from_geojson_str(r#"{"type": "Feature", "features": []}"#)
            .expect_err("not a collection");
        assert!(matches!(err, Error::NetworkParse { .. }));
    }
}
