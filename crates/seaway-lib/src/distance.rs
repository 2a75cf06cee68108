//! Great-circle distance helpers and reporting units.

use std::fmt;
use std::str::FromStr;

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::network::Coordinate;

const METERS_PER_KILOMETER: f64 = 1_000.0;
const METERS_PER_NAUTICAL_MILE: f64 = 1_852.0;
const METERS_PER_STATUTE_MILE: f64 = 1_609.344;

/// Units used when reporting route distances.
///
/// Internally all edge weights are kept in metres; conversion only happens when
/// a leg or route distance is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    NauticalMiles,
    Miles,
    Meters,
}

impl DistanceUnit {
    /// Convert a distance in metres into this unit.
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => meters / METERS_PER_KILOMETER,
            DistanceUnit::NauticalMiles => meters / METERS_PER_NAUTICAL_MILE,
            DistanceUnit::Miles => meters / METERS_PER_STATUTE_MILE,
            DistanceUnit::Meters => meters,
        }
    }

    /// Short suffix used in textual output.
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::NauticalMiles => "nm",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Meters => "m",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            DistanceUnit::Kilometers => "kilometers",
            DistanceUnit::NauticalMiles => "nautical-miles",
            DistanceUnit::Miles => "miles",
            DistanceUnit::Meters => "meters",
        };
        f.write_str(value)
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
            "nm" | "nmi" | "nautical-miles" | "nauticalmiles" => Ok(DistanceUnit::NauticalMiles),
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            "m" | "meters" | "metres" => Ok(DistanceUnit::Meters),
            other => Err(format!("unknown distance unit '{other}'")),
        }
    }
}

/// Great-circle distance between two coordinates in metres.
///
/// Unwrapped longitudes are fine here: the haversine formula only sees the
/// longitude difference through a periodic function, so `181` and `-179`
/// measure identically.
pub fn haversine_meters(from: Coordinate, to: Coordinate) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to))
}

/// Sum of great-circle segment lengths along a polyline, in metres.
pub fn polyline_length_meters(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_meters(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_degree_on_equator_is_about_111km() {
        let meters = haversine_meters(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert_relative_eq!(
            DistanceUnit::Kilometers.from_meters(meters),
            111.195,
            epsilon = 0.01
        );
    }

    #[test]
    fn unwrapped_longitudes_measure_like_wrapped_ones() {
        let start = Coordinate::new(179.0, 10.0);
        let wrapped = haversine_meters(start, Coordinate::new(-179.0, 10.0));
        let unwrapped = haversine_meters(start, Coordinate::new(181.0, 10.0));
        assert_relative_eq!(wrapped, unwrapped, epsilon = 1e-6);
    }

    #[test]
    fn parses_unit_aliases() {
        assert_eq!("nm".parse::<DistanceUnit>(), Ok(DistanceUnit::NauticalMiles));
        assert_eq!("Kilometers".parse::<DistanceUnit>(), Ok(DistanceUnit::Kilometers));
        assert!("furlongs".parse::<DistanceUnit>().is_err());
    }
}
