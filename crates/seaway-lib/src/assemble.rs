//! Turns raw search paths into polylines that are valid in `[-180, 180]`.
//!
//! A path found in a shifted graph variant may wander onto the neighbouring
//! "sheet" of longitudes (`>= 180` or `<= -180`). Each point is re-wrapped onto
//! the primary sheet and, wherever consecutive points sit on different sheets,
//! the polyline is closed on the seam and a new one is opened on the other side
//! so renderers never draw a segment across the whole map.

use crate::distance::polyline_length_meters;
use crate::network::Coordinate;

/// Which 360° band an unwrapped longitude lies in.
fn sheet(lon: f64) -> i32 {
    if lon >= 180.0 {
        1
    } else if lon <= -180.0 {
        -1
    } else {
        0
    }
}

fn rewrap(point: Coordinate, sheet: i32) -> Coordinate {
    point.with_lon(point.lon - 360.0 * f64::from(sheet))
}

/// Split a raw vertex path into renderable polylines.
///
/// When `crossed` is false the path is returned untouched as one polyline.
/// Otherwise seam vertices are synthesized at the latitude of the first point
/// past each sheet change, and skipped when they would duplicate that point or
/// the point before it.
///
/// Every returned polyline has at least two points unless the whole path is a
/// single vertex.
///
/// A sheet change whose unwrapped step spans more than 180° of longitude is the
/// short hop over the prime meridian seen from a shifted variant; once both
/// points are re-wrapped they are adjacent, so the polyline is not split there.
pub fn assemble_leg(raw: &[Coordinate], crossed: bool) -> Vec<Vec<Coordinate>> {
    if raw.is_empty() {
        return Vec::new();
    }
    if !crossed {
        return vec![raw.to_vec()];
    }

    let mut polylines = Vec::new();
    let mut previous_sheet = sheet(raw[0].lon);
    let mut current = vec![rewrap(raw[0], previous_sheet)];

    for pair in raw.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let next_sheet = sheet(to.lon);
        let wrapped = rewrap(to, next_sheet);

        if next_sheet != previous_sheet && (to.lon - from.lon).abs() <= 180.0 {
            let seam = 180.0 + 360.0 * f64::from(previous_sheet.min(next_sheet));
            let closing = Coordinate::new(seam - 360.0 * f64::from(previous_sheet), to.lat);
            let opening = Coordinate::new(seam - 360.0 * f64::from(next_sheet), to.lat);

            if current.last() != Some(&closing) {
                current.push(closing);
            }
            polylines.push(std::mem::take(&mut current));
            if wrapped != opening {
                current.push(opening);
            }
        }

        current.push(wrapped);
        previous_sheet = next_sheet;
    }

    polylines.push(current);

    // A path that starts or ends on a seam vertex leaves that vertex alone on
    // the far side of the split; it carries no length and cannot be drawn.
    if polylines.len() > 1 {
        polylines.retain(|line| line.len() >= 2);
    }
    polylines
}

/// Great-circle length of a set of polylines in metres.
///
/// Seam vertices on either side of a split describe the same place, so the
/// gap between polylines contributes nothing.
pub fn polylines_length_meters(polylines: &[Vec<Coordinate>]) -> f64 {
    polylines
        .iter()
        .map(|line| polyline_length_meters(line))
        .sum()
}
