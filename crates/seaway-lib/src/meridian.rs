//! Antimeridian handling for a single start/finish pair.
//!
//! A pair whose longitudes have opposite signs is treated as crossing the
//! ±180° seam. The finish longitude is unwrapped by ±360 so the pair becomes
//! contiguous in the matching shifted graph variant. The check is sign-based,
//! so pairs straddling 0° are also routed through a shifted variant; the
//! shifted graphs hold the same topology, so such routes are still correct.

use serde::Serialize;

use crate::graph::GraphVariant;
use crate::network::Coordinate;

/// Which graph variant to query and with which coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeridianResolution {
    pub query_start: Coordinate,
    pub query_finish: Coordinate,
    pub crossed: bool,
    pub variant: GraphVariant,
}

/// Decide how a start/finish pair is searched.
pub fn resolve(start: Coordinate, finish: Coordinate) -> MeridianResolution {
    let start_east = start.lon >= 0.0;
    let finish_east = finish.lon >= 0.0;

    match (start_east, finish_east) {
        (true, false) => MeridianResolution {
            query_start: start,
            query_finish: finish.with_lon(finish.lon + 360.0),
            crossed: true,
            variant: GraphVariant::PositiveShifted,
        },
        (false, true) => MeridianResolution {
            query_start: start,
            query_finish: finish.with_lon(finish.lon - 360.0),
            crossed: true,
            variant: GraphVariant::NegativeShifted,
        },
        _ => MeridianResolution {
            query_start: start,
            query_finish: finish,
            crossed: false,
            variant: GraphVariant::Main,
        },
    }
}
