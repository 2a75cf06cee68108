//! Multi-waypoint route planning over the antimeridian-aware graph set.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (A*, Dijkstra)
//! - [`RouteRequest`] - Waypoints plus restrictions, algorithm and units
//! - [`MultiRoute`] - Combined result with per-leg outcomes
//! - [`plan_route`] - Main entry point for computing routes
//!
//! Each consecutive waypoint pair is planned as an independent leg: the pair is
//! resolved against the seam, snapped to the chosen graph variant, searched and
//! assembled into polylines. A leg that cannot be snapped or has no connecting
//! path is recorded as such and the remaining legs still run.
//!
//! # Example
//!
//! ```no_run
//! use seaway_lib::{build_graph_set, plan_route, Coordinate, GraphBuildOptions, RouteRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let network = seaway_lib::load_network(std::path::Path::new("network-20km.geojson"))?;
//! let graphs = build_graph_set(&network, &GraphBuildOptions::default())?;
//! let request = RouteRequest::new(vec![
//!     Coordinate::new(162.47, 56.18),
//!     Coordinate::new(-134.92, 58.43),
//! ]);
//! let route = plan_route(&graphs, &request)?;
//! println!("{:.0} km", route.total_distance);
//! # Ok(())
//! # }
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::assemble::{assemble_leg, polylines_length_meters};
use crate::distance::DistanceUnit;
use crate::error::{Error, Result};
use crate::graph::{Graph, GraphSet, GraphVariant, VertexId};
use crate::meridian::{resolve, MeridianResolution};
use crate::network::Coordinate;
use crate::path::Restrictions;
use crate::spatial::{nearest_vertex, VertexIndexSet};

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (no heuristic).
    Dijkstra,
    /// A* search guided by great-circle distance.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown routing algorithm '{other}'")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub waypoints: Vec<Coordinate>,
    pub restrictions: Restrictions,
    pub algorithm: RouteAlgorithm,
    pub units: DistanceUnit,
    /// Snap by scanning every vertex instead of querying the R-tree.
    pub linear_snap: bool,
    /// Pre-built vertex indexes. If `None` and `linear_snap` is off, indexes
    /// are built on demand for this request.
    ///
    /// The indexes must come from the same [`GraphSet`] passed to
    /// [`plan_route`]; their vertex ids are meaningless for any other graphs.
    pub spatial_index: Option<Arc<VertexIndexSet>>,
}

impl RouteRequest {
    /// Request with default restrictions, A* and kilometres.
    pub fn new(waypoints: Vec<Coordinate>) -> Self {
        Self {
            waypoints,
            restrictions: Restrictions::default(),
            algorithm: RouteAlgorithm::default(),
            units: DistanceUnit::default(),
            linear_snap: false,
            spatial_index: None,
        }
    }

    pub fn with_restrictions(mut self, restrictions: Restrictions) -> Self {
        self.restrictions = restrictions;
        self
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_units(mut self, units: DistanceUnit) -> Self {
        self.units = units;
        self
    }

    pub fn with_linear_snap(mut self, linear_snap: bool) -> Self {
        self.linear_snap = linear_snap;
        self
    }

    /// Attach pre-built vertex indexes to the request.
    pub fn with_spatial_index(mut self, index: Arc<VertexIndexSet>) -> Self {
        self.spatial_index = Some(index);
        self
    }

    /// Check waypoint count and coordinate ranges without planning.
    pub fn validate(&self) -> Result<()> {
        validate_waypoints(&self.waypoints)
    }
}

/// Geometry and length of one successfully routed leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Polylines in `[-180, 180]`, split at the seam when the leg crosses it.
    pub polylines: Vec<Vec<Coordinate>>,
    /// Length in the request's units, measured on `polylines`.
    pub distance: f64,
    /// Number of graph vertices on the raw search path.
    pub vertex_count: usize,
}

/// What happened to a single leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LegOutcome {
    Routed(Route),
    /// The chosen graph variant has no vertex to snap to.
    SnapFailed,
    /// Both endpoints snapped but no permitted path connects them.
    NoPath,
}

impl LegOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            LegOutcome::Routed(route) => Some(route),
            _ => None,
        }
    }
}

/// One consecutive waypoint pair of a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub index: usize,
    pub from: Coordinate,
    pub to: Coordinate,
    pub variant: GraphVariant,
    pub crossed: bool,
    #[serde(flatten)]
    pub outcome: LegOutcome,
}

/// Whether every leg, some legs or no legs were routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Complete,
    Partial,
    Failed,
}

/// Combined result for a waypoint sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiRoute {
    pub algorithm: RouteAlgorithm,
    pub units: DistanceUnit,
    pub status: RouteStatus,
    /// Sum of the routed legs' distances.
    pub total_distance: f64,
    /// Every routed leg's polylines, in leg order.
    pub polylines: Vec<Vec<Coordinate>>,
    pub legs: Vec<RouteLeg>,
}

impl MultiRoute {
    fn from_legs(algorithm: RouteAlgorithm, units: DistanceUnit, legs: Vec<RouteLeg>) -> Self {
        let routed = legs.iter().filter(|leg| leg.outcome.route().is_some()).count();
        let status = match routed {
            0 => RouteStatus::Failed,
            n if n == legs.len() => RouteStatus::Complete,
            _ => RouteStatus::Partial,
        };
        let total_distance = legs
            .iter()
            .filter_map(|leg| leg.outcome.route())
            .map(|route| route.distance)
            .sum();
        let polylines = legs
            .iter()
            .filter_map(|leg| leg.outcome.route())
            .flat_map(|route| route.polylines.iter().cloned())
            .collect();

        Self {
            algorithm,
            units,
            status,
            total_distance,
            polylines,
            legs,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == RouteStatus::Complete
    }

    /// Legs that produced no geometry.
    pub fn failed_legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.legs
            .iter()
            .filter(|leg| leg.outcome.route().is_none())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn validate_waypoints(waypoints: &[Coordinate]) -> Result<()> {
    if waypoints.len() < 2 {
        return Err(Error::InvalidWaypointCount {
            count: waypoints.len(),
        });
    }
    waypoints.iter().try_for_each(Coordinate::validate_waypoint)
}

/// Snap a query coordinate to a vertex of the resolved variant.
fn snap(
    graph: &Graph,
    index: Option<&VertexIndexSet>,
    variant: GraphVariant,
    target: Coordinate,
) -> Option<VertexId> {
    match index {
        Some(index) => {
            let index = index.get(variant);
            debug_assert_eq!(
                index.len(),
                graph.vertex_count(),
                "vertex index built from a different graph set"
            );
            index.nearest(target)
        }
        None => nearest_vertex(graph.vertices(), target),
    }
}

fn plan_leg(
    graphs: &GraphSet,
    index: Option<&VertexIndexSet>,
    planner: &dyn RoutePlanner,
    request: &RouteRequest,
    leg: usize,
    from: Coordinate,
    to: Coordinate,
) -> RouteLeg {
    let MeridianResolution {
        query_start,
        query_finish,
        crossed,
        variant,
    } = resolve(from, to);
    let graph = graphs.get(variant);
    debug!(leg, variant = %variant, crossed, "resolved leg");

    // A finish on longitude 0 after a western start is unwrapped to -360,
    // outside the west-shifted band; its vertex never moved, so snap it as is.
    let snap_finish = if variant.covers(query_finish.lon) {
        query_finish
    } else {
        variant.transform(to)
    };

    let outcome = match (
        snap(graph, index, variant, query_start),
        snap(graph, index, variant, snap_finish),
    ) {
        (Some(start), Some(goal)) => {
            match planner.find_path(graph, start, goal, &request.restrictions) {
                Some(path) => {
                    let raw = path.coordinates(graph);
                    let polylines = assemble_leg(&raw, crossed);
                    let meters = polylines_length_meters(&polylines);
                    debug!(
                        leg,
                        vertices = path.vertices.len(),
                        polylines = polylines.len(),
                        meters,
                        "routed leg"
                    );
                    LegOutcome::Routed(Route {
                        polylines,
                        distance: request.units.from_meters(meters),
                        vertex_count: path.vertices.len(),
                    })
                }
                None => {
                    warn!(leg, %from, %to, "no permitted path between snapped vertices");
                    LegOutcome::NoPath
                }
            }
        }
        _ => {
            warn!(leg, %from, %to, variant = %variant, "could not snap leg endpoints to network");
            LegOutcome::SnapFailed
        }
    };

    RouteLeg {
        index: leg,
        from,
        to,
        variant,
        crossed,
        outcome,
    }
}

/// Plan a route through every waypoint of `request`, in order.
///
/// Only malformed requests are errors; per-leg failures are reported on the
/// returned [`MultiRoute`].
pub fn plan_route(graphs: &GraphSet, request: &RouteRequest) -> Result<MultiRoute> {
    // Step 1: Reject malformed input before touching the graphs
    request.validate()?;

    // Step 2: Pick the search strategy and the snapping backend
    let planner = select_planner(request);
    let index = if request.linear_snap {
        None
    } else {
        Some(match &request.spatial_index {
            Some(index) => Arc::clone(index),
            None => {
                debug!("no vertex index supplied; building one for this request");
                Arc::new(VertexIndexSet::build(graphs))
            }
        })
    };

    // Step 3: Plan every consecutive pair independently
    let legs: Vec<RouteLeg> = request
        .waypoints
        .windows(2)
        .enumerate()
        .map(|(leg, pair)| {
            plan_leg(
                graphs,
                index.as_deref(),
                planner.as_ref(),
                request,
                leg,
                pair[0],
                pair[1],
            )
        })
        .collect();

    // Step 4: Accumulate geometry and distance
    let route = MultiRoute::from_legs(planner.algorithm(), request.units, legs);
    info!(
        legs = route.legs.len(),
        status = ?route.status,
        distance = route.total_distance,
        units = %route.units,
        "planned route"
    );
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph_set, GraphBuildOptions};
    use crate::network::{NetworkFeature, NetworkModel};

    fn straight_line() -> GraphSet {
        let network = NetworkModel::new(vec![NetworkFeature::new(
            vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(10.0, 0.0),
                Coordinate::new(20.0, 0.0),
            ],
            None,
        )]);
        build_graph_set(&network, &GraphBuildOptions::default()).expect("graphs build")
    }

    #[test]
    fn rejects_single_waypoint() {
        let graphs = straight_line();
        let err = plan_route(&graphs, &RouteRequest::new(vec![Coordinate::new(0.0, 0.0)]))
            .expect_err("one waypoint");
        assert!(matches!(err, Error::InvalidWaypointCount { count: 1 }));
    }

    #[test]
    fn rejects_out_of_range_waypoint() {
        let graphs = straight_line();
        let request =
            RouteRequest::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 95.0)]);
        let err = plan_route(&graphs, &request).expect_err("latitude out of range");
        assert!(matches!(err, Error::InvalidCoordinate { .. }));
    }

    #[test]
    fn straight_line_routes_through_every_vertex() {
        let graphs = straight_line();
        let request =
            RouteRequest::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(20.0, 0.0)]);
        let route = plan_route(&graphs, &request).expect("route plans");

        assert_eq!(route.status, RouteStatus::Complete);
        assert_eq!(route.polylines.len(), 1);
        assert_eq!(route.polylines[0].len(), 3);
        assert!(!route.legs[0].crossed);
        assert!((route.total_distance - 2223.9).abs() < 1.0);
    }

    #[test]
    fn empty_network_reports_snap_failures() {
        let graphs = build_graph_set(&NetworkModel::default(), &GraphBuildOptions::default())
            .expect("empty graphs");
        let request = RouteRequest::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(2.0, 0.0),
        ]);
        let route = plan_route(&graphs, &request).expect("request is well formed");
        assert_eq!(route.status, RouteStatus::Failed);
        assert_eq!(route.failed_legs().count(), 2);
        assert!(route
            .legs
            .iter()
            .all(|leg| leg.outcome == LegOutcome::SnapFailed));
        assert_eq!(route.total_distance, 0.0);
    }

    #[test]
    fn algorithm_parses_from_cli_text() {
        assert_eq!("a-star".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::AStar));
        assert_eq!("Dijkstra".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::Dijkstra));
        assert!("bfs".parse::<RouteAlgorithm>().is_err());
    }

    #[test]
    fn finish_on_the_prime_meridian_snaps_to_its_own_vertex() {
        let network = NetworkModel::new(vec![NetworkFeature::new(
            vec![
                Coordinate::new(-10.0, 0.0),
                Coordinate::new(-5.0, 0.0),
                Coordinate::new(0.0, 0.0),
                Coordinate::new(5.0, 0.0),
            ],
            None,
        )]);
        let graphs = build_graph_set(&network, &GraphBuildOptions::default()).expect("graphs");

        for finish in [0.0, -0.0] {
            let request = RouteRequest::new(vec![
                Coordinate::new(-10.0, 0.0),
                Coordinate::new(finish, 0.0),
            ]);
            let route = plan_route(&graphs, &request).expect("route plans");
            assert_eq!(route.legs[0].variant, GraphVariant::NegativeShifted);
            assert_eq!(
                route.polylines,
                vec![vec![
                    Coordinate::new(-10.0, 0.0),
                    Coordinate::new(-5.0, 0.0),
                    Coordinate::new(0.0, 0.0),
                ]]
            );
        }
    }
}
