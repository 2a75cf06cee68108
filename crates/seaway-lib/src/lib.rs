//! Seaway library entry points.
//!
//! This crate loads a maritime traffic network, materializes it as three
//! longitude-shifted graph variants, and plans sea routes between waypoints
//! that may cross the ±180° antimeridian. Higher-level consumers (the CLI)
//! should only depend on the items exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod assemble;
pub mod distance;
pub mod error;
pub mod graph;
pub mod meridian;
pub mod network;
pub mod output;
pub mod path;
pub mod provider;
pub mod router;
pub mod routing;
pub mod source;
pub mod spatial;

pub use assemble::{assemble_leg, polylines_length_meters};
pub use distance::{haversine_meters, DistanceUnit};
pub use error::{Error, Result};
pub use graph::{
    build_graph, build_graph_set, Edge, Graph, GraphBuildOptions, GraphSet, GraphVariant,
    VertexId, VertexKey,
};
pub use meridian::{resolve, MeridianResolution};
pub use network::{Coordinate, NetworkFeature, NetworkModel, RestrictionTag};
pub use output::{comparison_to_geojson, route_to_geojson};
pub use path::{
    find_route_a_star, find_route_by_key, find_route_dijkstra, CostPolicy, PathResult,
    Restrictions,
};
pub use provider::{
    compare_providers, ProviderComparison, ProviderRoute, RouteProvider, SearouteOracle,
};
pub use router::Router;
pub use routing::{
    plan_route, LegOutcome, MultiRoute, Route, RouteAlgorithm, RouteLeg, RouteRequest,
    RouteStatus,
};
pub use source::{
    default_data_dir, fetch_network, load_network, network_url, resolve_network_path,
    NetworkResolution,
};
pub use spatial::{nearest_vertex, VertexIndex, VertexIndexSet};
