//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use seaway_lib::{
    build_graph_set, load_network, Coordinate, GraphBuildOptions, GraphSet, NetworkModel,
};

/// Path to fixtures directory shared by both crates' tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the small hand-built network used across integration tests.
pub fn mini_network_path() -> PathBuf {
    fixtures_dir().join("mini_network.geojson")
}

pub fn mini_network() -> NetworkModel {
    load_network(&mini_network_path()).expect("mini network fixture loads")
}

#[allow(dead_code)]
pub fn mini_graphs() -> GraphSet {
    build_graph_set(&mini_network(), &GraphBuildOptions::default()).expect("graphs build")
}

#[allow(dead_code)]
pub fn c(lon: f64, lat: f64) -> Coordinate {
    Coordinate::new(lon, lat)
}
