use std::sync::Arc;

use tracing::info;

use crate::distance::DistanceUnit;
use crate::error::Result;
use crate::graph::{build_graph_set, GraphBuildOptions, GraphSet};
use crate::network::{Coordinate, NetworkModel};
use crate::path::Restrictions;
use crate::provider::{ProviderRoute, RouteProvider};
use crate::routing::{plan_route, MultiRoute, RouteAlgorithm, RouteRequest};
use crate::spatial::VertexIndexSet;

/// Session-level routing handle.
///
/// Holds the three graph variants and their vertex indexes, built once from a
/// network and shared read-only between requests (and threads).
#[derive(Debug, Clone)]
pub struct Router {
    graphs: Arc<GraphSet>,
    index: Arc<VertexIndexSet>,
    algorithm: RouteAlgorithm,
}

impl Router {
    pub fn new(network: &NetworkModel) -> Result<Self> {
        Self::with_options(network, &GraphBuildOptions::default())
    }

    pub fn with_options(network: &NetworkModel, options: &GraphBuildOptions) -> Result<Self> {
        let graphs = build_graph_set(network, options)?;
        Ok(Self::from_graphs(Arc::new(graphs)))
    }

    pub fn from_graphs(graphs: Arc<GraphSet>) -> Self {
        let index = Arc::new(VertexIndexSet::build(&graphs));
        info!(
            vertices = graphs.main().vertex_count(),
            edges = graphs.main().edge_count(),
            "router ready"
        );
        Self {
            graphs,
            index,
            algorithm: RouteAlgorithm::default(),
        }
    }

    /// Use a different search algorithm for requests created by this router.
    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn graphs(&self) -> &Arc<GraphSet> {
        &self.graphs
    }

    /// Start a request pre-wired with this router's indexes and algorithm.
    pub fn request(&self, waypoints: Vec<Coordinate>) -> RouteRequest {
        RouteRequest::new(waypoints)
            .with_algorithm(self.algorithm)
            .with_spatial_index(Arc::clone(&self.index))
    }

    /// Route through `waypoints` with default units.
    pub fn route(
        &self,
        waypoints: &[Coordinate],
        restrictions: Restrictions,
    ) -> Result<MultiRoute> {
        let request = self.request(waypoints.to_vec()).with_restrictions(restrictions);
        plan_route(&self.graphs, &request)
    }

    /// Plan an arbitrary request, attaching this router's indexes if it has none.
    pub fn plan(&self, mut request: RouteRequest) -> Result<MultiRoute> {
        if request.spatial_index.is_none() {
            request.spatial_index = Some(Arc::clone(&self.index));
        }
        plan_route(&self.graphs, &request)
    }
}

impl RouteProvider for Router {
    fn name(&self) -> &str {
        "seaway"
    }

    fn route(
        &self,
        waypoints: &[Coordinate],
        restrictions: &Restrictions,
        units: DistanceUnit,
    ) -> Result<ProviderRoute> {
        let request = self
            .request(waypoints.to_vec())
            .with_restrictions(*restrictions)
            .with_units(units);
        let route = plan_route(&self.graphs, &request)?;
        Ok(ProviderRoute {
            provider: RouteProvider::name(self).to_string(),
            units,
            distance: route.total_distance,
            failed_legs: route.failed_legs().map(|leg| leg.index).collect(),
            polylines: route.polylines,
        })
    }
}
