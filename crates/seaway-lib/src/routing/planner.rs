//! Search strategies behind the `RoutePlanner` trait.
//!
//! `plan_route` only ever talks to a `Box<dyn RoutePlanner>`, so adding a new
//! search algorithm means adding a planner here and a variant to
//! [`RouteAlgorithm`].

use crate::graph::{Graph, VertexId};
use crate::path::{find_route_a_star, find_route_dijkstra, PathResult, Restrictions};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route search strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search `graph` between two snapped vertices.
    ///
    /// Returns `Some(path)` if a route is found, `None` otherwise.
    fn find_path(
        &self,
        graph: &Graph,
        start: VertexId,
        goal: VertexId,
        restrictions: &Restrictions,
    ) -> Option<PathResult>;
}

/// Dijkstra's algorithm planner; explores by accumulated distance only.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: VertexId,
        goal: VertexId,
        restrictions: &Restrictions,
    ) -> Option<PathResult> {
        find_route_dijkstra(graph, start, goal, restrictions)
    }
}

/// A* planner guided by great-circle distance to the goal.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: VertexId,
        goal: VertexId,
        restrictions: &Restrictions,
    ) -> Option<PathResult> {
        find_route_a_star(graph, start, goal, restrictions)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
