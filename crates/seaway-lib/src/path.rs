use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

use crate::distance::haversine_meters;
use crate::graph::{Edge, Graph, VertexId};
use crate::network::{Coordinate, RestrictionTag};

/// Supplies edge weights and the goal-distance estimate for a search.
///
/// Returning a non-finite cost from [`CostPolicy::edge_cost`] removes the edge
/// from consideration entirely.
pub trait CostPolicy {
    fn edge_cost(&self, edge: &Edge) -> f64;

    /// Lower bound on the remaining cost from `from` to `goal`.
    fn heuristic(&self, from: Coordinate, goal: Coordinate) -> f64 {
        haversine_meters(from, goal)
    }
}

/// Passage restrictions applied during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restrictions {
    /// Skip traffic-separation lanes.
    pub exclude_traffic_lanes: bool,
    pub allow_suez: bool,
    pub allow_panama: bool,
}

impl Default for Restrictions {
    fn default() -> Self {
        Self {
            exclude_traffic_lanes: false,
            allow_suez: true,
            allow_panama: true,
        }
    }
}

impl Restrictions {
    /// Whether an edge carrying `tag` may be traversed.
    pub fn allows(&self, tag: Option<RestrictionTag>) -> bool {
        match tag {
            None => true,
            Some(RestrictionTag::TrafficLane) => !self.exclude_traffic_lanes,
            Some(RestrictionTag::Suez) => self.allow_suez,
            Some(RestrictionTag::Panama) => self.allow_panama,
        }
    }

    /// Restrictions that forbid nothing.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Human-readable list of the passages currently blocked.
    pub fn blocked(&self) -> Vec<&'static str> {
        let mut blocked = Vec::new();
        if self.exclude_traffic_lanes {
            blocked.push("traffic lanes");
        }
        if !self.allow_suez {
            blocked.push("Suez canal");
        }
        if !self.allow_panama {
            blocked.push("Panama canal");
        }
        blocked
    }
}

impl CostPolicy for Restrictions {
    fn edge_cost(&self, edge: &Edge) -> f64 {
        if self.allows(edge.tag) {
            edge.distance
        } else {
            f64::INFINITY
        }
    }
}

/// Wraps a policy and drops its heuristic, turning A* into Dijkstra.
struct WithoutHeuristic<'a, P: ?Sized>(&'a P);

impl<P: CostPolicy + ?Sized> CostPolicy for WithoutHeuristic<'_, P> {
    fn edge_cost(&self, edge: &Edge) -> f64 {
        self.0.edge_cost(edge)
    }

    fn heuristic(&self, _from: Coordinate, _goal: Coordinate) -> f64 {
        0.0
    }
}

/// Vertex sequence and accumulated cost of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub vertices: Vec<VertexId>,
    pub cost: f64,
}

impl PathResult {
    /// Resolve the vertex ids back to (possibly unwrapped) coordinates.
    pub fn coordinates(&self, graph: &Graph) -> Vec<Coordinate> {
        self.vertices
            .iter()
            .filter_map(|&vertex| graph.coordinate(vertex))
            .collect()
    }
}

/// Run A* search using the policy's heuristic.
pub fn find_route_a_star<P: CostPolicy + ?Sized>(
    graph: &Graph,
    start: VertexId,
    goal: VertexId,
    policy: &P,
) -> Option<PathResult> {
    search(graph, start, goal, policy)
}

/// Run Dijkstra's algorithm (A* with a zero heuristic).
pub fn find_route_dijkstra<P: CostPolicy + ?Sized>(
    graph: &Graph,
    start: VertexId,
    goal: VertexId,
    policy: &P,
) -> Option<PathResult> {
    search(graph, start, goal, &WithoutHeuristic(policy))
}

/// A* search addressed by `"lon,lat"` vertex keys.
///
/// Returns `None` when either key is not a vertex of `graph`.
pub fn find_route_by_key<P: CostPolicy + ?Sized>(
    graph: &Graph,
    start: &str,
    goal: &str,
    policy: &P,
) -> Option<PathResult> {
    let start = graph.vertex_id_by_key(start)?;
    let goal = graph.vertex_id_by_key(goal)?;
    find_route_a_star(graph, start, goal, policy)
}

fn search<P: CostPolicy + ?Sized>(
    graph: &Graph,
    start: VertexId,
    goal: VertexId,
    policy: &P,
) -> Option<PathResult> {
    let goal_position = graph.coordinate(goal)?;
    let start_position = graph.coordinate(start)?;

    if start == goal {
        return Some(PathResult {
            vertices: vec![start],
            cost: 0.0,
        });
    }

    let mut g_score: HashMap<VertexId, f64> = HashMap::new();
    let mut parents: HashMap<VertexId, Option<VertexId>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(AStarEntry::new(
        start,
        0.0,
        policy.heuristic(start_position, goal_position),
    ));

    while let Some(entry) = queue.pop() {
        let current_score = match g_score.get(&entry.node) {
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal {
            return Some(PathResult {
                vertices: reconstruct_path(&parents, start, goal),
                cost: current_score,
            });
        }

        for edge in graph.neighbours(entry.node) {
            let cost = policy.edge_cost(edge);
            if !cost.is_finite() {
                continue;
            }

            let next = edge.target;
            let tentative_g = current_score + cost;
            if tentative_g < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                let heuristic = graph
                    .coordinate(next)
                    .map(|position| policy.heuristic(position, goal_position))
                    .unwrap_or(0.0);
                queue.push(AStarEntry::new(next, tentative_g, heuristic));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &HashMap<VertexId, Option<VertexId>>,
    start: VertexId,
    goal: VertexId,
) -> Vec<VertexId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: VertexId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: VertexId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest estimate, then the lowest id.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
