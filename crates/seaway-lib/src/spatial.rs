//! Nearest-vertex snapping for arbitrary coordinates.
//!
//! Snapping measures squared Euclidean distance in `(lon, lat)` degree space
//! against one graph variant's vertices. Two implementations are provided:
//!
//! - [`nearest_vertex`]: a linear scan over the vertex list, used as the
//!   reference behaviour.
//! - [`VertexIndex`]: an R-tree (`rstar`) built once per variant.
//!
//! Both resolve ties the same way: among vertices at the minimum distance, the
//! one inserted first (lowest [`VertexId`]) wins.

use rstar::primitives::GeomWithData;
use rstar::RTree;
use tracing::{debug, info};

use crate::graph::{Graph, GraphSet, GraphVariant, VertexId};
use crate::network::Coordinate;

type IndexedVertex = GeomWithData<[f64; 2], VertexId>;

/// Relative slack added to the nearest distance when collecting tie
/// candidates, so rounding differences between the tree's metric and ours
/// cannot hide an equally near vertex.
const TIE_SLACK: f64 = 1e-9;

/// Scan every vertex and return the first one at minimum distance.
pub fn nearest_vertex(vertices: &[Coordinate], target: Coordinate) -> Option<VertexId> {
    let mut best: Option<(VertexId, f64)> = None;
    for (id, vertex) in vertices.iter().enumerate() {
        let distance = vertex.planar_distance_squared(&target);
        match best {
            Some((_, current)) if distance >= current => {}
            _ => best = Some((id, distance)),
        }
    }
    best.map(|(id, _)| id)
}

/// R-tree over one graph variant's vertices.
#[derive(Debug, Clone)]
pub struct VertexIndex {
    variant: GraphVariant,
    vertices: Vec<Coordinate>,
    tree: RTree<IndexedVertex>,
}

impl VertexIndex {
    /// Bulk-load an index from a graph's vertex list.
    pub fn build(graph: &Graph) -> Self {
        let vertices = graph.vertices().to_vec();
        let entries = vertices
            .iter()
            .enumerate()
            .map(|(id, vertex)| GeomWithData::new([vertex.lon, vertex.lat], id))
            .collect();
        let tree = RTree::bulk_load(entries);

        debug!(
            variant = %graph.variant(),
            vertices = vertices.len(),
            "built vertex index"
        );

        Self {
            variant: graph.variant(),
            vertices,
            tree,
        }
    }

    pub fn variant(&self) -> GraphVariant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Nearest vertex to `target`, or `None` when the variant has no vertices.
    pub fn nearest(&self, target: Coordinate) -> Option<VertexId> {
        let point = [target.lon, target.lat];
        let first = self.tree.nearest_neighbor(&point)?;
        let radius = self.vertices[first.data].planar_distance_squared(&target);
        let search_radius = radius * (1.0 + TIE_SLACK) + f64::MIN_POSITIVE;

        self.tree
            .locate_within_distance(point, search_radius)
            .map(|candidate| {
                let distance = self.vertices[candidate.data].planar_distance_squared(&target);
                (candidate.data, distance)
            })
            .min_by(|(a_id, a_dist), (b_id, b_dist)| {
                a_dist.total_cmp(b_dist).then_with(|| a_id.cmp(b_id))
            })
            .map(|(id, _)| id)
    }
}

/// One [`VertexIndex`] per graph variant.
#[derive(Debug, Clone)]
pub struct VertexIndexSet {
    main: VertexIndex,
    positive: VertexIndex,
    negative: VertexIndex,
}

impl VertexIndexSet {
    pub fn build(graphs: &GraphSet) -> Self {
        let set = Self {
            main: VertexIndex::build(graphs.get(GraphVariant::Main)),
            positive: VertexIndex::build(graphs.get(GraphVariant::PositiveShifted)),
            negative: VertexIndex::build(graphs.get(GraphVariant::NegativeShifted)),
        };
        info!(vertices = set.main.len(), "built vertex indexes for all variants");
        set
    }

    pub fn get(&self, variant: GraphVariant) -> &VertexIndex {
        match variant {
            GraphVariant::Main => &self.main,
            GraphVariant::PositiveShifted => &self.positive,
            GraphVariant::NegativeShifted => &self.negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, GraphBuildOptions};
    use crate::network::{NetworkFeature, NetworkModel};

    fn grid_graph() -> Graph {
        let mut features = Vec::new();
        for row in 0..5 {
            let coordinates = (0..5)
                .map(|col| Coordinate::new(col as f64, row as f64))
                .collect();
            features.push(NetworkFeature::new(coordinates, None));
        }
        build_graph(
            &NetworkModel::new(features),
            GraphVariant::Main,
            &GraphBuildOptions::default(),
        )
        .expect("grid builds")
    }

    #[test]
    fn linear_scan_prefers_first_minimum() {
        let vertices = [
            Coordinate::new(1.0, 0.0),
            Coordinate::new(-1.0, 0.0),
            Coordinate::new(0.0, 1.0),
        ];
        assert_eq!(nearest_vertex(&vertices, Coordinate::new(0.0, 0.0)), Some(0));
        assert_eq!(nearest_vertex(&[], Coordinate::new(0.0, 0.0)), None);
    }

    #[test]
    fn index_matches_linear_scan_including_ties() {
        let graph = grid_graph();
        let index = VertexIndex::build(&graph);

        let probes = [
            Coordinate::new(0.5, 0.5),
            Coordinate::new(2.5, 3.0),
            Coordinate::new(-3.0, 10.0),
            Coordinate::new(1.2, 3.9),
            Coordinate::new(4.0, 4.0),
        ];
        for probe in probes {
            assert_eq!(
                index.nearest(probe),
                nearest_vertex(graph.vertices(), probe),
                "probe {probe}"
            );
        }
    }

    #[test]
    fn empty_index_returns_none() {
        let index = VertexIndex::build(&Graph::default());
        assert!(index.is_empty());
        assert_eq!(index.nearest(Coordinate::new(0.0, 0.0)), None);
    }
}
