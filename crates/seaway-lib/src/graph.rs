use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::distance::haversine_meters;
use crate::error::{Error, Result};
use crate::network::{Coordinate, NetworkModel, RestrictionTag};

/// Dense vertex identifier, assigned in first-seen order during a build.
pub type VertexId = usize;

/// Longitude encodings the network is materialized in.
///
/// The shifted variants exist so a route crossing the antimeridian can be
/// searched as a contiguous path in planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GraphVariant {
    /// Untransformed coordinates.
    #[default]
    Main,
    /// Negative longitudes moved into `[180, 360)`.
    PositiveShifted,
    /// Positive longitudes moved into `(-360, -180]`.
    NegativeShifted,
}

impl GraphVariant {
    pub const ALL: [GraphVariant; 3] = [
        GraphVariant::Main,
        GraphVariant::PositiveShifted,
        GraphVariant::NegativeShifted,
    ];

    /// Apply this variant's longitude shift to a coordinate.
    pub fn transform(self, coordinate: Coordinate) -> Coordinate {
        match self {
            GraphVariant::Main => coordinate,
            GraphVariant::PositiveShifted if coordinate.lon < 0.0 => {
                coordinate.with_lon(coordinate.lon + 360.0)
            }
            GraphVariant::NegativeShifted if coordinate.lon > 0.0 => {
                coordinate.with_lon(coordinate.lon - 360.0)
            }
            _ => coordinate,
        }
    }

    /// Whether a longitude lies in the band this variant's vertices occupy:
    /// `[-180, 180]` for Main, `[0, 360)` when shifted east and `(-360, 0]`
    /// when shifted west.
    pub fn covers(self, lon: f64) -> bool {
        match self {
            GraphVariant::Main => (-180.0..=180.0).contains(&lon),
            GraphVariant::PositiveShifted => (0.0..360.0).contains(&lon),
            GraphVariant::NegativeShifted => lon > -360.0 && lon <= 0.0,
        }
    }
}

impl fmt::Display for GraphVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            GraphVariant::Main => "main",
            GraphVariant::PositiveShifted => "positive-shifted",
            GraphVariant::NegativeShifted => "negative-shifted",
        };
        f.write_str(value)
    }
}

/// Canonical identity of a vertex: its exact coordinate.
///
/// Equality and hashing use the bit pattern of each component after folding
/// `-0.0` into `0.0`, so two coordinates are the same vertex exactly when they
/// are numerically equal. The textual form is `"lon,lat"` using Rust's shortest
/// round-trip float formatting.
#[derive(Debug, Clone, Copy)]
pub struct VertexKey {
    lon: f64,
    lat: f64,
}

impl VertexKey {
    pub fn new(coordinate: Coordinate) -> Self {
        // Adding positive zero turns -0.0 into 0.0 and leaves everything else alone.
        Self {
            lon: coordinate.lon + 0.0,
            lat: coordinate.lat + 0.0,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }
}

impl PartialEq for VertexKey {
    fn eq(&self, other: &Self) -> bool {
        self.lon.to_bits() == other.lon.to_bits() && self.lat.to_bits() == other.lat.to_bits()
    }
}

impl Eq for VertexKey {}

impl Hash for VertexKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lon.to_bits().hash(state);
        self.lat.to_bits().hash(state);
    }
}

impl From<Coordinate> for VertexKey {
    fn from(value: Coordinate) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

impl FromStr for VertexKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Coordinate>().map(Self::new)
    }
}

/// Directed half of an undirected network segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: VertexId,
    pub tag: Option<RestrictionTag>,
    /// Great-circle length in metres.
    pub distance: f64,
}

/// Options controlling graph construction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraphBuildOptions {
    /// Snap coordinates to multiples of this many degrees before keying.
    pub precision: Option<f64>,
}

impl GraphBuildOptions {
    pub fn with_precision(precision: f64) -> Self {
        Self {
            precision: Some(precision),
        }
    }

    fn validate(&self) -> Result<()> {
        match self.precision {
            Some(p) if !(p.is_finite() && p > 0.0) => Err(Error::InvalidPrecision { precision: p }),
            _ => Ok(()),
        }
    }

    fn apply(&self, coordinate: Coordinate) -> Coordinate {
        match self.precision {
            Some(p) => Coordinate::new(
                round_half_up(coordinate.lon, p),
                round_half_up(coordinate.lat, p),
            ),
            None => coordinate,
        }
    }
}

fn round_half_up(value: f64, precision: f64) -> f64 {
    (value / precision + 0.5).floor() * precision
}

/// A single graph variant: vertices, their key lookup, and adjacency lists.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    variant: GraphVariant,
    vertices: Vec<Coordinate>,
    lookup: HashMap<VertexKey, VertexId>,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn variant(&self) -> GraphVariant {
        self.variant
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges (twice the number of segments).
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex coordinates indexed by [`VertexId`].
    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn coordinate(&self, vertex: VertexId) -> Option<Coordinate> {
        self.vertices.get(vertex).copied()
    }

    pub fn vertex_id(&self, key: &VertexKey) -> Option<VertexId> {
        self.lookup.get(key).copied()
    }

    /// Look up a vertex by its `"lon,lat"` key text.
    pub fn vertex_id_by_key(&self, key: &str) -> Option<VertexId> {
        let key: VertexKey = key.parse().ok()?;
        self.vertex_id(&key)
    }

    /// Return the outgoing edges for a vertex.
    pub fn neighbours(&self, vertex: VertexId) -> &[Edge] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn insert_vertex(&mut self, coordinate: Coordinate) -> VertexId {
        let key = VertexKey::new(coordinate);
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let id = self.vertices.len();
        self.vertices.push(key.coordinate());
        self.adjacency.push(Vec::new());
        self.lookup.insert(key, id);
        id
    }

    fn insert_segment(&mut self, from: VertexId, to: VertexId, tag: Option<RestrictionTag>) {
        let distance = haversine_meters(self.vertices[from], self.vertices[to]);
        self.adjacency[from].push(Edge {
            target: to,
            tag,
            distance,
        });
        self.adjacency[to].push(Edge {
            target: from,
            tag,
            distance,
        });
    }
}

/// Build a single graph variant from the network.
pub fn build_graph(
    network: &NetworkModel,
    variant: GraphVariant,
    options: &GraphBuildOptions,
) -> Result<Graph> {
    options.validate()?;

    let mut graph = Graph {
        variant,
        ..Graph::default()
    };

    for feature in network.features() {
        let mut previous: Option<VertexId> = None;
        for &coordinate in &feature.coordinates {
            let current = graph.insert_vertex(options.apply(variant.transform(coordinate)));
            if let Some(previous) = previous {
                graph.insert_segment(previous, current, feature.tag);
            }
            previous = Some(current);
        }
    }

    info!(
        variant = %variant,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "built routing graph"
    );
    Ok(graph)
}

/// The three graph variants derived from one network load.
#[derive(Debug, Clone, Default)]
pub struct GraphSet {
    main: Graph,
    positive: Graph,
    negative: Graph,
}

impl GraphSet {
    pub fn get(&self, variant: GraphVariant) -> &Graph {
        match variant {
            GraphVariant::Main => &self.main,
            GraphVariant::PositiveShifted => &self.positive,
            GraphVariant::NegativeShifted => &self.negative,
        }
    }

    pub fn main(&self) -> &Graph {
        &self.main
    }

    pub fn iter(&self) -> impl Iterator<Item = &Graph> {
        [&self.main, &self.positive, &self.negative].into_iter()
    }
}

/// Build all three variants in parallel.
///
/// An empty network is not an error: the result holds three empty graphs and
/// every subsequent snap will fail.
pub fn build_graph_set(network: &NetworkModel, options: &GraphBuildOptions) -> Result<GraphSet> {
    options.validate()?;
    if network.is_empty() {
        warn!("network has no features; routing graphs will be empty");
    }

    let (main, (positive, negative)) = rayon::join(
        || build_graph(network, GraphVariant::Main, options),
        || {
            rayon::join(
                || build_graph(network, GraphVariant::PositiveShifted, options),
                || build_graph(network, GraphVariant::NegativeShifted, options),
            )
        },
    );

    Ok(GraphSet {
        main: main?,
        positive: positive?,
        negative: negative?,
    })
}
