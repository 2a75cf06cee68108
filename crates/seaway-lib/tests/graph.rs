mod common;

use seaway_lib::{
    build_graph, build_graph_set, GraphBuildOptions, GraphVariant, NetworkFeature, NetworkModel,
    RestrictionTag, VertexKey,
};

use common::{c, mini_graphs, mini_network};

#[test]
fn fixture_parses_expected_features() {
    let network = mini_network();
    // The Point feature is skipped and the MultiLineString contributes two lines.
    assert_eq!(network.len(), 13);
    assert_eq!(network.segment_count(), 26);
    assert_eq!(network.tagged_count(RestrictionTag::Suez), 1);
    assert_eq!(network.tagged_count(RestrictionTag::Panama), 1);
    assert_eq!(network.tagged_count(RestrictionTag::TrafficLane), 1);
}

#[test]
fn every_variant_has_two_edges_per_segment() {
    let network = mini_network();
    let graphs = mini_graphs();
    for graph in graphs.iter() {
        assert_eq!(
            graph.edge_count(),
            2 * network.segment_count(),
            "{} variant edge count",
            graph.variant()
        );
    }
}

#[test]
fn shifted_variants_join_lines_that_meet_on_the_seam() {
    let graphs = mini_graphs();
    assert_eq!(graphs.get(GraphVariant::Main).vertex_count(), 31);
    assert_eq!(graphs.get(GraphVariant::PositiveShifted).vertex_count(), 29);
    assert_eq!(graphs.get(GraphVariant::NegativeShifted).vertex_count(), 29);

    let positive = graphs.get(GraphVariant::PositiveShifted);
    let seam = positive.vertex_id_by_key("180,50").expect("seam vertex");
    assert_eq!(positive.neighbours(seam).len(), 2);
    assert!(positive.vertex_id_by_key("-180,50").is_none());

    let negative = graphs.get(GraphVariant::NegativeShifted);
    assert!(negative.vertex_id_by_key("-180,50").is_some());
    assert!(negative.vertex_id_by_key("-200,50").is_some());
}

#[test]
fn variants_match_when_nothing_wraps() {
    let network = NetworkModel::new(vec![NetworkFeature::new(
        vec![c(-10.0, 5.0), c(0.0, 5.0), c(10.0, 5.0)],
        None,
    )]);
    let graphs = build_graph_set(&network, &GraphBuildOptions::default()).expect("graphs build");
    let counts: Vec<(usize, usize)> = graphs
        .iter()
        .map(|graph| (graph.vertex_count(), graph.edge_count()))
        .collect();
    assert_eq!(counts, vec![(3, 4), (3, 4), (3, 4)]);
}

#[test]
fn vertex_ids_follow_first_seen_order() {
    let network = mini_network();
    let graph = build_graph(&network, GraphVariant::Main, &GraphBuildOptions::default())
        .expect("graph builds");
    assert_eq!(graph.vertex_id(&VertexKey::new(c(0.0, 0.0))), Some(0));
    assert_eq!(graph.vertex_id(&VertexKey::new(c(20.0, 0.0))), Some(2));
    assert_eq!(graph.vertex_id(&VertexKey::new(c(30.0, 30.0))), Some(3));

    let rebuilt = build_graph(&network, GraphVariant::Main, &GraphBuildOptions::default())
        .expect("graph builds");
    assert_eq!(graph.vertices(), rebuilt.vertices());
}

#[test]
fn edges_carry_feature_tags_in_both_directions() {
    let graph = mini_graphs();
    let main = graph.get(GraphVariant::Main);
    let from = main.vertex_id_by_key("-80,10").expect("panama entrance");
    let to = main.vertex_id_by_key("-77.5,10").expect("panama midpoint");

    let forward = main
        .neighbours(from)
        .iter()
        .find(|edge| edge.target == to)
        .expect("forward edge");
    let backward = main
        .neighbours(to)
        .iter()
        .find(|edge| edge.target == from)
        .expect("backward edge");
    assert_eq!(forward.tag, Some(RestrictionTag::Panama));
    assert_eq!(backward.tag, Some(RestrictionTag::Panama));
    assert_eq!(forward.distance, backward.distance);
}
