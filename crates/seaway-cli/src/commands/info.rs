//! Info command handler: summarize the network and its graph variants.

use anyhow::{Context, Result};

use seaway_lib::{build_graph_set, RestrictionTag};

use crate::commands::NetworkOptions;
use seaway_cli::output::{NetworkInfo, OutputFormat, VariantInfo};
use seaway_cli::terminal::ColorPalette;

pub fn handle_info_command(
    network: &NetworkOptions,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let source = network.source()?;
    let model = network.load()?;
    let graphs = build_graph_set(&model, &network.graph_options())
        .context("failed to build graphs from the network")?;

    let info = NetworkInfo {
        source,
        features: model.len(),
        segments: model.segment_count(),
        traffic_lanes: model.tagged_count(RestrictionTag::TrafficLane),
        suez: model.tagged_count(RestrictionTag::Suez),
        panama: model.tagged_count(RestrictionTag::Panama),
        variants: graphs
            .iter()
            .map(|graph| VariantInfo {
                variant: graph.variant().to_string(),
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
            })
            .collect(),
    };

    println!("{}", format.render_info(&info, palette)?.trim_end());
    Ok(())
}
