//! Compare command handler: run the engine and the reference router on the
//! same waypoints.

use anyhow::{Context, Result};
use clap::Args;

use seaway_lib::{compare_providers, DistanceUnit, RouteProvider, SearouteOracle};

use crate::commands::route::RouteArgs;
use crate::commands::NetworkOptions;
use seaway_cli::output::OutputFormat;
use seaway_cli::terminal::ColorPalette;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub route: RouteArgs,

    /// Base URL of the reference routing service.
    #[arg(long, default_value = SearouteOracle::DEFAULT_URL)]
    pub oracle_url: String,
}

pub fn handle_compare_command(
    network: &NetworkOptions,
    units: DistanceUnit,
    format: OutputFormat,
    palette: &ColorPalette,
    args: &CompareArgs,
) -> Result<()> {
    let router = network.router()?.with_algorithm(args.route.algorithm);
    let oracle = SearouteOracle::new(args.oracle_url.clone(), network.resolution)
        .context("failed to create the reference router client")?;

    let providers: [&dyn RouteProvider; 2] = [&router, &oracle];
    let results = compare_providers(
        &providers,
        &args.route.waypoints,
        &args.route.restrictions(),
        units,
    );

    println!("{}", format.render_comparison(&results, palette)?.trim_end());
    Ok(())
}
