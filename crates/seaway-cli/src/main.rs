mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use seaway_cli::output::OutputFormat;
use seaway_cli::terminal::ColorPalette;
use seaway_lib::DistanceUnit;

use commands::compare::{handle_compare_command, CompareArgs};
use commands::info::handle_info_command;
use commands::route::{handle_route_command, RouteArgs};
use commands::NetworkOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Antimeridian-aware sea route planning")]
struct Cli {
    #[command(flatten)]
    network: NetworkOptions,

    /// Distance units for reported lengths (km, nm, mi, m).
    #[arg(long, global = true, default_value = "km")]
    units: DistanceUnit,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route through two or more waypoints.
    Route(RouteArgs),
    /// Plan the same route with seaway and the reference router side by side.
    Compare(CompareArgs),
    /// Summarize the loaded network and its graph variants.
    Info,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let palette = ColorPalette::detect();

    match &cli.command {
        Command::Route(args) => {
            handle_route_command(&cli.network, cli.units, cli.format, &palette, args)
        }
        Command::Compare(args) => {
            handle_compare_command(&cli.network, cli.units, cli.format, &palette, args)
        }
        Command::Info => handle_info_command(&cli.network, cli.format, &palette),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
