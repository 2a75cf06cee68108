//! Route command handler for planning sea routes through waypoints.

use anyhow::Result;
use clap::Args;
use tracing::warn;

use seaway_lib::{
    Coordinate, DistanceUnit, Error as RouteError, LegOutcome, MultiRoute, Restrictions,
    RouteAlgorithm, RouteRequest, RouteStatus, Router,
};

use crate::commands::NetworkOptions;
use seaway_cli::output::OutputFormat;
use seaway_cli::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Waypoint as `LON,LAT`; repeat for each stop (at least two).
    #[arg(long = "waypoint", short = 'w', required = true, allow_hyphen_values = true)]
    pub waypoints: Vec<Coordinate>,

    /// Never use traffic separation lanes.
    #[arg(long)]
    pub exclude_lanes: bool,

    /// Keep the Suez canal closed.
    #[arg(long)]
    pub no_suez: bool,

    /// Keep the Panama canal closed.
    #[arg(long)]
    pub no_panama: bool,

    /// Search algorithm (`a-star` or `dijkstra`).
    #[arg(long, default_value = "a-star")]
    pub algorithm: RouteAlgorithm,

    /// Snap waypoints with a linear scan instead of the spatial index.
    #[arg(long)]
    pub linear_snap: bool,
}

impl RouteArgs {
    pub fn restrictions(&self) -> Restrictions {
        Restrictions {
            exclude_traffic_lanes: self.exclude_lanes,
            allow_suez: !self.no_suez,
            allow_panama: !self.no_panama,
        }
    }

    /// Convert CLI args to a library request wired to `router`'s indexes.
    pub fn to_request(&self, router: &Router, units: DistanceUnit) -> RouteRequest {
        router
            .request(self.waypoints.clone())
            .with_algorithm(self.algorithm)
            .with_restrictions(self.restrictions())
            .with_units(units)
            .with_linear_snap(self.linear_snap)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    network: &NetworkOptions,
    units: DistanceUnit,
    format: OutputFormat,
    palette: &ColorPalette,
    args: &RouteArgs,
) -> Result<()> {
    // Reject bad input before paying for a network load.
    RouteRequest::new(args.waypoints.clone())
        .validate()
        .map_err(handle_route_failure)?;

    let router = network.router()?;
    let route = router
        .plan(args.to_request(&router, units))
        .map_err(handle_route_failure)?;

    match route.status {
        RouteStatus::Failed => {
            return Err(anyhow::anyhow!(format_route_not_found_message(
                &route,
                &args.restrictions()
            )));
        }
        RouteStatus::Partial => {
            let failed: Vec<usize> = route.failed_legs().map(|leg| leg.index + 1).collect();
            warn!(legs = ?failed, "some legs could not be routed");
        }
        RouteStatus::Complete => {}
    }

    println!("{}", format.render_route(&route, palette)?.trim_end());
    Ok(())
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::InvalidWaypointCount { count } => anyhow::anyhow!(
            "A route needs at least two waypoints, got {count}. \
             Pass --waypoint LON,LAT for each stop."
        ),
        other => anyhow::Error::new(other).context("failed to plan route"),
    }
}

fn format_route_not_found_message(route: &MultiRoute, restrictions: &Restrictions) -> String {
    let (first, last) = match (route.legs.first(), route.legs.last()) {
        (Some(first), Some(last)) => (first.from, last.to),
        _ => return "No route found.".to_string(),
    };
    let mut message = format!("No route found between ({first}) and ({last}).");

    let snap_failures = route
        .legs
        .iter()
        .any(|leg| matches!(leg.outcome, LegOutcome::SnapFailed));
    if snap_failures {
        message.push_str(" The network has no vertices to snap the waypoints to.");
        return message;
    }

    let mut tips = Vec::new();
    if restrictions.exclude_traffic_lanes {
        tips.push("allow traffic lanes (omit --exclude-lanes)");
    }
    if !restrictions.allow_suez {
        tips.push("open the Suez canal (omit --no-suez)");
    }
    if !restrictions.allow_panama {
        tips.push("open the Panama canal (omit --no-panama)");
    }
    if tips.is_empty() {
        message.push_str(
            " The waypoints snap to disconnected parts of the network; try a higher resolution.",
        );
    } else {
        message.push_str(&format!(
            " Closed passages: {}. Try to {}.",
            restrictions.blocked().join(", "),
            tips.join(", ")
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use seaway_lib::{NetworkFeature, NetworkModel, RestrictionTag};

    fn canal_router() -> Router {
        let network = NetworkModel::new(vec![NetworkFeature::new(
            vec![Coordinate::new(30.0, 30.0), Coordinate::new(35.0, 30.0)],
            Some(RestrictionTag::Suez),
        )]);
        Router::new(&network).expect("router")
    }

    #[test]
    fn closed_canal_message_names_the_flag() {
        let restrictions = Restrictions {
            allow_suez: false,
            ..Restrictions::default()
        };
        let route = canal_router()
            .route(
                &[Coordinate::new(30.0, 30.0), Coordinate::new(35.0, 30.0)],
                restrictions,
            )
            .expect("plans");
        assert_eq!(route.status, RouteStatus::Failed);

        let message = format_route_not_found_message(&route, &restrictions);
        assert!(message.starts_with("No route found between (30,30) and (35,30)."));
        assert!(message.contains("Closed passages: Suez canal."));
        assert!(message.contains("omit --no-suez"));
    }

    #[test]
    fn waypoint_count_error_is_friendly() {
        let err = handle_route_failure(RouteError::InvalidWaypointCount { count: 1 });
        assert!(err.to_string().contains("at least two waypoints, got 1"));
    }
}
