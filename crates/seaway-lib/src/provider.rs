//! Route providers and side-by-side comparison.
//!
//! The engine ([`crate::Router`]) and the external reference router
//! ([`SearouteOracle`]) both implement [`RouteProvider`], so a caller can run
//! them in parallel against the same waypoints and compare the results. The
//! oracle is only ever consulted for comparison and has no influence on the
//! engine.

use std::time::Instant;

use rayon::prelude::*;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assemble::polylines_length_meters;
use crate::distance::DistanceUnit;
use crate::error::{Error, Result};
use crate::network::Coordinate;
use crate::path::Restrictions;
use crate::source::{build_client, NetworkResolution};

/// Geometry returned by a provider for a whole waypoint sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRoute {
    pub provider: String,
    pub units: DistanceUnit,
    pub polylines: Vec<Vec<Coordinate>>,
    pub distance: f64,
    /// Indexes of legs that produced no geometry.
    pub failed_legs: Vec<usize>,
}

/// Anything that can turn waypoints into a route.
pub trait RouteProvider: Send + Sync {
    /// Short label used in comparison output.
    fn name(&self) -> &str;

    fn route(
        &self,
        waypoints: &[Coordinate],
        restrictions: &Restrictions,
        units: DistanceUnit,
    ) -> Result<ProviderRoute>;
}

/// HTTP client for the searoute-style reference router.
#[derive(Debug, Clone)]
pub struct SearouteOracle {
    base_url: String,
    resolution: NetworkResolution,
    client: Client,
}

impl SearouteOracle {
    pub const DEFAULT_URL: &'static str = "http://localhost:3123";

    pub fn new(base_url: impl Into<String>, resolution: NetworkResolution) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resolution,
            client: build_client()?,
        })
    }

    /// Query string for a single leg.
    ///
    /// The service's `nonIRTC` flag means "lanes allowed", the inverse of
    /// [`Restrictions::exclude_traffic_lanes`].
    pub fn leg_url(&self, from: Coordinate, to: Coordinate, restrictions: &Restrictions) -> String {
        format!(
            "{base}/?res={res}&suez={suez}&panama={panama}&nonIRTC={lanes}&opos={from}&dpos={to}",
            base = self.base_url,
            res = self.resolution.kilometers(),
            suez = u8::from(restrictions.allow_suez),
            panama = u8::from(restrictions.allow_panama),
            lanes = u8::from(!restrictions.exclude_traffic_lanes),
        )
    }

    fn fetch_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
        restrictions: &Restrictions,
    ) -> Result<Vec<Vec<Coordinate>>> {
        let url = self.leg_url(from, to, restrictions);
        debug!(url = %url, "querying comparison oracle");
        let body = self.client.get(&url).send()?.error_for_status()?.text()?;
        parse_oracle_response(&body)
    }
}

impl RouteProvider for SearouteOracle {
    fn name(&self) -> &str {
        "oracle"
    }

    fn route(
        &self,
        waypoints: &[Coordinate],
        restrictions: &Restrictions,
        units: DistanceUnit,
    ) -> Result<ProviderRoute> {
        if waypoints.len() < 2 {
            return Err(Error::InvalidWaypointCount {
                count: waypoints.len(),
            });
        }

        let mut polylines = Vec::new();
        let mut failed_legs = Vec::new();
        for (leg, pair) in waypoints.windows(2).enumerate() {
            match self.fetch_leg(pair[0], pair[1], restrictions) {
                Ok(lines) => polylines.extend(lines),
                Err(Error::OracleFailure { message }) => {
                    warn!(leg, reason = %message, "oracle could not route leg");
                    failed_legs.push(leg);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(ProviderRoute {
            provider: self.name().to_string(),
            units,
            distance: units.from_meters(polylines_length_meters(&polylines)),
            polylines,
            failed_legs,
        })
    }
}

#[derive(Deserialize)]
struct OracleResponse {
    status: String,
    geom: Option<OracleGeometry>,
}

#[derive(Deserialize)]
struct OracleGeometry {
    coordinates: OracleCoordinates,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OracleCoordinates {
    Multi(Vec<Vec<Coordinate>>),
    Single(Vec<Coordinate>),
}

/// Parse one leg's response body into polylines.
pub fn parse_oracle_response(body: &str) -> Result<Vec<Vec<Coordinate>>> {
    let response: OracleResponse = serde_json::from_str(body)?;
    if response.status != "ok" {
        return Err(Error::OracleFailure {
            message: format!("status '{}'", response.status),
        });
    }
    let geometry = response.geom.ok_or_else(|| Error::OracleFailure {
        message: "response has no geometry".to_string(),
    })?;
    Ok(match geometry.coordinates {
        OracleCoordinates::Multi(lines) => lines,
        OracleCoordinates::Single(line) => vec![line],
    })
}

/// Result of one provider in a comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderComparison {
    pub provider: String,
    pub route: Option<ProviderRoute>,
    pub error: Option<String>,
    /// Wall-clock time spent in the provider, in milliseconds.
    pub elapsed_ms: f64,
}

/// Run every provider on the same input in parallel and collect the results
/// in provider order.
pub fn compare_providers(
    providers: &[&dyn RouteProvider],
    waypoints: &[Coordinate],
    restrictions: &Restrictions,
    units: DistanceUnit,
) -> Vec<ProviderComparison> {
    providers
        .par_iter()
        .map(|provider| {
            let started = Instant::now();
            let outcome = provider.route(waypoints, restrictions, units);
            let elapsed_ms = started.elapsed().as_secs_f64() * 1_000.0;
            debug!(provider = provider.name(), elapsed_ms, "provider finished");

            match outcome {
                Ok(route) => ProviderComparison {
                    provider: provider.name().to_string(),
                    route: Some(route),
                    error: None,
                    elapsed_ms,
                },
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "provider failed");
                    ProviderComparison {
                        provider: provider.name().to_string(),
                        route: None,
                        error: Some(err.to_string()),
                        elapsed_ms,
                    }
                }
            }
        })
        .collect()
}
