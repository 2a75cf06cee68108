//! Output formatting for route, comparison and network reports.
//!
//! Text output is for people and may be colored; JSON and GeoJSON go to
//! stdout untouched so they can be piped into other tools.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use seaway_lib::{
    comparison_to_geojson, route_to_geojson, DistanceUnit, LegOutcome, MultiRoute,
    ProviderComparison, RouteStatus,
};

use crate::terminal::{format_count, ColorPalette};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Full result as JSON.
    Json,
    /// GeoJSON `FeatureCollection` of the route geometry.
    Geojson,
}

impl OutputFormat {
    pub fn render_route(self, route: &MultiRoute, palette: &ColorPalette) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(render_route_text(route, palette)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(route)?),
            OutputFormat::Geojson => Ok(serde_json::to_string_pretty(&route_to_geojson(route))?),
        }
    }

    pub fn render_comparison(
        self,
        results: &[ProviderComparison],
        palette: &ColorPalette,
    ) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(render_comparison_text(results, palette)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
            OutputFormat::Geojson => {
                Ok(serde_json::to_string_pretty(&comparison_to_geojson(results))?)
            }
        }
    }

    /// Network reports have no geometry, so GeoJSON falls back to JSON.
    pub fn render_info(self, info: &NetworkInfo, palette: &ColorPalette) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(render_info_text(info, palette)),
            OutputFormat::Json | OutputFormat::Geojson => Ok(serde_json::to_string_pretty(info)?),
        }
    }
}

/// Summary of a loaded network and its graph variants.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkInfo {
    pub source: String,
    pub features: usize,
    pub segments: usize,
    pub traffic_lanes: usize,
    pub suez: usize,
    pub panama: usize,
    pub variants: Vec<VariantInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantInfo {
    pub variant: String,
    pub vertices: usize,
    pub edges: usize,
}

fn format_distance(distance: f64, units: DistanceUnit) -> String {
    format!("{distance:.1} {}", units.suffix())
}

fn render_route_text(route: &MultiRoute, palette: &ColorPalette) -> String {
    let status_color = match route.status {
        RouteStatus::Complete => palette.ok,
        RouteStatus::Partial => palette.warn,
        RouteStatus::Failed => palette.fail,
    };

    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}Route{}: {} leg(s), {}{}{} (algorithm: {}, status: {}{:?}{})",
        palette.heading,
        palette.reset,
        route.legs.len(),
        palette.distance,
        format_distance(route.total_distance, route.units),
        palette.reset,
        route.algorithm,
        status_color,
        route.status,
        palette.reset,
    );

    for leg in &route.legs {
        let _ = write!(
            buffer,
            "{:>3}: {}({}) -> ({}){} ",
            leg.index + 1,
            palette.muted,
            leg.from,
            leg.to,
            palette.reset
        );
        match &leg.outcome {
            LegOutcome::Routed(routed) => {
                let _ = write!(
                    buffer,
                    "{}{}{} in {} polyline(s), {} vertices",
                    palette.distance,
                    format_distance(routed.distance, route.units),
                    palette.reset,
                    routed.polylines.len(),
                    routed.vertex_count
                );
                if leg.crossed {
                    let _ = write!(
                        buffer,
                        " {}[crosses antimeridian via {} graph]{}",
                        palette.warn, leg.variant, palette.reset
                    );
                }
                buffer.push('\n');
            }
            LegOutcome::SnapFailed => {
                let _ = writeln!(
                    buffer,
                    "{}no network vertex to snap to{}",
                    palette.fail, palette.reset
                );
            }
            LegOutcome::NoPath => {
                let _ = writeln!(
                    buffer,
                    "{}no permitted path{}",
                    palette.fail, palette.reset
                );
            }
        }
    }

    buffer
}

fn render_comparison_text(results: &[ProviderComparison], palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "{}Comparison{}:", palette.heading, palette.reset);
    for result in results {
        match (&result.route, &result.error) {
            (Some(route), _) => {
                let _ = write!(
                    buffer,
                    "  {:<8} {}{}{} in {} polyline(s) {}({:.1} ms){}",
                    result.provider,
                    palette.distance,
                    format_distance(route.distance, route.units),
                    palette.reset,
                    route.polylines.len(),
                    palette.muted,
                    result.elapsed_ms,
                    palette.reset
                );
                if !route.failed_legs.is_empty() {
                    let legs = route
                        .failed_legs
                        .iter()
                        .map(|leg| (leg + 1).to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    let _ = write!(
                        buffer,
                        " {}(failed legs: {legs}){}",
                        palette.warn, palette.reset
                    );
                }
                buffer.push('\n');
            }
            (None, error) => {
                let _ = writeln!(
                    buffer,
                    "  {:<8} {}error: {}{} {}({:.1} ms){}",
                    result.provider,
                    palette.fail,
                    error.as_deref().unwrap_or("unknown failure"),
                    palette.reset,
                    palette.muted,
                    result.elapsed_ms,
                    palette.reset
                );
            }
        }
    }
    buffer
}

fn render_info_text(info: &NetworkInfo, palette: &ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}Network{}: {}",
        palette.heading, palette.reset, info.source
    );
    let _ = writeln!(
        buffer,
        "  features: {}, segments: {}",
        format_count(info.features),
        format_count(info.segments)
    );
    let _ = writeln!(
        buffer,
        "  tagged: {} traffic lane, {} suez, {} panama",
        info.traffic_lanes, info.suez, info.panama
    );
    for variant in &info.variants {
        let _ = writeln!(
            buffer,
            "  {:<17} {} vertices, {} edges",
            variant.variant,
            format_count(variant.vertices),
            format_count(variant.edges)
        );
    }
    buffer
}
