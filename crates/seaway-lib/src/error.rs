use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Seaway library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only malformed input and I/O problems surface here. A leg that cannot be
/// snapped or has no connecting path is reported on the leg itself (see
/// [`crate::routing::LegOutcome`]) so multi-waypoint requests can partially succeed.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when fewer than two waypoints are supplied to the planner.
    #[error("at least two waypoints are required to plan a route (got {count})")]
    InvalidWaypointCount { count: usize },

    /// Raised for non-finite or out-of-range coordinate values.
    #[error("invalid coordinate ({longitude}, {latitude})")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    /// Raised when a coordinate could not be parsed from text.
    #[error("could not parse coordinate from '{input}'; expected 'LON,LAT'")]
    CoordinateParse { input: String },

    /// Raised when the configured rounding precision is not a positive number.
    #[error("coordinate precision must be a finite positive number (got {precision})")]
    InvalidPrecision { precision: f64 },

    /// Raised when a network resolution outside the published set is requested.
    #[error("unsupported network resolution {value}km; expected one of 5, 10, 20, 50, 100")]
    UnsupportedResolution { value: u32 },

    /// Network file could not be located at the resolved path.
    #[error("network not found at {path}")]
    NetworkNotFound { path: PathBuf },

    /// Raised when the network document is not a usable GeoJSON feature collection.
    #[error("failed to parse network: {message}")]
    NetworkParse { message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the network data dir")]
    ProjectDirsUnavailable,

    /// Raised when the comparison oracle answers with something unusable.
    #[error("comparison oracle request failed: {message}")]
    OracleFailure { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
