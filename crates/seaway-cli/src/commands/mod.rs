// Module exports for CLI subcommands.
//
// Each module handles one subcommand. main.rs parses arguments and dispatches
// here; network loading is shared through `NetworkOptions`.

pub mod compare;
pub mod info;
pub mod route;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use seaway_lib::{
    fetch_network, load_network, network_url, resolve_network_path, GraphBuildOptions,
    NetworkModel, NetworkResolution, Router,
};

/// Where the network comes from and how it is turned into graphs.
#[derive(Args, Debug, Clone)]
pub struct NetworkOptions {
    /// Network GeoJSON file, or a directory holding `network-<res>km.geojson`.
    #[arg(long, global = true, env = "SEAWAY_NETWORK")]
    pub network: Option<PathBuf>,

    /// Directory holding network files (defaults to the platform data dir).
    #[arg(long, global = true, env = "SEAWAY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Routing service base URL to download the network from. Takes
    /// precedence over local files.
    #[arg(long, global = true)]
    pub network_url: Option<String>,

    /// Network resolution in kilometres (5, 10, 20, 50 or 100).
    #[arg(long, global = true, default_value = "20")]
    pub resolution: NetworkResolution,

    /// Round vertex coordinates to this many degrees before merging.
    #[arg(long, global = true)]
    pub precision: Option<f64>,
}

impl NetworkOptions {
    /// Human-readable description of where the network is read from.
    pub fn source(&self) -> Result<String> {
        if let Some(base) = &self.network_url {
            return Ok(network_url(base, self.resolution));
        }
        Ok(self.network_path()?.display().to_string())
    }

    fn network_path(&self) -> Result<PathBuf> {
        let target = self.network.as_deref().or(self.data_dir.as_deref());
        resolve_network_path(target, self.resolution)
            .context("failed to resolve the network file location")
    }

    pub fn load(&self) -> Result<NetworkModel> {
        if let Some(base) = &self.network_url {
            let url = network_url(base, self.resolution);
            return fetch_network(&url)
                .with_context(|| format!("failed to download network from {url}"));
        }

        let path = self.network_path()?;
        load_network(&path)
            .with_context(|| format!("failed to load network from {}", path.display()))
    }

    pub fn graph_options(&self) -> GraphBuildOptions {
        match self.precision {
            Some(precision) => GraphBuildOptions::with_precision(precision),
            None => GraphBuildOptions::default(),
        }
    }

    /// Load the network and build a router over its graph variants.
    pub fn router(&self) -> Result<Router> {
        let network = self.load()?;
        Router::with_options(&network, &self.graph_options())
            .context("failed to build graphs from the network")
    }
}
