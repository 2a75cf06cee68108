//! Locating, reading and downloading maritime network documents.

use std::env;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::network::NetworkModel;

/// Environment variable naming an explicit network file.
pub const NETWORK_ENV: &str = "SEAWAY_NETWORK";

/// Environment variable naming the directory holding network files.
pub const DATA_DIR_ENV: &str = "SEAWAY_DATA_DIR";

/// Published network resolutions, by nominal segment spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum NetworkResolution {
    Km5,
    Km10,
    #[default]
    Km20,
    Km50,
    Km100,
}

impl NetworkResolution {
    pub const ALL: [NetworkResolution; 5] = [
        NetworkResolution::Km5,
        NetworkResolution::Km10,
        NetworkResolution::Km20,
        NetworkResolution::Km50,
        NetworkResolution::Km100,
    ];

    pub fn kilometers(self) -> u32 {
        match self {
            NetworkResolution::Km5 => 5,
            NetworkResolution::Km10 => 10,
            NetworkResolution::Km20 => 20,
            NetworkResolution::Km50 => 50,
            NetworkResolution::Km100 => 100,
        }
    }

    /// File name used when the network is stored in a data directory.
    pub fn file_name(self) -> String {
        format!("network-{}km.geojson", self.kilometers())
    }
}

impl TryFrom<u32> for NetworkResolution {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        NetworkResolution::ALL
            .into_iter()
            .find(|resolution| resolution.kilometers() == value)
            .ok_or(Error::UnsupportedResolution { value })
    }
}

impl From<NetworkResolution> for u32 {
    fn from(value: NetworkResolution) -> Self {
        value.kilometers()
    }
}

impl FromStr for NetworkResolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches("km");
        let value: u32 = trimmed
            .parse()
            .map_err(|_| Error::UnsupportedResolution { value: 0 })?;
        NetworkResolution::try_from(value)
    }
}

impl fmt::Display for NetworkResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}km", self.kilometers())
    }
}

/// Resolve the platform data directory for network files.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "seaway", "seaway").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Work out which network file to read.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided (a file, or a directory that
///    holds `network-<res>km.geojson`).
/// 2. `SEAWAY_NETWORK` environment variable.
/// 3. `SEAWAY_DATA_DIR` environment variable.
/// 4. Platform-specific project data directory.
pub fn resolve_network_path(
    target: Option<&Path>,
    resolution: NetworkResolution,
) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_network_path(explicit, resolution));
    }

    if let Some(env_path) = env::var_os(NETWORK_ENV) {
        return Ok(canonical_network_path(Path::new(&env_path), resolution));
    }

    if let Some(env_dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(Path::new(&env_dir).join(resolution.file_name()));
    }

    Ok(default_data_dir()?.join(resolution.file_name()))
}

fn canonical_network_path(path: &Path, resolution: NetworkResolution) -> PathBuf {
    if path.is_dir() || path.extension().is_none() {
        return path.join(resolution.file_name());
    }
    path.to_path_buf()
}

/// Read and parse a network GeoJSON file.
pub fn load_network(path: &Path) -> Result<NetworkModel> {
    if !path.exists() {
        return Err(Error::NetworkNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "reading network file");
    let file = File::open(path)?;
    let network = NetworkModel::from_geojson_reader(BufReader::new(file))?;
    info!(
        path = %path.display(),
        features = network.len(),
        "loaded network"
    );
    Ok(network)
}

/// URL of a network document under a routing service base URL.
pub fn network_url(base: &str, resolution: NetworkResolution) -> String {
    format!(
        "{}/network/{}",
        base.trim_end_matches('/'),
        resolution.kilometers()
    )
}

/// Download and parse a network document.
pub fn fetch_network(url: &str) -> Result<NetworkModel> {
    info!(url, "downloading network");
    let client = build_client()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    NetworkModel::from_geojson_str(&body)
}

pub(crate) fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(60))
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!("seaway-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}
