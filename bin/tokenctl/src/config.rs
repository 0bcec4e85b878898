use alloy_primitives::Address;
use config::{NetworkKind, NetworkProfile};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// File-based overrides on top of the built-in network profile.
///
/// Every field is optional; a missing file means the shipped defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target network; `None` keeps the shipped default target.
    pub network: Option<NetworkKind>,

    /// RPC endpoint override.
    pub rpc_url: Option<String>,

    /// Token contract address override, for fresh deployments.
    pub token_address: Option<Address>,

    /// Watch-mode poll interval in seconds.
    pub poll_interval_secs: Option<u64>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Load from a path when the file exists, defaults otherwise.
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the network profile with overrides applied.
    pub fn profile(&self) -> NetworkProfile {
        let mut profile = self
            .network
            .map_or_else(NetworkProfile::default_target, NetworkProfile::for_kind);

        if let Some(url) = &self.rpc_url {
            profile = profile.with_rpc_url(url.clone());
        }
        if let Some(token) = self.token_address {
            profile = profile.with_token(token);
        }

        profile
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.unwrap_or(30))
    }
}
