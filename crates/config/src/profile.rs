//! Network profiles for the token console.
//!
//! A profile carries everything needed to point the client at one network:
//! chain identity, RPC endpoint, block explorer, native currency and the
//! deployed token contract address.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Deployed token contract addresses.
const MAINNET_TOKEN: Address = address!("6df2fcf2b0c3e925d9371dcd7e0a4ead4df6ed95");
const SEPOLIA_TOKEN: Address = address!("5fbdb2315678afecb367f032d93f642f64180aa3");

/// Supported target networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Mainnet,
    Sepolia,
}

/// Complete configuration for one target network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Network kind this profile describes
    pub kind: NetworkKind,
    /// Human-readable chain name
    pub chain_name: String,
    /// Chain ID
    pub chain_id: u64,
    /// Default RPC endpoint
    pub rpc_url: String,
    /// Block explorer base URL
    pub explorer_url: String,
    /// Native currency symbol
    pub native_symbol: String,
    /// Native currency decimals
    pub native_decimals: u8,
    /// Deployed token contract address
    pub token: Address,
}

impl NetworkProfile {
    /// Ethereum mainnet profile.
    pub fn mainnet() -> Self {
        Self {
            kind: NetworkKind::Mainnet,
            chain_name: "Ethereum Mainnet".into(),
            chain_id: 1,
            rpc_url: "https://eth.llamarpc.com".into(),
            explorer_url: "https://etherscan.io".into(),
            native_symbol: "ETH".into(),
            native_decimals: 18,
            token: MAINNET_TOKEN,
        }
    }

    /// Ethereum Sepolia testnet profile.
    pub fn sepolia() -> Self {
        Self {
            kind: NetworkKind::Sepolia,
            chain_name: "Sepolia".into(),
            chain_id: 11_155_111,
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".into(),
            explorer_url: "https://sepolia.etherscan.io".into(),
            native_symbol: "ETH".into(),
            native_decimals: 18,
            token: SEPOLIA_TOKEN,
        }
    }

    /// Profile for a network kind.
    pub fn for_kind(kind: NetworkKind) -> Self {
        match kind {
            NetworkKind::Mainnet => Self::mainnet(),
            NetworkKind::Sepolia => Self::sepolia(),
        }
    }

    /// The single network new sessions target unless configuration
    /// overrides it.
    pub fn default_target() -> Self {
        Self::sepolia()
    }

    /// Override the RPC endpoint.
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Override the token contract address.
    pub const fn with_token(mut self, token: Address) -> Self {
        self.token = token;
        self
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, hash: impl std::fmt::Display) -> String {
        format!("{}/tx/{hash}", self.explorer_url)
    }
}
