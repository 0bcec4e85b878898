//! Wallet adapter over a locally configured signing key.
//!
//! The adapter exposes the authorized account set and a network guard.
//! Without a key, every read path still works; `connect` is the gate the
//! write flows go through.

use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_signer_local::PrivateKeySigner;
use thiserror::Error;

use crate::ClientError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No signing key is configured; read-only calls still work.
    #[error("no wallet key configured; set PRIVATE_KEY or pass --private-key")]
    Unavailable,

    /// The RPC endpoint serves a different chain than the configured
    /// target.
    #[error("connected to chain {reported}, expected chain {expected}")]
    WrongNetwork { expected: u64, reported: u64 },

    #[error("wallet rpc error: {0}")]
    Rpc(String),
}

/// A wallet backed by zero or one locally held signing keys.
#[derive(Debug, Clone, Default)]
pub struct WalletAdapter {
    signer: Option<PrivateKeySigner>,
}

impl WalletAdapter {
    /// A wallet with no key; only read paths are usable.
    pub const fn disconnected() -> Self {
        Self { signer: None }
    }

    /// Parse a hex private key (with or without 0x prefix) into a wallet.
    pub fn from_key(key: &str) -> Result<Self, ClientError> {
        let signer: PrivateKeySigner = key
            .parse()
            .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))?;

        Ok(Self {
            signer: Some(signer),
        })
    }

    /// Build from an optional key, falling back to a disconnected wallet.
    pub fn from_optional_key(key: Option<&str>) -> Result<Self, ClientError> {
        key.map_or(Ok(Self::disconnected()), Self::from_key)
    }

    /// First authorized account, or `None`. No side effects.
    pub fn current_account(&self) -> Option<Address> {
        self.signer.as_ref().map(PrivateKeySigner::address)
    }

    /// All accounts this wallet can sign for, primary first.
    pub fn accounts(&self) -> Vec<Address> {
        self.current_account().into_iter().collect()
    }

    /// Require a connected account.
    pub fn connect(&self) -> Result<Address, WalletError> {
        self.current_account().ok_or(WalletError::Unavailable)
    }

    /// The signer backing this wallet, for building a signing provider.
    pub const fn signer(&self) -> Option<&PrivateKeySigner> {
        self.signer.as_ref()
    }
}

/// Verify the provider reports the configured target chain.
///
/// Write flows call this before touching any account, so a mis-pointed
/// RPC endpoint is rejected up front rather than after a submission.
pub async fn ensure_network<P: Provider>(provider: &P, expected: u64) -> Result<(), WalletError> {
    let reported = provider
        .get_chain_id()
        .await
        .map_err(|e| WalletError::Rpc(e.to_string()))?;

    check_chain(reported, expected)
}

/// Chain-id comparison behind [`ensure_network`].
pub const fn check_chain(reported: u64, expected: u64) -> Result<(), WalletError> {
    if reported == expected {
        Ok(())
    } else {
        Err(WalletError::WrongNetwork { expected, reported })
    }
}
