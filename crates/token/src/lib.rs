//! Read and write clients for the token contract.
//!
//! Reads go through the [`TokenSource`] trait, whose RPC implementation
//! ([`reader::TokenReader`]) binds the contract to a plain non-signing
//! provider so metadata and balances are available before any wallet key
//! is configured. Writes go through [`writer::TokenWriter`], which
//! requires a signing provider.

pub mod reader;
pub mod units;
pub mod writer;

use alloy_primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

use crate::units::{format_amount, AmountError};

/// A read against the token contract failed.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("token read failed: {0}")]
    Call(#[from] alloy_contract::Error),

    #[error("token read failed: {0}")]
    Other(String),
}

/// A write submission or its confirmation failed.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("transaction submission failed: {0}")]
    Submit(#[from] alloy_contract::Error),

    #[error("transaction {hash} reverted")]
    Reverted { hash: TxHash },

    #[error("confirmation failed: {0}")]
    Confirmation(#[from] alloy_provider::PendingTransactionError),

    #[error("{0}")]
    Other(String),
}

/// Display-ready view of the token at a point in time.
///
/// Replaced wholesale on every refresh, never patched in place. The
/// `decimals` value is authoritative for all amount conversions within a
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    /// Balance of the account the snapshot was fetched for.
    pub balance: U256,
}

impl Snapshot {
    pub fn total_supply_display(&self) -> Result<String, AmountError> {
        format_amount(self.total_supply, self.decimals)
    }

    pub fn balance_display(&self) -> Result<String, AmountError> {
        format_amount(self.balance, self.decimals)
    }
}

/// The token contract's view functions.
pub trait TokenSource: Send + Sync {
    fn name(&self) -> impl Future<Output = Result<String, ReadError>> + Send;

    fn symbol(&self) -> impl Future<Output = Result<String, ReadError>> + Send;

    fn decimals(&self) -> impl Future<Output = Result<u8, ReadError>> + Send;

    fn total_supply(&self) -> impl Future<Output = Result<U256, ReadError>> + Send;

    fn balance_of(&self, holder: Address) -> impl Future<Output = Result<U256, ReadError>> + Send;

    fn allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> impl Future<Output = Result<U256, ReadError>> + Send;

    /// Contract owner, informational only.
    fn owner(&self) -> impl Future<Output = Result<Address, ReadError>> + Send;
}

/// Fetch a full snapshot with five concurrent reads.
///
/// All five reads must succeed; a partial snapshot is never produced.
pub async fn fetch_snapshot<S>(source: &S, holder: Address) -> Result<Snapshot, ReadError>
where
    S: TokenSource,
{
    let (name, symbol, decimals, total_supply, balance) = tokio::try_join!(
        source.name(),
        source.symbol(),
        source.decimals(),
        source.total_supply(),
        source.balance_of(holder),
    )?;

    Ok(Snapshot {
        name,
        symbol,
        decimals,
        total_supply,
        balance,
    })
}
