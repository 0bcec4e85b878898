//! Signer-bound write client for the token contract.
//!
//! Each write submits exactly one transaction and hands back a pending
//! handle whose hash is known immediately; awaiting the confirmation is a
//! separate step the caller owns. There is no retry logic: a failed or
//! rejected submission is reported as-is and the user re-initiates.

use crate::SubmitError;
use alloy_network::Ethereum;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{PendingTransactionBuilder, Provider};
use alloy_rpc_types_eth::TransactionReceipt;
use alloy_sol_types::SolEvent;
use binding::token::BurnableToken;
use std::future::Future;
use tracing::info;

/// A single token write, amounts already in base units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCall {
    Transfer { to: Address, amount: U256 },
    Approve { spender: Address, amount: U256 },
    TransferFrom { from: Address, to: Address, amount: U256 },
    Burn { amount: U256 },
}

impl TokenCall {
    /// Human-readable description for status reporting.
    pub fn description(&self) -> String {
        match self {
            Self::Transfer { to, amount } => {
                format!("transfer {amount} base units to {to}")
            }
            Self::Approve { spender, amount } => {
                format!("approve {spender} for {amount} base units")
            }
            Self::TransferFrom { from, to, amount } => {
                format!("transfer {amount} base units from {from} to {to}")
            }
            Self::Burn { amount } => format!("burn {amount} base units"),
        }
    }
}

/// Confirmed transaction details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmed {
    pub hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Value decoded from the receipt's Transfer event, when one was
    /// emitted.
    pub moved: Option<U256>,
}

/// A submitted transaction whose hash is known before confirmation.
pub trait Pending: Send {
    fn hash(&self) -> TxHash;

    /// Await one confirmation. Waits indefinitely; a submission is not
    /// cancellable once sent.
    fn confirm(self) -> impl Future<Output = Result<Confirmed, SubmitError>> + Send;
}

/// Trait for submitting token writes.
pub trait Submit: Send + Sync {
    type Pending: Pending;

    /// Submit exactly one transaction for the call.
    fn submit(
        &self,
        call: TokenCall,
    ) -> impl Future<Output = Result<Self::Pending, SubmitError>> + Send;
}

/// Write client bound to a signing provider.
pub struct TokenWriter<P> {
    provider: P,
    token: Address,
}

impl<P> TokenWriter<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, token: Address) -> Self {
        Self { provider, token }
    }
}

impl<P> Submit for TokenWriter<P>
where
    P: Provider + Clone,
{
    type Pending = Submission;

    async fn submit(&self, call: TokenCall) -> Result<Submission, SubmitError> {
        let contract = BurnableToken::new(self.token, &self.provider);

        let pending = match &call {
            TokenCall::Transfer { to, amount } => contract.transfer(*to, *amount).send().await?,
            TokenCall::Approve { spender, amount } => {
                contract.approve(*spender, *amount).send().await?
            }
            TokenCall::TransferFrom { from, to, amount } => {
                contract.transferFrom(*from, *to, *amount).send().await?
            }
            TokenCall::Burn { amount } => contract.burn(*amount).send().await?,
        };

        info!(tx_hash = %pending.tx_hash(), "Submitted: {}", call.description());

        Ok(Submission::new(pending))
    }
}

/// Pending transaction handle returned by [`TokenWriter`].
pub struct Submission {
    hash: TxHash,
    pending: PendingTransactionBuilder<Ethereum>,
}

impl Submission {
    fn new(pending: PendingTransactionBuilder<Ethereum>) -> Self {
        let hash = *pending.tx_hash();
        Self { hash, pending }
    }
}

impl Pending for Submission {
    fn hash(&self) -> TxHash {
        self.hash
    }

    async fn confirm(self) -> Result<Confirmed, SubmitError> {
        let receipt = self.pending.get_receipt().await?;

        if !receipt.status() {
            return Err(SubmitError::Reverted {
                hash: receipt.transaction_hash,
            });
        }

        let moved = decode_transfer_value(&receipt);

        info!(
            tx_hash = %receipt.transaction_hash,
            block_number = receipt.block_number,
            gas_used = receipt.gas_used,
            "Transaction confirmed."
        );

        Ok(Confirmed {
            hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            moved,
        })
    }
}

/// Pull the value out of the first Transfer event in the receipt, if any.
fn decode_transfer_value(receipt: &TransactionReceipt) -> Option<U256> {
    for log in receipt.logs() {
        if let Ok(event) = BurnableToken::Transfer::decode_log(&log.inner) {
            return Some(event.value);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_descriptions() {
        let to = Address::from([1u8; 20]);
        let call = TokenCall::Transfer {
            to,
            amount: U256::from(5),
        };

        let desc = call.description();
        assert!(desc.contains("transfer"));
        assert!(desc.contains("5 base units"));

        let burn = TokenCall::Burn {
            amount: U256::from(9),
        };
        assert!(burn.description().contains("burn"));
    }
}
