//! Read-only token client bound to a fixed contract address.

use crate::{ReadError, TokenSource};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use binding::token::BurnableToken;
use tracing::debug;

/// RPC-backed implementation of [`TokenSource`].
pub struct TokenReader<P> {
    provider: P,
    token: Address,
}

impl<P> TokenReader<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, token: Address) -> Self {
        Self { provider, token }
    }
}

impl<P> TokenSource for TokenReader<P>
where
    P: Provider + Clone,
{
    async fn name(&self) -> Result<String, ReadError> {
        let contract = BurnableToken::new(self.token, &self.provider);
        Ok(contract.name().call().await?)
    }

    async fn symbol(&self) -> Result<String, ReadError> {
        let contract = BurnableToken::new(self.token, &self.provider);
        Ok(contract.symbol().call().await?)
    }

    async fn decimals(&self) -> Result<u8, ReadError> {
        let contract = BurnableToken::new(self.token, &self.provider);
        Ok(contract.decimals().call().await?)
    }

    async fn total_supply(&self) -> Result<U256, ReadError> {
        let contract = BurnableToken::new(self.token, &self.provider);
        Ok(contract.totalSupply().call().await?)
    }

    async fn balance_of(&self, holder: Address) -> Result<U256, ReadError> {
        debug!(
            "Querying token balance: token={}, holder={}",
            self.token, holder
        );

        let contract = BurnableToken::new(self.token, &self.provider);
        Ok(contract.balanceOf(holder).call().await?)
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, ReadError> {
        debug!(
            "Querying allowance: token={}, owner={}, spender={}",
            self.token, owner, spender
        );

        let contract = BurnableToken::new(self.token, &self.provider);
        Ok(contract.allowance(owner, spender).call().await?)
    }

    async fn owner(&self) -> Result<Address, ReadError> {
        let contract = BurnableToken::new(self.token, &self.provider);
        Ok(contract.owner().call().await?)
    }
}
