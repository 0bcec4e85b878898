//! Console shell state: the session owned for the life of a run, wallet
//! event reactions, and snapshot refresh plumbing.

pub mod config;

use alloy_primitives::Address;
use alloy_provider::Provider;
use client::{events::WalletEvent, WalletAdapter, WalletError};
use token::{fetch_snapshot, ReadError, Snapshot, TokenSource};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

/// Connection and view state owned by the shell.
///
/// Absent at start, populated on connect, cleared when the wallet reports
/// zero accounts, fully reset on a chain change.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
    pub snapshot: Option<Snapshot>,
}

/// What the shell must do after applying a wallet event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Re-fetch the snapshot for the new primary account.
    Refresh(Address),
    /// The wallet reports no accounts; session cleared, reads still work.
    Disconnected,
    /// The chain changed; all in-memory state is stale and the shell must
    /// rebuild from scratch.
    Restart,
}

impl Session {
    pub const fn new() -> Self {
        Self {
            account: None,
            chain_id: None,
            snapshot: None,
        }
    }

    pub const fn connected(&self) -> bool {
        self.account.is_some()
    }

    /// Apply one wallet event, returning the follow-up the shell owes.
    pub fn apply(&mut self, event: &WalletEvent) -> Reaction {
        match event {
            WalletEvent::AccountsChanged(accounts) => match accounts.first() {
                Some(primary) => {
                    self.account = Some(*primary);
                    Reaction::Refresh(*primary)
                }
                None => {
                    self.account = None;
                    self.snapshot = None;
                    Reaction::Disconnected
                }
            },
            WalletEvent::ChainChanged(chain_id) => {
                debug!(chain_id, "Chain changed; resetting session");
                *self = Self::new();
                Reaction::Restart
            }
        }
    }
}

/// Drain all pending wallet events into the session, returning the
/// reactions in arrival order.
///
/// A lagged receiver has lost its oldest events; the loss is logged and
/// draining continues with what the channel still holds.
pub fn drain_events(
    events: &mut broadcast::Receiver<WalletEvent>,
    session: &mut Session,
) -> Vec<Reaction> {
    let mut reactions = Vec::new();

    loop {
        match events.try_recv() {
            Ok(event) => reactions.push(session.apply(&event)),
            Err(TryRecvError::Lagged(missed)) => {
                warn!("Wallet event stream lagged; {missed} events lost");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    reactions
}

/// Connect the wallet into the session.
///
/// The network check runs first: a wallet account is only taken once the
/// provider is confirmed to serve the target chain.
pub async fn connect<P: Provider>(
    provider: &P,
    wallet: &WalletAdapter,
    target_chain_id: u64,
    session: &mut Session,
) -> Result<Address, WalletError> {
    client::ensure_network(provider, target_chain_id).await?;

    let account = wallet.connect()?;
    session.account = Some(account);
    session.chain_id = Some(target_chain_id);

    Ok(account)
}

/// Refresh the session snapshot for the connected account (or the zero
/// address when browsing without a wallet).
pub async fn refresh_snapshot<S: TokenSource>(
    source: &S,
    session: &mut Session,
) -> Result<Snapshot, ReadError> {
    let holder = session.account.unwrap_or(Address::ZERO);
    let snapshot = fetch_snapshot(source, holder).await?;
    session.snapshot = Some(snapshot.clone());

    Ok(snapshot)
}

/// Best-effort owner lookup for informational display.
///
/// Failures are logged and reported as absent, never surfaced to the
/// user.
pub async fn lookup_owner<S: TokenSource>(source: &S) -> Option<Address> {
    match source.owner().await {
        Ok(owner) => Some(owner),
        Err(e) => {
            debug!(error = %e, "Owner lookup failed");
            None
        }
    }
}
