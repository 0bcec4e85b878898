//! Wallet event notifications.
//!
//! The wallet surface emits two notifications the shell reacts to: the
//! authorized account set changed, or the connected chain changed. Events
//! fan out over a broadcast channel; a subscriber unsubscribes by dropping
//! its receiver.

use alloy_primitives::Address;
use alloy_provider::Provider;
use tokio::sync::broadcast;
use tracing::debug;

use crate::WalletError;

/// Notification emitted by the wallet surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// The authorized account set changed; the first entry is the new
    /// primary account. Empty means the wallet disconnected.
    AccountsChanged(Vec<Address>),
    /// The connected chain changed.
    ChainChanged(u64),
}

/// Broadcast fan-out for wallet events.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<WalletEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Subscribe for the lifetime of the returned receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.tx.subscribe()
    }

    /// Emit to all current subscribers. Send errors (no live receivers)
    /// are ignored.
    pub fn emit(&self, event: WalletEvent) {
        let _ = self.tx.send(event);
    }
}

/// Detects chain changes by polling the provider's reported chain id.
pub struct ChainWatcher<P> {
    provider: P,
    last: u64,
}

impl<P: Provider> ChainWatcher<P> {
    pub const fn new(provider: P, initial: u64) -> Self {
        Self {
            provider,
            last: initial,
        }
    }

    /// Poll once; emits [`WalletEvent::ChainChanged`] when the reported
    /// id moved.
    pub async fn poll(&mut self, bus: &EventBus) -> Result<(), WalletError> {
        let reported = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| WalletError::Rpc(e.to_string()))?;

        if reported != self.last {
            debug!(from = self.last, to = reported, "Chain id changed");
            self.last = reported;
            bus.emit(WalletEvent::ChainChanged(reported));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    #[tokio::test]
    async fn test_bus_delivers_to_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(WalletEvent::ChainChanged(1));
        bus.emit(WalletEvent::AccountsChanged(vec![Address::ZERO]));

        assert_eq!(rx.recv().await.unwrap(), WalletEvent::ChainChanged(1));
        assert_eq!(
            rx.recv().await.unwrap(),
            WalletEvent::AccountsChanged(vec![Address::ZERO])
        );
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.emit(WalletEvent::ChainChanged(1));
    }

    #[tokio::test]
    async fn test_dropped_receiver_unsubscribes() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        drop(rx);

        // No receivers left; the bus must not panic.
        bus.emit(WalletEvent::ChainChanged(2));
    }
}
