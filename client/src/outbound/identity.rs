//! Single-writer identity store backing the `IdentityProvider` port.
//!
//! The host shell publishes the resolved identity (or `None` on sign-out);
//! guards and sessions read and subscribe through the port.

use tokio::sync::watch;
use tracing::debug;

use crate::domain::IdentitySnapshot;
use crate::domain::ports::{IdentityProvider, IdentityUpdates};

/// Identity store broadcasting every replacement over a `watch` channel.
#[derive(Debug)]
pub struct WatchIdentityStore {
    sender: watch::Sender<Option<IdentitySnapshot>>,
}

impl Default for WatchIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchIdentityStore {
    /// Create a store whose identity is still unresolved.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Replace the current identity. Subscribers are notified even when the
    /// new snapshot equals the old one.
    pub fn publish(&self, identity: Option<IdentitySnapshot>) {
        debug!(identity = ?identity.as_ref().map(IdentitySnapshot::id), "identity replaced");
        self.sender.send_replace(identity);
    }
}

impl IdentityProvider for WatchIdentityStore {
    fn current_identity(&self) -> Option<IdentitySnapshot> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> IdentityUpdates {
        self.sender.subscribe()
    }
}
