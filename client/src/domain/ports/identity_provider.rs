//! Port through which the identity collaborator exposes the current session.

use tokio::sync::watch;

use crate::domain::IdentitySnapshot;

/// Receiver yielding every identity replacement, `None` while unresolved.
pub type IdentityUpdates = watch::Receiver<Option<IdentitySnapshot>>;

/// Source of the authenticated identity.
///
/// Implementations are the single writer of identity state; the core only
/// reads snapshots and reacts to replacements.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// Identity as currently known, or `None` before resolution or after
    /// logout.
    fn current_identity(&self) -> Option<IdentitySnapshot>;

    /// Subscribe to identity replacements (login, logout, refresh).
    fn subscribe(&self) -> IdentityUpdates;
}
