//! Subscribe-and-recompute driver binding a guard to identity updates.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::ports::IdentityProvider;

use super::{GuardState, GuardView, RouteGuard};

/// Running guard: re-evaluates on every identity replacement and publishes
/// the resulting view.
///
/// Dropping the session stops the background task.
pub struct GuardSession {
    views: watch::Receiver<GuardView>,
    states: watch::Receiver<GuardState>,
    task: JoinHandle<()>,
}

impl GuardSession {
    /// Evaluate `guard` against the provider's current identity and keep
    /// re-evaluating on each update.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(mut guard: RouteGuard, provider: &dyn IdentityProvider) -> Self {
        let mut identities = provider.subscribe();
        let current = identities.borrow_and_update().clone();
        let initial = guard.observe(current.as_ref());
        let (view_tx, views) = watch::channel(initial);
        let (state_tx, states) = watch::channel(guard.state());

        let task = tokio::spawn(async move {
            while identities.changed().await.is_ok() {
                let identity = identities.borrow_and_update().clone();
                let view = guard.observe(identity.as_ref());
                state_tx.send_replace(guard.state());
                view_tx.send_if_modified(|current| {
                    if *current == view {
                        false
                    } else {
                        *current = view;
                        true
                    }
                });
            }
            debug!("identity provider closed; guard session finished");
        });

        Self {
            views,
            states,
            task,
        }
    }

    /// Latest view.
    pub fn view(&self) -> GuardView {
        self.views.borrow().clone()
    }

    /// Latest guard phase.
    pub fn state(&self) -> GuardState {
        *self.states.borrow()
    }

    /// Subscribe to view changes.
    pub fn views(&self) -> watch::Receiver<GuardView> {
        self.views.clone()
    }

    /// Whether the background task is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for GuardSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}
