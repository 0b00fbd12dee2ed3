//! Port for performing page transitions.

use crate::domain::RoutePath;

/// Fire-and-forget navigation primitive supplied by the host shell.
///
/// Navigation may complete asynchronously or be cancelled by the user; the
/// caller never waits for or observes the result.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Request a transition to `path`.
    fn navigate_to(&self, path: &RoutePath);
}
