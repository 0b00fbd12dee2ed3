//! Channel-backed `Navigator` for hosts that perform page transitions on
//! their own task.

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::RoutePath;
use crate::domain::ports::Navigator;

/// Navigator forwarding each request onto an unbounded channel.
///
/// Requests are fire-and-forget: once the host drops its receiver they are
/// logged and discarded.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<RoutePath>,
}

impl ChannelNavigator {
    /// Create a navigator and the receiver the host drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RoutePath>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate_to(&self, path: &RoutePath) {
        if self.sender.send(path.clone()).is_err() {
            warn!(route = %path, "navigation dropped; host receiver closed");
        }
    }
}
