//! Driving port for "starred set changed" notifications.
//!
//! Delivery is at-least-once and unordered: a subscriber may see duplicate
//! events or miss intermediate ones, so events carry no payload and receivers
//! always re-fetch the starred set.

use tokio::sync::broadcast;

/// Signal that the starred contacts changed somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StarredChanged;

/// Source of starred-change notifications.
///
/// Subscribing returns a receiver; dropping it unsubscribes.
#[cfg_attr(test, mockall::automock)]
pub trait StarredChangeNotifier: Send + Sync {
    /// Start receiving notifications.
    fn subscribe(&self) -> broadcast::Receiver<StarredChanged>;
}

/// Notifier that never emits.
#[derive(Debug)]
pub struct SilentNotifier {
    sender: broadcast::Sender<StarredChanged>,
}

impl Default for SilentNotifier {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self { sender }
    }
}

impl StarredChangeNotifier for SilentNotifier {
    fn subscribe(&self) -> broadcast::Receiver<StarredChanged> {
        self.sender.subscribe()
    }
}
