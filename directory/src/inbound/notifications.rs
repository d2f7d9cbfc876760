//! Pumps starred-change notifications into a [`DirectorySession`].
//!
//! Events carry no payload, so a burst of them (or a lagged receiver that
//! skipped some) collapses into a single starred refresh. Refresh failures
//! are logged and the previous snapshot stays published.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use crate::domain::ports::StarredChanged;
use crate::domain::{DirectorySession, PublishOutcome};

/// Why [`pump_starred_changes`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpExit {
    /// Every notification sender was dropped.
    NotifierClosed,
    /// The session was unmounted.
    SessionClosed,
}

/// Forward notifications from `receiver` to `session` until either side
/// goes away.
pub async fn pump_starred_changes(
    session: Arc<DirectorySession>,
    mut receiver: broadcast::Receiver<StarredChanged>,
) -> PumpExit {
    loop {
        match receiver.recv().await {
            Ok(StarredChanged) => {}
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "starred notifications lagged; coalescing");
            }
            Err(RecvError::Closed) => return PumpExit::NotifierClosed,
        }
        while matches!(
            receiver.try_recv(),
            Ok(_) | Err(TryRecvError::Lagged(_))
        ) {}

        match session.on_starred_changed().await {
            Ok(PublishOutcome::Discarded) => return PumpExit::SessionClosed,
            Ok(outcome) => debug!(?outcome, "starred change handled"),
            Err(error) => warn!(%error, "starred refresh failed; keeping previous snapshot"),
        }
    }
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
