//! Lifecycle of one mounted directory screen.
//!
//! The session is the single writer of the published snapshot. Readers hold
//! `Arc<DirectoryViewState>` values or a `watch` receiver and never observe a
//! partially patched list. Results that arrive after [`DirectorySession::unmount`]
//! are discarded instead of published.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::debug;

use super::directory_service::DirectoryService;
use super::error::DirectoryError;
use super::view_state::DirectoryViewState;

/// What an operation did to the published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A new snapshot was published.
    Published,
    /// The operation completed but the snapshot did not need to change.
    Unchanged,
    /// The operation was queued until the first load publishes.
    Deferred,
    /// The session was no longer active; the result was dropped.
    Discarded,
}

/// Published snapshot slot; `None` until the first load completes.
pub type ViewStateReceiver = watch::Receiver<Option<Arc<DirectoryViewState>>>;

/// Owns the published [`DirectoryViewState`] for one screen.
pub struct DirectorySession {
    service: DirectoryService,
    state: watch::Sender<Option<Arc<DirectoryViewState>>>,
    active: AtomicBool,
    pending_refresh: AtomicBool,
}

impl DirectorySession {
    /// Create an unmounted session over `service`.
    pub fn new(service: DirectoryService) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            service,
            state,
            active: AtomicBool::new(false),
            pending_refresh: AtomicBool::new(false),
        }
    }

    /// Service used for loads and refreshes.
    pub fn service(&self) -> &DirectoryService {
        &self.service
    }

    /// Whether the session is mounted.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Latest published snapshot.
    pub fn view_state(&self) -> Option<Arc<DirectoryViewState>> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> ViewStateReceiver {
        self.state.subscribe()
    }

    /// Activate the session and run the initial load.
    ///
    /// A starred change reported while the load was in flight is replayed
    /// once after the first snapshot is published. If that replay fails its
    /// error is returned; the initial snapshot stays published.
    pub async fn mount(&self) -> Result<PublishOutcome, DirectoryError> {
        self.active.store(true, Ordering::SeqCst);
        let outcome = self.reload().await?;
        let replay = self.pending_refresh.swap(false, Ordering::SeqCst);
        if replay && outcome == PublishOutcome::Published {
            debug!("replaying starred change received during initial load");
            self.on_starred_changed().await?;
        }
        Ok(outcome)
    }

    /// Fetch everything again and replace the snapshot wholesale.
    pub async fn reload(&self) -> Result<PublishOutcome, DirectoryError> {
        let view = Arc::new(self.service.load_view().await?);
        // Checked under the channel lock so a concurrent unmount cannot be
        // followed by this publish.
        let published = self.state.send_if_modified(|slot| {
            if !self.is_active() {
                return false;
            }
            *slot = Some(view);
            true
        });
        if !published {
            debug!("session inactive; discarding directory load");
            return Ok(PublishOutcome::Discarded);
        }
        Ok(PublishOutcome::Published)
    }

    /// React to a "starred set changed" notification.
    ///
    /// Only the starred section is patched. On fetch failure the previous
    /// snapshot stays published and [`DirectoryError::StarredRefreshFailed`]
    /// is returned.
    pub async fn on_starred_changed(&self) -> Result<PublishOutcome, DirectoryError> {
        if !self.service.uses_starred() {
            return Ok(PublishOutcome::Unchanged);
        }
        if !self.is_active() {
            return Ok(PublishOutcome::Discarded);
        }
        if self.state.borrow().is_none() {
            debug!("starred change before first load; deferring");
            self.pending_refresh.store(true, Ordering::SeqCst);
            return Ok(PublishOutcome::Deferred);
        }

        let starred = self.service.fetch_starred().await?;
        if !self.is_active() {
            debug!("session inactive; discarding starred refresh");
            return Ok(PublishOutcome::Discarded);
        }

        // Reconcile against whatever is current now, not before the fetch.
        let mut applied = None;
        self.state.send_if_modified(|slot| {
            let Some(current) = slot.as_ref() else {
                return false;
            };
            match self.service.reconcile(current, &starred) {
                Some((next, patch)) => {
                    *slot = Some(Arc::new(next));
                    applied = Some(patch);
                    true
                }
                None => false,
            }
        });

        Ok(match applied {
            Some(patch) => {
                debug!(?patch, starred = starred.len(), "starred section patched");
                PublishOutcome::Published
            }
            None => PublishOutcome::Unchanged,
        })
    }

    /// Tear the session down. Later results are discarded.
    pub fn unmount(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.pending_refresh.store(false, Ordering::SeqCst);
        self.state.send_replace(None);
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
