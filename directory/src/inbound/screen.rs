//! A mounted directory screen: one session plus its notification pump.
//!
//! Opening subscribes to starred changes before the initial load, so changes
//! made while the load is in flight are buffered and applied once the first
//! snapshot is published. Closing unmounts the session and drops the
//! subscription.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::ports::StarredChangeNotifier;
use crate::domain::{
    DirectoryError, DirectoryService, DirectorySession, DirectoryViewState, PublishOutcome,
    ViewStateReceiver,
};

use super::notifications::{PumpExit, pump_starred_changes};

/// Owns a [`DirectorySession`] for as long as the screen is open.
pub struct DirectoryScreen {
    session: Arc<DirectorySession>,
    pump: Option<JoinHandle<PumpExit>>,
}

impl DirectoryScreen {
    /// Mount a session over `service` and start forwarding notifications.
    ///
    /// The subscription is skipped when the service has starred users
    /// turned off.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::SourceUnavailable`] if the initial load
    /// fails; nothing stays subscribed in that case.
    pub async fn open(
        service: DirectoryService,
        notifier: &dyn StarredChangeNotifier,
    ) -> Result<Self, DirectoryError> {
        let receiver = service.uses_starred().then(|| notifier.subscribe());
        let session = Arc::new(DirectorySession::new(service));

        match session.mount().await {
            Ok(_) => {}
            Err(error) if error.is_starred_refresh() && session.view_state().is_some() => {
                warn!(%error, "starred refresh failed after initial load");
            }
            Err(error) => {
                session.unmount();
                return Err(error);
            }
        }

        let pump = receiver
            .map(|receiver| tokio::spawn(pump_starred_changes(Arc::clone(&session), receiver)));
        Ok(Self { session, pump })
    }

    /// Session owned by this screen.
    pub fn session(&self) -> &Arc<DirectorySession> {
        &self.session
    }

    /// Latest published snapshot.
    pub fn view_state(&self) -> Option<Arc<DirectoryViewState>> {
        self.session.view_state()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> ViewStateReceiver {
        self.session.subscribe()
    }

    /// Pull-to-refresh: rebuild the whole snapshot.
    pub async fn reload(&self) -> Result<PublishOutcome, DirectoryError> {
        self.session.reload().await
    }

    /// Unmount the session and stop the notification pump.
    pub async fn close(mut self) {
        self.session.unmount();
        let Some(pump) = self.pump.take() else {
            return;
        };
        pump.abort();
        match pump.await {
            Ok(exit) => debug!(?exit, "starred pump finished"),
            Err(error) if error.is_cancelled() => debug!("starred pump cancelled"),
            Err(error) => warn!(%error, "starred pump failed"),
        }
    }
}

impl Drop for DirectoryScreen {
    fn drop(&mut self) {
        self.session.unmount();
        if let Some(pump) = &self.pump {
            pump.abort();
        }
    }
}
