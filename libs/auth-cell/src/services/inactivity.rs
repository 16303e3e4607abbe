use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, trace, warn};

use shared_utils::navigation::{Navigator, HOME_ROUTE};
use shared_utils::storage::SessionStorage;

use crate::models::{ActivityEvent, InactivitySettings, InactivityState};

/// Logs the user out after a period without interaction.
///
/// Once `timeout - warning` has elapsed without activity the state becomes
/// [`InactivityState::Warning`]; if the idleness lasts another `warning`, the
/// session storage is cleared and the navigator is sent to the home route.
/// Any activity restarts the countdown and hides the warning. Dropping the
/// monitor stops it.
pub struct InactivityMonitor {
    activity_tx: mpsc::UnboundedSender<ActivityEvent>,
    state_rx: watch::Receiver<InactivityState>,
    task: JoinHandle<()>,
}

impl InactivityMonitor {
    /// Start watching. Must be called from within a tokio runtime.
    pub fn start(
        mut settings: InactivitySettings,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        if settings.warning > settings.timeout {
            warn!(
                "Inactivity warning ({:?}) exceeds timeout ({:?}), clamping",
                settings.warning, settings.timeout
            );
            settings.warning = settings.timeout;
        }

        let (activity_tx, activity_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(InactivityState::Active);

        let task = tokio::spawn(watch_activity(
            settings,
            activity_rx,
            state_tx,
            storage,
            navigator,
        ));

        Self {
            activity_tx,
            state_rx,
            task,
        }
    }

    pub fn record_activity(&self, event: ActivityEvent) {
        // the watcher is gone once the session has expired
        let _ = self.activity_tx.send(event);
    }

    pub fn state(&self) -> InactivityState {
        *self.state_rx.borrow()
    }

    pub fn show_warning(&self) -> bool {
        self.state() == InactivityState::Warning
    }

    pub fn subscribe(&self) -> watch::Receiver<InactivityState> {
        self.state_rx.clone()
    }
}

impl Drop for InactivityMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn watch_activity(
    settings: InactivitySettings,
    mut activity_rx: mpsc::UnboundedReceiver<ActivityEvent>,
    state_tx: watch::Sender<InactivityState>,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
) {
    loop {
        tokio::select! {
            _ = sleep(settings.idle_before_warning()) => {}
            event = activity_rx.recv() => match event {
                Some(event) => {
                    trace!(?event, "Activity, restarting idle countdown");
                    continue;
                }
                None => return,
            },
        }

        debug!("User idle, showing inactivity warning");
        state_tx.send_replace(InactivityState::Warning);

        tokio::select! {
            _ = sleep(settings.warning) => {
                expire(&state_tx, storage.as_ref(), navigator.as_ref());
                return;
            }
            event = activity_rx.recv() => match event {
                Some(event) => {
                    trace!(?event, "Activity during warning, logout cancelled");
                    state_tx.send_replace(InactivityState::Active);
                }
                None => return,
            },
        }
    }
}

fn expire(
    state_tx: &watch::Sender<InactivityState>,
    storage: &dyn SessionStorage,
    navigator: &dyn Navigator,
) {
    info!("User disconnected for inactivity");
    state_tx.send_replace(InactivityState::Expired);

    if let Err(e) = storage.clear() {
        error!("Failed to clear session storage: {}", e);
    }

    navigator.push(HOME_ROUTE);
}
