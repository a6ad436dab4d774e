use std::sync::{Arc, Mutex};

use edx_core::model::Account;
use services::{
    CookieManager, DownloadWorkerController, FailureKind, ProfileAnalytics, ProfileEvent,
    ProfileInteractor, ProfileNotifier, ProfileServiceError,
};
use storage::repository::ProfileCache;
use tokio::sync::{broadcast, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::resources::{ResourceManager, StringKey};
use crate::vm::{UiMessage, UiState};

/// Collaborators a [`ProfileViewModel`] talks to.
#[derive(Clone)]
pub struct ProfileDeps {
    pub interactor: Arc<dyn ProfileInteractor>,
    pub cache: Arc<dyn ProfileCache>,
    pub resources: Arc<dyn ResourceManager>,
    pub notifier: ProfileNotifier,
    pub cookies: Arc<dyn CookieManager>,
    pub downloads: Arc<dyn DownloadWorkerController>,
    pub analytics: Arc<dyn ProfileAnalytics>,
}

/// Screen-scoped coordinator for the learner's profile.
///
/// Reconciles the cached account with a fresh fetch and publishes the result
/// as a [`UiState`], plus a transient [`UiMessage`] on failure. State is only
/// written from this type; views observe it through the `subscribe_*` receivers.
pub struct ProfileViewModel {
    inner: Arc<Inner>,
    notifier: ProfileNotifier,
    listener: Mutex<Option<Listener>>,
}

struct Inner {
    interactor: Arc<dyn ProfileInteractor>,
    cache: Arc<dyn ProfileCache>,
    resources: Arc<dyn ResourceManager>,
    cookies: Arc<dyn CookieManager>,
    downloads: Arc<dyn DownloadWorkerController>,
    analytics: Arc<dyn ProfileAnalytics>,
    state: watch::Sender<UiState<Account>>,
    message: watch::Sender<Option<UiMessage>>,
    success_logout: watch::Sender<Option<bool>>,
}

struct Listener {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ProfileViewModel {
    #[must_use]
    pub fn new(deps: ProfileDeps) -> Self {
        let ProfileDeps {
            interactor,
            cache,
            resources,
            notifier,
            cookies,
            downloads,
            analytics,
        } = deps;

        let inner = Inner {
            interactor,
            cache,
            resources,
            cookies,
            downloads,
            analytics,
            state: watch::Sender::new(UiState::Loading),
            message: watch::Sender::new(None),
            success_logout: watch::Sender::new(None),
        };

        Self {
            inner: Arc::new(inner),
            notifier,
            listener: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn ui_state(&self) -> UiState<Account> {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<UiState<Account>> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn ui_message(&self) -> Option<UiMessage> {
        self.inner.message.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_message(&self) -> watch::Receiver<Option<UiMessage>> {
        self.inner.message.subscribe()
    }

    /// Consume the pending message, if any.
    pub fn take_message(&self) -> Option<UiMessage> {
        let mut taken = None;
        self.inner.message.send_if_modified(|current| {
            taken = current.take();
            taken.is_some()
        });
        taken
    }

    /// `Some(true)` once a logout has gone through; `None` until then.
    #[must_use]
    pub fn success_logout(&self) -> Option<bool> {
        *self.inner.success_logout.borrow()
    }

    #[must_use]
    pub fn subscribe_logout(&self) -> watch::Receiver<Option<bool>> {
        self.inner.success_logout.subscribe()
    }

    /// Show the cached profile (if any) and refresh it from the server.
    pub async fn load_account(&self) {
        self.inner.load_account().await;
    }

    /// Revoke the session and tear down local session state.
    pub async fn logout(&self) {
        self.inner.logout().await;
    }

    /// Start reacting to [`ProfileEvent::AccountUpdated`]. Call when the screen becomes visible.
    ///
    /// Idempotent while started. Needs a Tokio runtime on the calling thread.
    pub fn on_start(&self) {
        let Ok(mut slot) = self.listener.lock() else {
            return;
        };
        if slot.as_ref().is_some_and(|listener| !listener.handle.is_finished()) {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime; profile updates will not be observed");
            return;
        };

        let events = self.notifier.subscribe();
        let (stop, stop_rx) = oneshot::channel();
        let handle = runtime.spawn(listen(Arc::clone(&self.inner), events, stop_rx));
        *slot = Some(Listener { stop, handle });
        debug!("profile listener started");
    }

    /// Stop reacting to notifications. Call when the screen is hidden or destroyed.
    pub fn on_stop(&self) {
        let listener = match self.listener.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(listener) = listener {
            // The task may already be gone; that is fine.
            let _ = listener.stop.send(());
            debug!("profile listener stopped");
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.listener
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|l| !l.handle.is_finished()))
            .unwrap_or(false)
    }
}

impl Drop for ProfileViewModel {
    fn drop(&mut self) {
        self.on_stop();
    }
}

async fn listen(
    inner: Arc<Inner>,
    mut events: broadcast::Receiver<ProfileEvent>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            event = events.recv() => match event {
                Ok(ProfileEvent::AccountUpdated) => inner.load_account().await,
                Ok(ProfileEvent::AccountDeactivated) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Missed updates collapse into a single reload.
                    debug!(skipped, "profile events lagged");
                    inner.load_account().await;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

impl Inner {
    async fn load_account(&self) {
        let cached = match self.cache.profile().await {
            Ok(cached) => cached,
            Err(err) => {
                warn!(%err, "profile cache unreadable");
                None
            }
        };

        match cached {
            Some(account) => publish(&self.state, UiState::Data(account)),
            None => publish(&self.state, UiState::Loading),
        }

        match self.interactor.get_account().await {
            Ok(account) => {
                if let Err(err) = self.cache.set_profile(&account).await {
                    warn!(%err, "failed to cache profile");
                }
                publish(&self.state, UiState::Data(account));
                publish(&self.message, None);
            }
            Err(err) => {
                warn!(%err, kind = ?err.kind(), "account fetch failed");
                publish(&self.message, Some(self.error_message(&err)));
            }
        }
    }

    async fn logout(&self) {
        info!("logging out");
        self.downloads.cancel_work().await;

        match self.interactor.logout().await {
            Ok(()) => {
                self.cookies.clear_web_view_cookie();
                if let Err(err) = self.cache.clear().await {
                    warn!(%err, "failed to clear cached profile");
                }
                self.analytics.logout_event(false);
                publish(&self.message, None);
                publish(&self.success_logout, Some(true));
            }
            Err(err) => {
                warn!(%err, kind = ?err.kind(), "logout failed");
                publish(&self.message, Some(self.error_message(&err)));
            }
        }
    }

    fn error_message(&self, err: &ProfileServiceError) -> UiMessage {
        let key = match err.kind() {
            FailureKind::Connectivity => StringKey::ErrorNoConnection,
            FailureKind::Generic => StringKey::ErrorUnknown,
        };
        UiMessage::SnackBar(self.resources.string(key))
    }
}

/// Replace the value and wake observers only when it actually changed.
pub(crate) fn publish<T: PartialEq>(sender: &watch::Sender<T>, next: T) {
    sender.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
}
