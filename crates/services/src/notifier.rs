use tokio::sync::broadcast;
use tracing::debug;

/// Signals other screens publish when the account changes under them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileEvent {
    AccountUpdated,
    AccountDeactivated,
}

/// Pub/sub hub for [`ProfileEvent`]s. Cloning shares the same channel.
#[derive(Clone)]
pub struct ProfileNotifier {
    sender: broadcast::Sender<ProfileEvent>,
}

impl ProfileNotifier {
    const CAPACITY: usize = 16;

    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::CAPACITY);
        Self { sender }
    }

    /// Publish an event to every current subscriber.
    ///
    /// Events sent while nobody listens are dropped.
    pub fn send(&self, event: ProfileEvent) {
        if self.sender.send(event).is_err() {
            debug!(?event, "profile event dropped; no subscribers");
        }
    }

    /// Receive events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ProfileEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ProfileNotifier {
    fn default() -> Self {
        Self::new()
    }
}
