use tokio::sync::broadcast;
use tracing::debug;

/// What happened to the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChange {
    SignedUp,
    LoggedIn,
    LoggedOut,
}

/// Publisher side of the "user changed" signal.
///
/// Cloning shares the underlying channel, so the credential store and the
/// session gate can each hold one.
#[derive(Debug, Clone)]
pub struct UserChangeNotifier {
    tx: broadcast::Sender<UserChange>,
}

impl UserChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Publish a change. Having no subscribers is fine.
    pub fn notify(&self, change: UserChange) {
        if self.tx.send(change).is_err() {
            debug!(?change, "user change with no subscribers");
        }
    }

    pub fn subscribe(&self) -> UserChangeSubscription {
        UserChangeSubscription::new(self.tx.subscribe())
    }
}

impl Default for UserChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed subscription for user changes.
pub struct UserChangeSubscription {
    rx: broadcast::Receiver<UserChange>,
}

impl UserChangeSubscription {
    pub fn new(rx: broadcast::Receiver<UserChange>) -> Self {
        Self { rx }
    }

    /// Receive the next change. Returns `None` once every notifier is gone.
    pub async fn next(&mut self) -> Option<UserChange> {
        loop {
            match self.rx.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("user change subscription lagged by {n} messages");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
