//! Session change broadcasting.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::entities::UserProfile;

/// Publisher side of the session-change subscription.
///
/// Holds the latest signed-in user; every [`AuthSubscription`] observes it.
#[derive(Debug, Clone)]
pub struct SessionWatch {
    tx: Arc<watch::Sender<Option<UserProfile>>>,
}

impl SessionWatch {
    /// Creates watch in signed-out state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Publishes new session state.
    pub fn publish(&self, user: Option<UserProfile>) {
        self.tx.send_replace(user);
    }

    /// Returns latest published state.
    #[must_use]
    pub fn current(&self) -> Option<UserProfile> {
        self.tx.borrow().clone()
    }

    /// Opens a new subscription.
    #[must_use]
    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SessionWatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellable session-change subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct AuthSubscription {
    rx: watch::Receiver<Option<UserProfile>>,
}

impl AuthSubscription {
    /// Waits until a change is published without reading it.
    ///
    /// Cancel safe. Returns `false` once the publisher is gone.
    pub async fn wait(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Returns the latest state and marks every change so far as seen.
    pub fn take_latest(&mut self) -> Option<UserProfile> {
        self.rx.borrow_and_update().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn test_subscription_sees_current_state() {
        let watch = SessionWatch::new();
        watch.publish(Some(UserProfile::new("u1", "ana@pchela.com")));

        let mut subscription = watch.subscribe();
        assert_eq!(subscription.take_latest().map(|u| u.uid), Some("u1".to_string()));
    }

    #[test]
    fn test_wait_pending_until_publish() {
        let watch = SessionWatch::new();
        let mut subscription = watch.subscribe();

        let mut wait = task::spawn(subscription.wait());
        assert_pending!(wait.poll());

        watch.publish(Some(UserProfile::new("u2", "luz@pchela.com")));
        assert!(wait.is_woken());
        assert!(assert_ready!(wait.poll()));
        drop(wait);

        let update = subscription.take_latest();
        assert_eq!(update.map(|u| u.uid), Some("u2".to_string()));
    }

    #[test]
    fn test_drop_releases_subscription() {
        let watch = SessionWatch::new();
        let subscription = watch.subscribe();
        assert_eq!(watch.tx.receiver_count(), 1);

        drop(subscription);
        assert_eq!(watch.tx.receiver_count(), 0);
    }

    #[test]
    fn test_take_latest_coalesces_bursts() {
        let watch = SessionWatch::new();
        let mut subscription = watch.subscribe();

        watch.publish(Some(UserProfile::new("u3", "eva@pchela.com")));
        watch.publish(None);
        assert_eq!(subscription.take_latest(), None);

        let mut wait = task::spawn(subscription.wait());
        assert_pending!(wait.poll());
    }

    #[tokio::test]
    async fn test_wait_ends_when_publisher_dropped() {
        let watch = SessionWatch::new();
        let mut subscription = watch.subscribe();
        drop(watch);

        assert!(!subscription.wait().await);
    }
}
