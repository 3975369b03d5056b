//! Non-blocking user notifications
//!
//! Form components raise toasts through a broadcast channel; the UI layer
//! subscribes and renders them. Sending never blocks and never fails: with
//! no subscriber the notification is only logged.

use shared::{NotificationLevel, NotificationPayload};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Notification fan-out
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<NotificationPayload>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to notifications raised after this call
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationPayload> {
        self.tx.subscribe()
    }

    pub fn notify(&self, payload: NotificationPayload) {
        match payload.level {
            NotificationLevel::Error => tracing::warn!(title = %payload.title, "{}", payload.message),
            _ => tracing::info!(title = %payload.title, "{}", payload.message),
        }
        let _ = self.tx.send(payload);
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationPayload::success(title, message));
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationPayload::error(title, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.success("Upload", "Upload successful!");
        let got = rx.recv().await.unwrap();
        assert_eq!(got.level, NotificationLevel::Success);
        assert_eq!(got.message, "Upload successful!");
    }

    #[test]
    fn test_no_subscriber_is_fine() {
        Notifier::new().error("Upload", "Upload failed.");
    }
}
