use crate::core::{Notification, Notifier};
use std::sync::{Arc, Mutex, MutexGuard};

/// Logs notifications and prints them to stderr, the way a terminal shows a toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::debug!("Notification: {}", notification.message);
        eprintln!("❌ {}", notification.message);
    }
}

/// Keeps every notification in a shared buffer. Clones observe the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.buffer().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.buffer().iter().map(|n| n.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    // A panic while holding the lock cannot leave a Vec half-written.
    fn buffer(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.buffer().push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_buffer() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        notifier.notify(&Notification::new("Failed to add product"));

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.notifications()[0].message, "Failed to add product");
        assert_eq!(notifier.messages(), vec!["Failed to add product".to_string()]);
    }
}
