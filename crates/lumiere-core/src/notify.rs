//! Fire-and-forget user notifications
//!
//! Operations report their outcome once through a [`Notifier`]; the TUI
//! turns the stream into toasts, the CLI prints it. Nothing is queued for
//! retry or persisted.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Sending half of the notification stream
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier and the receiver that drains it
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(Level::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(Level::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(Level::Error, message.into());
    }

    fn send(&self, level: Level, message: String) {
        // A dropped receiver just means nobody is watching anymore
        let _ = self.tx.send(Notification {
            level,
            message,
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_arrive_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.success("Brand created successfully");
        notifier.error("Name is required");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level, Level::Success);
        let second = rx.try_recv().unwrap();
        assert_eq!(second.message, "Name is required");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.info("nobody listening");
    }
}
