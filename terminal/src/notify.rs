//! # Notifiers
//!
//! [`Notifier`] implementations: structured log lines for the headless
//! binary, and a channel for a UI or test consumer.

use async_channel::{Receiver, Sender};
use lib_core::service::{Notification, NotificationLevel, Notifier};
use tracing::{error, info, warn};

/// Writes notifications as log lines under the `notification` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => info!(target: "notification", "{}", notification.message),
            NotificationLevel::Success => info!(target: "notification", success = true, "{}", notification.message),
            NotificationLevel::Error => error!(target: "notification", "{}", notification.message),
        }
    }
}

/// Forwards notifications over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<Notification>) -> Self {
        Self { tx }
    }

    /// Notifier plus the receiving end of its channel
    pub fn unbounded() -> (Self, Receiver<Notification>) {
        let (tx, rx) = async_channel::unbounded();
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.try_send(notification) {
            warn!(error = %e, "Notification dropped");
        }
    }
}
