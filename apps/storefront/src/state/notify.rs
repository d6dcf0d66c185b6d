//! # User Notifications
//!
//! The toast channel. Cart operations report each failure kind here with
//! a fixed, user-facing message.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Notification             Message shown to the shopper                  │
//! │  ─────────────────────    ──────────────────────────────────────────    │
//! │  AddProductFailed         Erro na adição do produto                     │
//! │  OutOfStock               Quantidade solicitada fora de estoque         │
//! │  RemoveProductFailed      Erro na remoção do produto                    │
//! │  UpdateAmountFailed       Erro na alteração de quantidade do produto    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// A failure kind the shopper is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Notification {
    AddProductFailed,
    OutOfStock,
    RemoveProductFailed,
    UpdateAmountFailed,
}

impl Notification {
    /// Returns the message shown to the shopper.
    pub fn message(&self) -> &'static str {
        match self {
            Notification::AddProductFailed => "Erro na adição do produto",
            Notification::OutOfStock => "Quantidade solicitada fora de estoque",
            Notification::RemoveProductFailed => "Erro na remoção do produto",
            Notification::UpdateAmountFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Sink for user notifications.
pub trait Notifier: Send + Sync {
    /// Shows `notification` to the user.
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        warn!(kind = ?notification, "{}", notification.message());
    }
}

/// Forwards notifications to a channel, for a UI task to display.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiver the UI reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            trace!(kind = ?notification, "Notification dropped, receiver closed");
        }
    }
}

/// No-op notifier for testing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _notification: Notification) {}
}
