//! Notifier that writes to the log facade

use async_trait::async_trait;

use review_desk_core::traits::Notifier;
use review_desk_core::types::{Notification, NotificationLevel};

/// Forwards notifications to `log`; used when the frontend has no toast layer
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => log::info!("[notify] {}", notification.message),
            NotificationLevel::Error => log::error!("[notify] {}", notification.message),
        }
    }
}
