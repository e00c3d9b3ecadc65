//! Notification sink Trait

use async_trait::async_trait;

use crate::types::Notification;

/// Delivers user-visible notifications (toasts, status lines, ...)
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}
