//! 业务逻辑服务层

pub mod aggregator;
pub mod booking_filter;
mod panel_controller;
pub mod status_engine;

pub use panel_controller::{LoadOutcome, PanelController, PanelSnapshot};
pub use status_engine::Transition;

use std::sync::Arc;

use crate::error::CoreError;
use crate::traits::{AdminSession, Notifier, RecordStore};
use crate::types::Notification;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的实现。
pub struct ServiceContext {
    /// 记录存储
    pub record_store: Arc<dyn RecordStore>,
    /// 通知渠道
    pub notifier: Arc<dyn Notifier>,
    /// 管理员会话
    pub session: Arc<dyn AdminSession>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        record_store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        session: Arc<dyn AdminSession>,
    ) -> Self {
        Self {
            record_store,
            notifier,
            session,
        }
    }

    /// Send a notification to the admin
    pub async fn notify(&self, notification: Notification) {
        self.notifier.notify(notification).await;
    }

    /// Log an error at the level its kind calls for, then notify the admin once.
    pub async fn report_error(&self, err: &CoreError, message: impl Into<String>) {
        if err.is_expected() {
            log::warn!("{err}");
        } else {
            log::error!("{err}");
        }
        self.notify(Notification::error(message)).await;
    }
}
