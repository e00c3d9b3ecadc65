//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::{watch, Notify, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::services::{PanelController, ServiceContext};
use crate::traits::{AdminSession, Notifier, RecordStore};
use crate::types::{Notification, RecordCategory, ReviewRecord, StoredDocument};

// ===== Gate =====

/// Holds store calls open until released
pub struct Gate {
    open: watch::Sender<bool>,
    entered: Notify,
    entered_count: AtomicUsize,
}

impl Gate {
    fn new() -> Self {
        Self {
            open: watch::Sender::new(false),
            entered: Notify::new(),
            entered_count: AtomicUsize::new(0),
        }
    }

    async fn pass(&self) {
        let mut rx = self.open.subscribe();
        self.entered_count.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        let _ = rx.wait_for(|open| *open).await;
    }

    /// Wait until at least one call is parked at the gate
    pub async fn wait_entered(&self) {
        while self.entered_count.load(Ordering::SeqCst) == 0 {
            self.entered.notified().await;
        }
    }

    pub fn release(&self) {
        self.open.send_replace(true);
    }
}

// ===== MockRecordStore =====

pub type RecordedUpdate = (RecordCategory, String, String, DateTime<Utc>);

pub struct MockRecordStore {
    collections: RwLock<HashMap<RecordCategory, Vec<StoredDocument>>>,
    /// 如果 Some，对应分类的 list_all 返回此错误
    list_errors: RwLock<HashMap<RecordCategory, String>>,
    /// 如果 Some，update_status 返回此错误
    update_error: RwLock<Option<String>>,
    updates: RwLock<Vec<RecordedUpdate>>,
    list_gate: RwLock<Option<Arc<Gate>>>,
    update_gate: RwLock<Option<Arc<Gate>>>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            list_errors: RwLock::new(HashMap::new()),
            update_error: RwLock::new(None),
            updates: RwLock::new(Vec::new()),
            list_gate: RwLock::new(None),
            update_gate: RwLock::new(None),
        }
    }

    pub async fn push(&self, category: RecordCategory, doc: StoredDocument) {
        self.collections
            .write()
            .await
            .entry(category)
            .or_default()
            .push(doc);
    }

    pub async fn set_list_error(&self, category: RecordCategory, err: Option<String>) {
        let mut errors = self.list_errors.write().await;
        match err {
            Some(msg) => errors.insert(category, msg),
            None => errors.remove(&category),
        };
    }

    pub async fn set_update_error(&self, err: Option<String>) {
        *self.update_error.write().await = err;
    }

    pub async fn updates(&self) -> Vec<RecordedUpdate> {
        self.updates.read().await.clone()
    }

    pub async fn hold_lists(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::new());
        *self.list_gate.write().await = Some(Arc::clone(&gate));
        gate
    }

    pub async fn hold_updates(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::new());
        *self.update_gate.write().await = Some(Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn list_all(&self, category: RecordCategory) -> CoreResult<Vec<StoredDocument>> {
        let gate = self.list_gate.read().await.clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        if let Some(msg) = self.list_errors.read().await.get(&category) {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(self
            .collections
            .read()
            .await
            .get(&category)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_status(
        &self,
        category: RecordCategory,
        id: &str,
        status: &str,
        updated_at: DateTime<Utc>,
    ) -> CoreResult<()> {
        let gate = self.update_gate.read().await.clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        if let Some(ref msg) = *self.update_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.updates.write().await.push((
            category,
            id.to_string(),
            status.to_string(),
            updated_at,
        ));
        Ok(())
    }
}

// ===== RecordingNotifier =====

pub struct RecordingNotifier {
    messages: RwLock<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
        }
    }

    pub async fn messages(&self) -> Vec<Notification> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.messages.write().await.push(notification);
    }
}

// ===== MockSession =====

pub struct MockSession {
    active: AtomicBool,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdminSession for MockSession {
    async fn is_authenticated(&self) -> bool {
        self.is_active()
    }

    async fn end(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `PanelController`
pub fn create_test_panel() -> (
    PanelController,
    Arc<MockRecordStore>,
    Arc<RecordingNotifier>,
    Arc<MockSession>,
) {
    let store = Arc::new(MockRecordStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let session = Arc::new(MockSession::new());

    let ctx = Arc::new(ServiceContext::new(
        store.clone(),
        notifier.clone(),
        session.clone(),
    ));

    (PanelController::new(ctx), store, notifier, session)
}

/// Seed one pending-equivalent record per category
pub async fn seed_all_categories(store: &MockRecordStore) {
    let docs = [
        (
            RecordCategory::User,
            StoredDocument::new(
                "user-1",
                json!({ "firstName": "Grace", "lastName": "Hopper", "status": "not-approved" }),
            ),
        ),
        (
            RecordCategory::ConsultantApplication,
            StoredDocument::new(
                "consultant-1",
                json!({ "fullName": "Dr. Quinn", "specialization": "Imaging", "status": "pending" }),
            ),
        ),
        (
            RecordCategory::ConsultationBooking,
            StoredDocument::new(
                "booking-1",
                json!({ "clientName": "Alice Smith", "email": "alice@example.com", "serviceType": "Calibration" }),
            ),
        ),
        (
            RecordCategory::SupplierDevice,
            StoredDocument::new("device-1", json!({ "deviceName": "Ultrasound", "type": "basic" })),
        ),
        (
            RecordCategory::Order,
            StoredDocument::new("order-1", json!({ "fullName": "Bob", "total": 99.5 })),
        ),
        (
            RecordCategory::Feedback,
            StoredDocument::new("feedback-1", json!({ "name": "Cy", "rating": 5 })),
        ),
        (
            RecordCategory::FeatureSuggestion,
            StoredDocument::new(
                "suggestion-1",
                json!({ "name": "Di", "suggestion": "Export CSV", "status": "pending" }),
            ),
        ),
    ];
    for (category, doc) in docs {
        store.push(category, doc).await;
    }
}

/// Build a record with only a status
pub fn record(category: RecordCategory, id: &str, status: Option<&str>) -> ReviewRecord {
    let data = status.map_or_else(|| json!({}), |s| json!({ "status": s }));
    ReviewRecord::from_document(category, StoredDocument::new(id, data))
        .expect("fixture record must normalize")
}

/// Build a booking with search fields and status
pub fn booking(
    id: &str,
    client_name: Option<&str>,
    email: Option<&str>,
    service_type: Option<&str>,
    status: Option<&str>,
) -> ReviewRecord {
    let data = json!({
        "clientName": client_name,
        "email": email,
        "serviceType": service_type,
        "status": status,
    });
    ReviewRecord::from_document(
        RecordCategory::ConsultationBooking,
        StoredDocument::new(id, data),
    )
    .expect("fixture booking must normalize")
}
