#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the `AppState` lifecycle.

use std::sync::Arc;

use async_trait::async_trait;
use review_desk_app::adapters::{FlagSession, InMemoryRecordStore};
use review_desk_app::config::{AppConfig, CollectionNames};
use review_desk_app::AppStateBuilder;
use review_desk_core::error::CoreError;
use review_desk_core::traits::Notifier;
use review_desk_core::types::{
    Notification, NotificationLevel, RecordCategory, ReviewAction, StatusFilter,
};
use tokio::sync::RwLock;

const SEED: &str = r#"{
    "users": [
        { "id": "u1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com", "status": "not-approved" },
        { "id": "u2", "firstName": "Alan", "lastName": "Turing", "status": "approved" }
    ],
    "consultationBookings": [
        { "id": "b1", "clientName": "John Doe", "email": "john@example.com", "serviceType": "Installation" },
        { "id": "b2", "name": "Mary Major", "email": "mary@clinic.org", "consultationType": "Audit", "status": "accepted" }
    ],
    "orders": [
        { "id": "o1", "fullName": "Bob", "total": "120.50" }
    ]
}"#;

// ===== Mock Implementations =====

struct RecordingNotifier {
    messages: RwLock<Vec<Notification>>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
        }
    }

    async fn messages(&self) -> Vec<Notification> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.messages.write().await.push(notification);
    }
}

fn seeded_store() -> Arc<InMemoryRecordStore> {
    Arc::new(
        InMemoryRecordStore::from_json_str(SEED, CollectionNames::default())
            .expect("seed must parse"),
    )
}

// ===== Builder =====

#[test]
fn test_build_without_record_store_fails() {
    let result = AppStateBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn test_build_with_defaults() {
    let state = AppStateBuilder::new()
        .record_store(seeded_store())
        .build()
        .unwrap();

    assert_eq!(state.config, AppConfig::default());
    assert!(state.is_authenticated().await);
    assert!(!state.panel.is_ready().await);
    assert_eq!(state.panel.booking_view().await.0, StatusFilter::All);
}

#[tokio::test]
async fn test_config_sets_initial_booking_filter() {
    let config = AppConfig::from_toml_str("[booking]\ndefault_status_filter = \"pending\"\n")
        .unwrap();
    let state = AppStateBuilder::new()
        .record_store(seeded_store())
        .config(config)
        .build()
        .unwrap();

    state.run_startup().await.unwrap();

    let (filter, search) = state.panel.booking_view().await;
    assert_eq!(filter, StatusFilter::Only("pending".to_string()));
    assert!(search.is_empty());

    let bookings = state.panel.filtered_bookings().await.unwrap();
    let ids: Vec<&str> = bookings.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["b1"]);
}

// ===== Startup =====

#[tokio::test]
async fn test_startup_loads_panel() {
    let state = AppStateBuilder::new()
        .record_store(seeded_store())
        .build()
        .unwrap();

    state.run_startup().await.unwrap();

    assert!(state.panel.is_ready().await);
    let summary = state.panel.summary().await.unwrap();
    let users = summary.get(RecordCategory::User).unwrap();
    assert_eq!((users.total, users.pending_count), (2, 1));
    let orders = summary.get(RecordCategory::Order).unwrap();
    assert_eq!((orders.total, orders.pending_count), (1, 1));
    assert_eq!(summary.get(RecordCategory::Feedback).unwrap().total, 0);
}

#[tokio::test]
async fn test_startup_requires_session() {
    let session = Arc::new(FlagSession::inactive());
    let state = AppStateBuilder::new()
        .record_store(seeded_store())
        .session(session.clone())
        .build()
        .unwrap();

    let err = state.run_startup().await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationError(_)));
    assert!(!state.panel.is_ready().await);

    session.sign_in();
    assert!(state.is_authenticated().await);
    state.run_startup().await.unwrap();
    assert!(state.panel.is_ready().await);
}

// ===== Review flow =====

#[tokio::test]
async fn test_accept_booking_persists_and_notifies() {
    let store = seeded_store();
    let notifier = Arc::new(RecordingNotifier::new());
    let state = AppStateBuilder::new()
        .record_store(store.clone())
        .notifier(notifier.clone())
        .build()
        .unwrap();
    state.run_startup().await.unwrap();

    let patched = state
        .panel
        .apply_action(RecordCategory::ConsultationBooking, "b1", ReviewAction::Approve)
        .await
        .unwrap();
    assert_eq!(patched.status.as_deref(), Some("accepted"));

    let stored = store
        .get(RecordCategory::ConsultationBooking, "b1")
        .await
        .unwrap();
    assert_eq!(stored.data["status"], "accepted");
    assert!(stored.data["updatedAt"].is_string());

    let stats = state.panel.booking_stats().await.unwrap();
    assert_eq!((stats.pending, stats.accepted), (0, 2));

    let messages = notifier.messages().await;
    assert_eq!(
        messages,
        vec![Notification::success(
            "Consultation booking accepted successfully!"
        )]
    );
}

#[tokio::test]
async fn test_approving_approved_user_is_refused() {
    let store = seeded_store();
    let notifier = Arc::new(RecordingNotifier::new());
    let state = AppStateBuilder::new()
        .record_store(store.clone())
        .notifier(notifier.clone())
        .build()
        .unwrap();
    state.run_startup().await.unwrap();

    let err = state
        .panel
        .apply_action(RecordCategory::User, "u2", ReviewAction::Approve)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidTransition { .. }));

    let stored = store.get(RecordCategory::User, "u2").await.unwrap();
    assert_eq!(stored.data["status"], "approved");
    assert!(stored.data.get("updatedAt").is_none());

    let messages = notifier.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_refresh_sees_external_changes() {
    let store = seeded_store();
    let state = AppStateBuilder::new()
        .record_store(store.clone())
        .build()
        .unwrap();
    state.run_startup().await.unwrap();

    store
        .insert(
            RecordCategory::Feedback,
            review_desk_core::types::StoredDocument::new(
                "f1",
                serde_json::json!({ "name": "Cy", "rating": 4, "message": "Great" }),
            ),
        )
        .await;
    state.panel.refresh().await.unwrap();

    let feedback = state.panel.records(RecordCategory::Feedback).await.unwrap();
    assert_eq!(feedback.len(), 1);
}

#[tokio::test]
async fn test_shutdown_ends_session_and_clears_panel() {
    let state = AppStateBuilder::new()
        .record_store(seeded_store())
        .build()
        .unwrap();
    state.run_startup().await.unwrap();

    state.shutdown().await;

    assert!(!state.is_authenticated().await);
    assert!(!state.panel.is_ready().await);
    assert!(state.panel.summary().await.is_none());
}
