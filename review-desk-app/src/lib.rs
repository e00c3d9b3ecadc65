//! Platform-agnostic application bootstrap for the review desk.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection)
//! and the default adapters every frontend can fall back to.

pub mod adapters;
pub mod config;

use std::sync::Arc;

use review_desk_core::error::{CoreError, CoreResult};
use review_desk_core::services::{LoadOutcome, PanelController, ServiceContext};
use review_desk_core::traits::{AdminSession, Notifier, RecordStore};

use crate::adapters::{FlagSession, LogNotifier};
use crate::config::AppConfig;

/// Platform-agnostic application state.
///
/// Holds the panel controller and the `ServiceContext`. Every frontend
/// constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all adapters)
    pub ctx: Arc<ServiceContext>,
    /// Review panel
    pub panel: Arc<PanelController>,
    /// Effective configuration
    pub config: AppConfig,
}

impl AppState {
    /// Open the panel: load every category once.
    ///
    /// Refuses to start without an admin session. A load failure has already
    /// been reported to the admin by the panel and is returned as-is.
    pub async fn run_startup(&self) -> CoreResult<()> {
        if !self.ctx.session.is_authenticated().await {
            return Err(CoreError::ValidationError(
                "Admin session is not authenticated".to_string(),
            ));
        }

        match self.panel.load().await {
            Ok(LoadOutcome::Committed) => {
                if let Some(summary) = self.panel.summary().await {
                    let pending: usize = summary.tiles.iter().map(|t| t.pending_count).sum();
                    log::info!("Review desk ready: {pending} record(s) awaiting review");
                }
                Ok(())
            }
            Ok(LoadOutcome::Superseded) => {
                log::debug!("Startup load overtaken by a newer load");
                Ok(())
            }
            Err(e) => {
                log::error!("Review desk startup failed: {e}");
                Err(e)
            }
        }
    }

    /// Whether the admin session is active
    pub async fn is_authenticated(&self) -> bool {
        self.ctx.session.is_authenticated().await
    }

    /// Close the panel and end the admin session
    pub async fn shutdown(&self) {
        self.panel.logout().await;
        log::info!("Review desk closed");
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `record_store` — where the reviewed documents live
///
/// # Optional
/// - `notifier` — defaults to `LogNotifier`
/// - `session` — defaults to an active `FlagSession`
/// - `config` — defaults to `AppConfig::default()`
pub struct AppStateBuilder {
    record_store: Option<Arc<dyn RecordStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    session: Option<Arc<dyn AdminSession>>,
    config: Option<AppConfig>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            record_store: None,
            notifier: None,
            session: None,
            config: None,
        }
    }

    #[must_use]
    pub fn record_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.record_store = Some(store);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn session(mut self, session: Arc<dyn AdminSession>) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let record_store = self
            .record_store
            .ok_or_else(|| CoreError::ValidationError("record_store is required".to_string()))?;
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(LogNotifier::new()));
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(FlagSession::active()));
        let config = self.config.unwrap_or_default();

        let ctx = Arc::new(ServiceContext::new(record_store, notifier, session));
        let panel = Arc::new(PanelController::with_booking_filter(
            Arc::clone(&ctx),
            config.booking_status_filter(),
        ));

        Ok(AppState { ctx, panel, config })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
