//! Panel Controller
//!
//! Session-scoped owner of the in-memory record lists. Loads every category
//! concurrently, dispatches review actions through the Status Engine and the
//! record store, and patches local state after each successful write.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::try_join_all;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{aggregator, booking_filter, status_engine, ServiceContext};
use crate::types::{
    BookingStats, DashboardSummary, Notification, RecordCategory, ReviewAction, ReviewRecord,
    StatusFilter,
};

const LOAD_FAILED_MESSAGE: &str = "Failed to load data from Database.";
const REFRESHED_MESSAGE: &str = "Data refreshed successfully!";

/// How a load that did not fail ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched lists replaced the snapshot
    Committed,
    /// A newer load or `close` overtook this one; nothing was committed
    Superseded,
}

/// One complete load: the record list of every category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSnapshot {
    lists: HashMap<RecordCategory, Vec<ReviewRecord>>,
}

impl PanelSnapshot {
    /// Records of a category, in store order (feature suggestions newest first)
    #[must_use]
    pub fn records(&self, category: RecordCategory) -> &[ReviewRecord] {
        self.lists.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Replace the list of a category
    pub fn insert(&mut self, category: RecordCategory, records: Vec<ReviewRecord>) {
        self.lists.insert(category, records);
    }

    fn find(&self, category: RecordCategory, id: &str) -> Option<&ReviewRecord> {
        self.records(category).iter().find(|r| r.id == id)
    }

    /// Swap in a patched copy of a record; `false` if it is no longer present.
    fn replace(&mut self, record: ReviewRecord) -> bool {
        let Some(slot) = self
            .lists
            .get_mut(&record.category)
            .and_then(|list| list.iter_mut().find(|r| r.id == record.id))
        else {
            return false;
        };
        *slot = record;
        true
    }
}

impl FromIterator<(RecordCategory, Vec<ReviewRecord>)> for PanelSnapshot {
    fn from_iter<I: IntoIterator<Item = (RecordCategory, Vec<ReviewRecord>)>>(iter: I) -> Self {
        Self {
            lists: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Default)]
struct PanelState {
    snapshot: Option<PanelSnapshot>,
    status_filter: StatusFilter,
    search_term: String,
    loading: bool,
}

type MutationKey = (RecordCategory, String);

/// Releases a record's in-flight slot on every exit path
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<MutationKey>>,
    key: MutationKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Session-scoped review panel
pub struct PanelController {
    ctx: Arc<ServiceContext>,
    state: RwLock<PanelState>,
    in_flight: Mutex<HashSet<MutationKey>>,
    /// Bumped by `close`; work started under an older session is discarded
    session_generation: AtomicU64,
    /// Bumped by every load; only the newest load may commit
    load_sequence: AtomicU64,
}

impl PanelController {
    /// Create a panel controller with no data loaded
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self::with_booking_filter(ctx, StatusFilter::All)
    }

    /// Create a panel controller with an initial booking status filter
    #[must_use]
    pub fn with_booking_filter(ctx: Arc<ServiceContext>, status_filter: StatusFilter) -> Self {
        Self {
            ctx,
            state: RwLock::new(PanelState {
                status_filter,
                ..PanelState::default()
            }),
            in_flight: Mutex::new(HashSet::new()),
            session_generation: AtomicU64::new(0),
            load_sequence: AtomicU64::new(0),
        }
    }

    // ===== Loading =====

    /// Load every category.
    ///
    /// All seven retrievals run concurrently and are joined before anything
    /// is committed. Any failure leaves the previous snapshot untouched and
    /// notifies the admin once. A load overtaken by a newer load or by
    /// `close` is dropped silently, whatever its own result, and reports
    /// `LoadOutcome::Superseded`.
    pub async fn load(&self) -> CoreResult<LoadOutcome> {
        let generation = self.session_generation.load(Ordering::SeqCst);
        let sequence = self.load_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.loading = true;

        let result = self.fetch_all().await;

        let mut state = self.state.write().await;
        if !self.is_current_load(generation, sequence) {
            log::debug!("Discarding superseded load #{sequence}");
            return Ok(LoadOutcome::Superseded);
        }
        state.loading = false;

        match result {
            Ok(snapshot) => {
                log::info!(
                    "Loaded {} records across {} categories",
                    RecordCategory::ALL
                        .iter()
                        .map(|c| snapshot.records(*c).len())
                        .sum::<usize>(),
                    RecordCategory::ALL.len()
                );
                state.snapshot = Some(snapshot);
                Ok(LoadOutcome::Committed)
            }
            Err(e) => {
                drop(state);
                self.ctx.report_error(&e, LOAD_FAILED_MESSAGE).await;
                Err(e)
            }
        }
    }

    /// Re-run the full load; announces success once, and only if this
    /// refresh's own load committed
    pub async fn refresh(&self) -> CoreResult<LoadOutcome> {
        let outcome = self.load().await?;
        if outcome == LoadOutcome::Committed {
            self.ctx.notify(Notification::success(REFRESHED_MESSAGE)).await;
        }
        Ok(outcome)
    }

    async fn fetch_all(&self) -> CoreResult<PanelSnapshot> {
        let store = &self.ctx.record_store;
        let lists = try_join_all(RecordCategory::ALL.into_iter().map(|category| async move {
            let documents = store
                .list_all(category)
                .await
                .map_err(|e| CoreError::LoadFailure {
                    category,
                    message: e.to_string(),
                })?;
            let mut records = documents
                .into_iter()
                .map(|doc| ReviewRecord::from_document(category, doc))
                .collect::<CoreResult<Vec<_>>>()
                .map_err(|e| CoreError::LoadFailure {
                    category,
                    message: e.to_string(),
                })?;
            if category == RecordCategory::FeatureSuggestion {
                // 最新的建议排在前面，没有时间戳的排最后
                records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            Ok::<_, CoreError>((category, records))
        }))
        .await?;

        Ok(lists.into_iter().collect())
    }

    fn is_current_load(&self, generation: u64, sequence: u64) -> bool {
        self.session_generation.load(Ordering::SeqCst) == generation
            && self.load_sequence.load(Ordering::SeqCst) == sequence
    }

    // ===== Review actions =====

    /// Apply a review action to one record.
    ///
    /// Validates through the Status Engine, persists, then patches the
    /// in-memory copy. Returns the patched record. A second action on the
    /// same record while one is still running is refused with
    /// `MutationInFlight`.
    pub async fn apply_action(
        &self,
        category: RecordCategory,
        id: &str,
        action: ReviewAction,
    ) -> CoreResult<ReviewRecord> {
        let _guard = self.begin_mutation(category, id)?;
        let generation = self.session_generation.load(Ordering::SeqCst);

        let current = match self.find_record(category, id).await {
            Ok(record) => record,
            Err(e) => {
                log::warn!("{e}");
                return Err(e);
            }
        };

        let transition =
            match status_engine::apply_transition(category, current.status.as_deref(), action) {
                Ok(t) => t,
                Err(e) => {
                    self.ctx.report_error(&e, e.to_string()).await;
                    return Err(e);
                }
            };

        if let Err(e) = self
            .ctx
            .record_store
            .update_status(category, id, transition.status, transition.updated_at)
            .await
        {
            let err = CoreError::PersistenceFailure {
                category,
                id: id.to_string(),
                message: e.to_string(),
            };
            if self.session_generation.load(Ordering::SeqCst) == generation {
                self.ctx
                    .report_error(&err, format!("Failed to update {category} status."))
                    .await;
            } else {
                log::debug!("Discarding late failure for {category} {id}: {e}");
            }
            return Err(err);
        }

        let patched = current.with_status(transition.status, transition.updated_at);

        {
            let mut state = self.state.write().await;
            if self.session_generation.load(Ordering::SeqCst) != generation {
                log::debug!("Discarding late update for {category} {id}");
                return Ok(patched);
            }
            let replaced = state
                .snapshot
                .as_mut()
                .is_some_and(|snapshot| snapshot.replace(patched.clone()));
            if !replaced {
                log::debug!("{category} {id} vanished from the snapshot before patching");
            }
        }

        log::info!("{category} {id} -> {}", transition.status);
        self.ctx
            .notify(Notification::success(format!(
                "{} {} successfully!",
                capitalize(&category.to_string()),
                transition.status
            )))
            .await;

        Ok(patched)
    }

    fn begin_mutation(&self, category: RecordCategory, id: &str) -> CoreResult<InFlightGuard<'_>> {
        let key = (category, id.to_string());
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(key.clone()) {
            log::warn!("Refusing concurrent update for {category} {id}");
            return Err(CoreError::MutationInFlight {
                category,
                id: id.to_string(),
            });
        }
        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            key,
        })
    }

    async fn find_record(&self, category: RecordCategory, id: &str) -> CoreResult<ReviewRecord> {
        let state = self.state.read().await;
        let snapshot = state.snapshot.as_ref().ok_or(CoreError::NotLoaded)?;
        snapshot
            .find(category, id)
            .cloned()
            .ok_or_else(|| CoreError::RecordNotFound {
                category,
                id: id.to_string(),
            })
    }

    // ===== Session =====

    /// Discard all session state. Work still in flight finishes without
    /// touching the panel.
    pub async fn close(&self) {
        self.session_generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        state.snapshot = None;
        state.loading = false;
        log::info!("Review panel closed");
    }

    /// End the admin session and discard all state
    pub async fn logout(&self) {
        self.ctx.session.end().await;
        self.close().await;
    }

    // ===== Derived views =====

    /// Whether a load is currently running
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Whether a complete snapshot is available
    pub async fn is_ready(&self) -> bool {
        self.state.read().await.snapshot.is_some()
    }

    /// Copy of the current snapshot
    pub async fn snapshot(&self) -> Option<PanelSnapshot> {
        self.state.read().await.snapshot.clone()
    }

    /// Records of one category
    pub async fn records(&self, category: RecordCategory) -> Option<Vec<ReviewRecord>> {
        self.state
            .read()
            .await
            .snapshot
            .as_ref()
            .map(|s| s.records(category).to_vec())
    }

    /// Dashboard tiles
    pub async fn summary(&self) -> Option<DashboardSummary> {
        self.state
            .read()
            .await
            .snapshot
            .as_ref()
            .map(aggregator::summarize_all)
    }

    /// Booking counters for the filter buttons
    pub async fn booking_stats(&self) -> Option<BookingStats> {
        self.state
            .read()
            .await
            .snapshot
            .as_ref()
            .map(|s| booking_filter::booking_stats(s.records(RecordCategory::ConsultationBooking)))
    }

    /// Bookings narrowed by the current status filter and search term
    pub async fn filtered_bookings(&self) -> Option<Vec<ReviewRecord>> {
        let state = self.state.read().await;
        state.snapshot.as_ref().map(|s| {
            booking_filter::filter_bookings(
                s.records(RecordCategory::ConsultationBooking),
                &state.status_filter,
                &state.search_term,
            )
        })
    }

    /// Current booking status filter and search term
    pub async fn booking_view(&self) -> (StatusFilter, String) {
        let state = self.state.read().await;
        (state.status_filter.clone(), state.search_term.clone())
    }

    pub async fn set_booking_status_filter(&self, status_filter: StatusFilter) {
        self.state.write().await.status_filter = status_filter;
    }

    pub async fn set_booking_search(&self, search_term: impl Into<String>) {
        self.state.write().await.search_term = search_term.into();
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
