//! Aggregator: per-category totals for the dashboard tiles

use crate::services::status_engine::is_pending;
use crate::services::PanelSnapshot;
use crate::types::{CategorySummary, DashboardSummary, RecordCategory, ReviewRecord};

/// Count records and pending-equivalent records of one category
#[must_use]
pub fn summarize(category: RecordCategory, records: &[ReviewRecord]) -> CategorySummary {
    CategorySummary {
        category,
        total: records.len(),
        pending_count: records
            .iter()
            .filter(|r| is_pending(category, r.status.as_deref()))
            .count(),
    }
}

/// Summaries for every category of a loaded snapshot
#[must_use]
pub fn summarize_all(snapshot: &PanelSnapshot) -> DashboardSummary {
    DashboardSummary {
        tiles: RecordCategory::ALL
            .into_iter()
            .map(|category| summarize(category, snapshot.records(category)))
            .collect(),
    }
}
